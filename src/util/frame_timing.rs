use web_time::{Duration, Instant};

/// Stream cadence: optional frame-rate cap plus a smoothed FPS estimate.
///
/// With `max_fps == 0` frames are produced back-to-back and
/// [`FramePacer::wait`] never sleeps.
pub struct FramePacer {
    /// Frame cap (0 = unlimited)
    max_fps: u32,
    /// Minimum frame duration based on the cap
    min_frame_duration: Duration,
    /// Start of the previous frame, if any
    last_frame: Option<Instant>,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    /// Frames completed so far
    frames: u64,
}

impl FramePacer {
    /// Create a new pacer with the given FPS cap (0 = unlimited).
    #[must_use]
    pub fn new(max_fps: u32) -> Self {
        let min_frame_duration = if max_fps > 0 {
            Duration::from_secs_f64(1.0 / f64::from(max_fps))
        } else {
            Duration::ZERO
        };

        Self {
            max_fps,
            min_frame_duration,
            last_frame: None,
            smoothed_fps: 0.0,
            smoothing: 0.1,
            frames: 0,
        }
    }

    /// How long to wait before the next frame may start.
    #[must_use]
    pub fn remaining(&self) -> Duration {
        match self.last_frame {
            Some(last) if self.max_fps > 0 => {
                self.min_frame_duration.saturating_sub(last.elapsed())
            }
            _ => Duration::ZERO,
        }
    }

    /// Block until the minimum frame interval has elapsed, then mark the
    /// start of a new frame.
    pub fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }

        let now = Instant::now();
        if let Some(last) = self.last_frame {
            let frame_time = now.duration_since(last).as_secs_f32();
            if frame_time > 0.0 {
                let instant_fps = 1.0 / frame_time;
                self.smoothed_fps = if self.frames <= 1 {
                    instant_fps
                } else {
                    self.smoothed_fps * (1.0 - self.smoothing)
                        + instant_fps * self.smoothing
                };
            }
        }
        self.last_frame = Some(now);
    }

    /// Record that a frame has been delivered.
    pub fn end_frame(&mut self) {
        self.frames += 1;
    }

    /// Frames delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed frames per second (0 until two frames have started).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_waits() {
        let mut pacer = FramePacer::new(0);
        pacer.wait();
        pacer.end_frame();
        assert_eq!(pacer.remaining(), Duration::ZERO);
        assert_eq!(pacer.frames(), 1);
    }

    #[test]
    fn capped_pacer_reports_remaining_interval() {
        let mut pacer = FramePacer::new(1);
        assert_eq!(pacer.remaining(), Duration::ZERO);
        pacer.wait();
        let remaining = pacer.remaining();
        assert!(remaining > Duration::ZERO);
        assert!(remaining <= Duration::from_secs(1));
    }
}
