//! Views bound to native windows.
//!
//! [`WindowHost`] serves toolkits that own their event loop: it builds a
//! surface-bound [`FrameView`], renders once immediately, and afterwards
//! only draws when the toolkit calls [`WindowHost::redraw`]. The window
//! size is fixed for the host's lifetime.
//!
//! With the `viewer` feature, `Context::run_blocking_loop` instead opens
//! its own window and redraws continuously until it is closed, turning
//! the camera in response to mouse and keyboard input.

#[cfg(feature = "viewer")]
mod input;
#[cfg(feature = "viewer")]
mod standalone;
#[cfg(feature = "viewer")]
pub mod toolkit;

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

use crate::error::LiveError;
use crate::gpu::context::Context;
use crate::structure::StructureModel;
use crate::view::{FrameView, RenderError, Rendered, ViewStyle};

/// A surface-bound view driven by an external event loop.
///
/// Borrows the context and model, so neither can be dropped while the host
/// is alive.
pub struct WindowHost<'a> {
    view: FrameView,
    initial: Rendered,
    model: &'a StructureModel,
    context: &'a Context,
}

impl<'a> WindowHost<'a> {
    /// Bind a view to `target` and render the first frame with `style`.
    ///
    /// `target` is anything wgpu can make a surface from that keeps the
    /// window alive, such as an `Arc<winit::window::Window>`.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Surface`] if the handle is unusable,
    /// [`LiveError::InvalidSize`] for a zero dimension, and
    /// [`LiveError::Render`] if the first frame fails.
    pub fn new(
        context: &'a Context,
        target: impl Into<wgpu::SurfaceTarget<'static>>,
        model: &'a StructureModel,
        width: u32,
        height: u32,
        style: ViewStyle,
    ) -> Result<Self, LiveError> {
        let surface = context
            .instance
            .create_surface(target)
            .map_err(LiveError::Surface)?;
        Self::with_surface(context, surface, model, (width, height), style)
    }

    /// Bind a view to a window owned by a foreign toolkit.
    ///
    /// # Errors
    ///
    /// As [`WindowHost::new`].
    ///
    /// # Safety
    ///
    /// The handles must stay valid until the host is dropped, and no other
    /// view may render into the same window while it lives.
    pub unsafe fn from_raw_handles(
        context: &'a Context,
        window: RawWindowHandle,
        display: RawDisplayHandle,
        model: &'a StructureModel,
        width: u32,
        height: u32,
        style: ViewStyle,
    ) -> Result<Self, LiveError> {
        // SAFETY: the caller guarantees the handles outlive the surface.
        let surface = unsafe {
            context
                .instance
                .create_surface_unsafe(wgpu::SurfaceTargetUnsafe::RawHandle {
                    raw_display_handle: display,
                    raw_window_handle: window,
                })
        }
        .map_err(LiveError::Surface)?;
        Self::with_surface(context, surface, model, (width, height), style)
    }

    fn with_surface(
        context: &'a Context,
        surface: wgpu::Surface<'static>,
        model: &'a StructureModel,
        (width, height): (u32, u32),
        style: ViewStyle,
    ) -> Result<Self, LiveError> {
        let mut view = FrameView::for_surface(context, surface, model, width, height)?;
        let initial = first_render(&mut view, context, model, style)?;
        log::info!("window host ready at {width}x{height}");
        Ok(Self {
            view,
            initial,
            model,
            context,
        })
    }

    /// Result of the render performed during construction.
    #[must_use]
    pub fn initial_render(&self) -> &Rendered {
        &self.initial
    }

    /// Draw one frame. Call from the toolkit's expose/paint handler.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] on failure. A lost or outdated surface is
    /// reconfigured at the fixed size before returning, so
    /// [`RenderError::is_recoverable`] errors can be ignored until the next
    /// redraw.
    pub fn redraw(&mut self) -> Result<Rendered, RenderError> {
        self.view.render(self.context, self.model)
    }

    /// Fixed `(width, height)` of the bound surface.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.view.size()
    }

    /// Renders performed so far, including the initial one.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.view.frames_rendered()
    }
}

/// Apply `style`, then draw the frame that stays on screen until the first
/// expose.
fn first_render(
    view: &mut FrameView,
    context: &Context,
    model: &StructureModel,
    style: ViewStyle,
) -> Result<Rendered, RenderError> {
    view.set_style(style);
    view.render(context, model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDB: &[u8] = b"\
ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C
";

    #[test]
    fn first_render_uses_configured_background() {
        let context = match Context::headless() {
            Ok(context) => context,
            Err(e) => {
                log::warn!("skipping GPU test: {e}");
                return;
            }
        };
        let model = StructureModel::new(&context, PDB).unwrap();
        let mut view = FrameView::offscreen(&context, &model, 24, 24).unwrap();
        let style = ViewStyle {
            background: [1.0, 0.0, 0.0],
            ..ViewStyle::default()
        };

        let rendered = first_render(&mut view, &context, &model, style).unwrap();
        assert!(matches!(
            rendered,
            Rendered::Pixels(frame) if frame.pixels()[..4] == [255, 0, 0, 255]
        ));
    }
}
