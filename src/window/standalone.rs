use std::sync::Arc;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use super::input::{self, CameraInput, CameraKey};
use crate::error::LiveError;
use crate::gpu::context::Context;
use crate::options::WindowOptions;
use crate::structure::StructureModel;
use crate::view::{FrameView, ViewStyle};

/// Fixed-size, non-resizable window attributes from `options`.
pub(super) fn window_attributes(options: &WindowOptions) -> winit::window::WindowAttributes {
    Window::default_attributes()
        .with_title(&options.title)
        .with_inner_size(PhysicalSize::new(
            options.width.max(1),
            options.height.max(1),
        ))
        .with_resizable(false)
}

/// Surface size for a freshly created window.
///
/// Some compositors report 0×0 until the first configure; the requested
/// size stands in until then.
pub(super) fn drawable_size(size: PhysicalSize<u32>, options: &WindowOptions) -> (u32, u32) {
    if size.width == 0 || size.height == 0 {
        (options.width.max(1), options.height.max(1))
    } else {
        (size.width, size.height)
    }
}

impl Context {
    /// Open a window and redraw `model` continuously until it is closed.
    ///
    /// Blocks the calling thread. The surface-bound view is created when
    /// the event loop resumes and dropped before this returns; the caller
    /// then drops the model and the context.
    ///
    /// # Errors
    ///
    /// Returns [`LiveError::Viewer`] if the event loop or window cannot be
    /// created, and the view or render error that stopped the loop
    /// otherwise.
    pub fn run_blocking_loop(
        &self,
        model: &StructureModel,
        options: &WindowOptions,
        style: ViewStyle,
    ) -> Result<(), LiveError> {
        let event_loop =
            EventLoop::new().map_err(|e| LiveError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = StandaloneApp {
            view: None,
            window: None,
            context: self,
            model,
            options,
            style,
            input: CameraInput::default(),
            error: None,
        };
        event_loop
            .run_app(&mut app)
            .map_err(|e| LiveError::Viewer(e.to_string()))?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Internal winit application handler.
///
/// `view` is declared before `window` so the surface is released first.
struct StandaloneApp<'a> {
    view: Option<FrameView>,
    window: Option<Arc<Window>>,
    context: &'a Context,
    model: &'a StructureModel,
    options: &'a WindowOptions,
    style: ViewStyle,
    input: CameraInput,
    error: Option<LiveError>,
}

impl StandaloneApp<'_> {
    fn create_view(&self, window: &Arc<Window>) -> Result<FrameView, LiveError> {
        let (width, height) = drawable_size(window.inner_size(), self.options);
        let surface = self
            .context
            .instance
            .create_surface(Arc::clone(window))
            .map_err(LiveError::Surface)?;
        let mut view = FrameView::for_surface(
            self.context,
            surface,
            self.model,
            width,
            height,
        )?;
        view.set_style(self.style);
        Ok(view)
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LiveError) {
        log::error!("{error}");
        self.error = Some(error);
        self.view = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for StandaloneApp<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(window_attributes(self.options)) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, LiveError::Viewer(e.to_string()));
                return;
            }
        };

        match self.create_view(&window) {
            Ok(view) => self.view = Some(view),
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(view) = self.view.take() {
                    log::info!("window closed after {} frames", view.frames_rendered());
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(view) = &mut self.view else {
                    return;
                };
                match view.render(self.context, self.model) {
                    Ok(_) => {}
                    Err(e) if e.is_recoverable() => log::debug!("skipped frame: {e}"),
                    Err(e) => {
                        self.fail(event_loop, e.into());
                        return;
                    }
                }
                // Continuous: every drawn frame schedules the next.
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if let Some(view) = &mut self.view {
                    self.input.mouse_button(button, state, view.camera_mut());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(view) = &mut self.view {
                    let position = Vec2::new(position.x as f32, position.y as f32);
                    self.input.cursor_moved(position, view.camera_mut());
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(view) = &mut self.view {
                    input::scroll(delta, view.camera_mut());
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                if let (Some(key), Some(view)) =
                    (CameraKey::from_key_code(code), &mut self.view)
                {
                    key.apply(view.camera_mut());
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_inner_size_falls_back_to_requested() {
        let options = WindowOptions {
            width: 640,
            height: 480,
            ..WindowOptions::default()
        };
        assert_eq!(drawable_size(PhysicalSize::new(0, 0), &options), (640, 480));
        assert_eq!(drawable_size(PhysicalSize::new(800, 0), &options), (640, 480));
        assert_eq!(drawable_size(PhysicalSize::new(320, 200), &options), (320, 200));
    }
}
