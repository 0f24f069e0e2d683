//! A winit window standing in for a foreign GUI toolkit.
//!
//! The toolkit owns the event loop and the window; viso-live only gets the
//! window handle through [`WindowHost`]. Frames are drawn once when the
//! host is created and then only on the toolkit's own redraw (expose)
//! events, so the picture stays still until the window system asks for a
//! repaint.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use super::standalone::{drawable_size, window_attributes};
use super::WindowHost;
use crate::error::LiveError;
use crate::gpu::context::Context;
use crate::options::WindowOptions;
use crate::structure::StructureModel;
use crate::view::ViewStyle;

/// Run a toolkit-owned window that embeds `model` through a [`WindowHost`].
///
/// # Errors
///
/// Returns [`LiveError::Viewer`] if the event loop or window cannot be
/// created, and the host construction or render error that stopped it
/// otherwise.
pub fn run_embedded(
    context: &Context,
    model: &StructureModel,
    options: &WindowOptions,
    style: ViewStyle,
) -> Result<(), LiveError> {
    let event_loop = EventLoop::new().map_err(|e| LiveError::Viewer(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ToolkitApp {
        host: None,
        window: None,
        context,
        model,
        options,
        style,
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

struct ToolkitApp<'a> {
    host: Option<WindowHost<'a>>,
    window: Option<Arc<Window>>,
    context: &'a Context,
    model: &'a StructureModel,
    options: &'a WindowOptions,
    style: ViewStyle,
    error: Option<LiveError>,
}

impl ToolkitApp<'_> {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: LiveError) {
        log::error!("{error}");
        self.error = Some(error);
        self.host = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for ToolkitApp<'_> {
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
        let (width, height) = drawable_size(window.inner_size(), self.options);

        match WindowHost::new(
            self.context,
            Arc::clone(&window),
            self.model,
            width,
            height,
            self.style,
        ) {
            Ok(host) => {
                log::debug!("initial render: {:?}", host.initial_render());
                self.host = Some(host);
            }
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        }
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
                if let Some(host) = self.host.take() {
                    log::info!("embedded view drew {} frames", host.frames_rendered());
                }
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(host) = &mut self.host else {
                    return;
                };
                match host.redraw() {
                    Ok(_) => {}
                    Err(e) if e.is_recoverable() => log::debug!("skipped frame: {e}"),
                    Err(e) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }
}
