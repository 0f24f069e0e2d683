//! Mouse and keyboard camera control for the standalone window.
//!
//! Dragging with the left or right button turns the structure and pauses
//! the automatic orbit until the button is released. The scroll wheel and
//! W/S zoom; the arrow keys pan.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use crate::camera::OrbitCamera;

/// Screen pixels panned per arrow-key press.
const KEY_PAN_PIXELS: f32 = 24.0;
/// Scroll lines per W/S press.
const KEY_ZOOM_LINES: f32 = 1.0;
/// Pixels of touchpad scroll counted as one wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

/// A key bound to a camera move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CameraKey {
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
}

impl CameraKey {
    pub(crate) fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Self::ZoomIn),
            KeyCode::KeyS => Some(Self::ZoomOut),
            KeyCode::ArrowLeft => Some(Self::PanLeft),
            KeyCode::ArrowRight => Some(Self::PanRight),
            KeyCode::ArrowUp => Some(Self::PanUp),
            KeyCode::ArrowDown => Some(Self::PanDown),
            _ => None,
        }
    }

    pub(crate) fn apply(self, camera: &mut OrbitCamera) {
        match self {
            Self::ZoomIn => camera.zoom(KEY_ZOOM_LINES),
            Self::ZoomOut => camera.zoom(-KEY_ZOOM_LINES),
            Self::PanLeft => camera.pan(Vec2::new(-KEY_PAN_PIXELS, 0.0)),
            Self::PanRight => camera.pan(Vec2::new(KEY_PAN_PIXELS, 0.0)),
            Self::PanUp => camera.pan(Vec2::new(0.0, -KEY_PAN_PIXELS)),
            Self::PanDown => camera.pan(Vec2::new(0.0, KEY_PAN_PIXELS)),
        }
    }
}

/// Zoom by a wheel or touchpad scroll.
pub(crate) fn scroll(delta: MouseScrollDelta, camera: &mut OrbitCamera) {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
    };
    camera.zoom(lines);
}

/// Drag tracking between window events.
#[derive(Debug, Default)]
pub(crate) struct CameraInput {
    dragging: bool,
    cursor: Option<Vec2>,
}

impl CameraInput {
    pub(crate) fn mouse_button(
        &mut self,
        button: MouseButton,
        state: ElementState,
        camera: &mut OrbitCamera,
    ) {
        if !matches!(button, MouseButton::Left | MouseButton::Right) {
            return;
        }
        self.dragging = state == ElementState::Pressed;
        camera.set_paused(self.dragging);
    }

    pub(crate) fn cursor_moved(&mut self, position: Vec2, camera: &mut OrbitCamera) {
        if let (true, Some(previous)) = (self.dragging, self.cursor) {
            camera.rotate(position - previous);
        }
        self.cursor = Some(position);
    }
}
