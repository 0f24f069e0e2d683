use serde::{Deserialize, Serialize};

use crate::view::ViewStyle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Size and appearance of streamed (offscreen) views.
pub struct ViewOptions {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Clear colour (linear RGB).
    pub background: [f32; 3],
    /// Camera orbit step per rendered frame, in degrees.
    pub orbit_degrees_per_frame: f32,
    /// Multiplier applied to van der Waals radii.
    pub atom_scale: f32,
}

impl Default for ViewOptions {
    fn default() -> Self {
        let style = ViewStyle::default();
        Self {
            width: 1200,
            height: 800,
            background: style.background,
            orbit_degrees_per_frame: style.orbit_degrees_per_frame,
            atom_scale: style.atom_scale,
        }
    }
}

impl ViewOptions {
    /// Appearance settings to apply to a view.
    #[must_use]
    pub fn style(&self) -> ViewStyle {
        ViewStyle {
            background: self.background,
            orbit_degrees_per_frame: self.orbit_degrees_per_frame,
            atom_scale: self.atom_scale,
        }
    }
}
