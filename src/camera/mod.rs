//! Camera used by every view.
//!
//! A single perspective camera that orbits the loaded structure, advancing
//! a fixed angle each time a frame is rendered.

/// Core camera struct and GPU uniform types.
pub mod core;
/// Automatic orbit around a structure's bounds.
pub mod orbit;

pub use self::core::{Camera, CameraUniform};
pub use orbit::OrbitCamera;
