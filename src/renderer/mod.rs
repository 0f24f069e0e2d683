//! Render passes drawn by a [`FrameView`](crate::view::FrameView).
//!
//! Atoms are the only geometry: one instanced sphere-impostor draw.

/// Ray-cast sphere impostor pass.
pub mod sphere;
