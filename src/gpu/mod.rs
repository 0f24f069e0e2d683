//! GPU resource management utilities.
//!
//! Provides wgpu device initialization, offscreen render targets and the
//! synchronous texture readback used by streamed views.

/// wgpu instance, adapter, device and queue initialization.
pub mod context;
/// Synchronous texture-to-CPU readback.
pub mod readback;
/// Offscreen colour and depth render targets.
pub mod texture;
