//! Shared utilities.

/// Frame cadence for streamed views.
pub mod frame_timing;
