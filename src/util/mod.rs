//! Small shared utilities.

/// Frame timing with smoothed FPS for diagnostics.
pub mod frame_timing;
