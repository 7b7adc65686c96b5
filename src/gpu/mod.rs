//! wgpu plumbing: device/surface ownership, texture upload, mesh and
//! pipeline boilerplate. Nothing in here knows what a carousel is.

/// Subdivided plane geometry shared by every item.
pub mod mesh;
/// Bind-group-layout and pipeline constructors.
pub mod pipeline_helpers;
/// Core wgpu resources (device, queue, surface).
pub mod render_context;
/// Image texture upload and placeholders.
pub mod texture;
