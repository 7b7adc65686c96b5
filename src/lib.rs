// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Infinite curved image carousel rendered with wgpu.
//!
//! A finite media list is duplicated, laid out on a circular arc, and
//! looped seamlessly: items that scroll past one viewport edge re-anchor
//! at the other. Pointer drags and wheel notches move a scroll *target*;
//! the visible scroll *current* eases toward it every frame and snaps to
//! the nearest item once input goes quiet.
//!
//! # Key entry points
//!
//! - [`Gallery`] - the carousel controller bound to one drawing surface
//! - [`GalleryConfig`] - construction options (items, bend, font, ...)
//! - [`viewer::Viewer`] - optional winit window host (`viewer` feature)
//!
//! # Architecture
//!
//! The controller owns a flat arena [`scene::SceneGraph`], one
//! [`media::MediaItem`] per (doubled) entry, and the scroll state
//! machine. Each tick the host calls [`Gallery::frame`] (drain decoded
//! images, fire the debounced snap, ease, re-place items, rebuild world
//! matrices), then [`Gallery::render`] draws every plane and label in a
//! single pass. Image decoding runs on a background thread and lands
//! via a channel; nothing else leaves the render thread.

pub mod camera;
pub mod config;
pub mod error;
pub mod gallery;
pub mod gpu;
pub mod input;
pub mod media;
pub mod scene;
pub mod scroll;
pub mod text;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use config::GalleryConfig;
pub use error::GalleriaError;
pub use gallery::Gallery;
pub use input::InputEvent;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
