//! Platform-agnostic input events.
//!
//! The gallery never talks to a windowing system directly; whatever
//! hosts it (the winit viewer, a test harness) translates its own events
//! into these and feeds them to
//! [`Gallery::handle_event`](crate::Gallery::handle_event). That keeps
//! every gesture injectable from tests.

/// One pointer or wheel event, already reduced to the single axis the
/// carousel cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed at horizontal position `x` (physical
    /// pixels).
    PointerDown {
        /// Horizontal position in physical pixels.
        x: f32,
    },
    /// Pointer moved to horizontal position `x`. Only meaningful to the
    /// gallery while the pointer is down.
    PointerMoved {
        /// Horizontal position in physical pixels.
        x: f32,
    },
    /// Primary pointer released.
    PointerUp,
    /// Scroll wheel notch; positive `delta` advances the carousel.
    Scroll {
        /// Signed scroll amount, in wheel notches.
        delta: f32,
    },
}
