//! Input handling: the platform-agnostic event type the controller
//! consumes, and the cancellable timer behind wheel debouncing.

/// Platform-agnostic input events.
pub mod event;

/// Explicit cancellable deadline timer.
pub mod debounce;

pub use debounce::DebounceTimer;
pub use event::InputEvent;
