//! Scroll state machine: eased scrolling, drag tracking, and snapping.
//!
//! `current` never jumps: each frame it relaxes toward `target` by the
//! ease factor. Input only ever writes `target` (drag deltas, wheel
//! steps, snap adjustments), which is what gives released gestures their
//! momentum tail.

/// Linear interpolation between `a` and `b` by factor `t`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Travel direction of the eased scroll over the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    /// Scroll value increasing; items travel toward −x.
    Forward,
    /// Scroll value decreasing; items travel toward +x.
    Backward,
}

/// Eased scroll value.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Scroll position items are laid out against this frame.
    pub current: f32,
    /// Where `current` is headed.
    pub target: f32,
    /// `current` as of the previous frame.
    pub last: f32,
    /// Per-frame interpolation fraction in (0, 1); higher is snappier.
    pub ease: f32,
}

impl ScrollState {
    /// New state at rest, with `ease` clamped into (0, 1).
    #[must_use]
    pub fn new(ease: f32) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            last: 0.0,
            ease: ease.clamp(1e-4, 1.0 - 1e-4),
        }
    }

    /// Relax `current` toward `target` by one frame and report the travel
    /// direction relative to the previous frame.
    pub fn ease_step(&mut self) -> ScrollDirection {
        self.current = lerp(self.current, self.target, self.ease);
        if self.current > self.last {
            ScrollDirection::Forward
        } else {
            ScrollDirection::Backward
        }
    }

    /// Scroll distance covered this frame (`current − last`). Drives the
    /// ripple-speed shader uniform.
    #[must_use]
    pub fn frame_delta(&self) -> f32 {
        self.current - self.last
    }

    /// Commit the frame: the next [`ease_step`](Self::ease_step) measures
    /// direction against today's `current`.
    pub fn end_frame(&mut self) {
        self.last = self.current;
    }
}

/// Pixel distance → scroll distance factor applied to drags.
const DRAG_SCALE: f32 = 0.025;
/// Fraction of the scroll-speed factor added per wheel notch.
const WHEEL_STEP: f32 = 0.2;

/// Pointer-down snapshot: where the drag started, on screen and in
/// scroll space.
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    start_x: f32,
    origin: f32,
}

/// Scroll state plus the input gestures that drive it.
#[derive(Debug)]
pub struct Scroller {
    /// The eased scroll value.
    pub state: ScrollState,
    speed: f32,
    drag: Option<DragAnchor>,
}

impl Scroller {
    /// New scroller with the given speed and ease factors.
    #[must_use]
    pub fn new(speed: f32, ease: f32) -> Self {
        Self {
            state: ScrollState::new(ease),
            speed,
            drag: None,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer pressed at screen x: snapshot the drag anchor.
    pub fn pointer_down(&mut self, x: f32) {
        self.drag = Some(DragAnchor {
            start_x: x,
            origin: self.state.current,
        });
    }

    /// Pointer moved to screen x. While a drag is held the target tracks
    /// the pointer; otherwise this is a no-op. Returns whether the event
    /// was consumed by a drag.
    pub fn pointer_move(&mut self, x: f32) -> bool {
        let Some(anchor) = self.drag else {
            return false;
        };
        let distance = (anchor.start_x - x) * self.speed * DRAG_SCALE;
        self.state.target = anchor.origin + distance;
        true
    }

    /// Pointer released. Returns whether a drag ended (the caller runs
    /// its snap check when it did).
    pub fn pointer_up(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// One wheel notch; positive `delta` advances the carousel.
    pub fn wheel(&mut self, delta: f32) {
        let step = if delta > 0.0 { self.speed } else { -self.speed };
        self.state.target += step * WHEEL_STEP;
    }

    /// Round the target to the nearest whole slot, preserving sign, so
    /// the carousel comes to rest with one item centered.
    pub fn snap_to_slot(&mut self, slot_width: f32) {
        if slot_width <= 0.0 {
            return;
        }
        let slot = (self.state.target.abs() / slot_width).round();
        let snapped = slot * slot_width;
        self.state.target = if self.state.target < 0.0 {
            -snapped
        } else {
            snapped
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_converges_monotonically() {
        // ease = 0.05 must close any gap up to 1e4 to within 1e-3 in at
        // most 90 frames, without overshooting.
        for target in [10_000.0_f32, -10_000.0, 42.0, -0.5] {
            let mut state = ScrollState::new(0.05);
            state.target = target;
            let mut previous_gap = (target - state.current).abs();
            let mut frames = 0;
            while (target - state.current).abs() > 1e-3 {
                let _ = state.ease_step();
                state.end_frame();
                let gap = (target - state.current).abs();
                assert!(gap <= previous_gap, "gap grew at frame {frames}");
                previous_gap = gap;
                frames += 1;
                assert!(frames <= 90, "no convergence for target {target}");
            }
        }
    }

    #[test]
    fn direction_tracks_travel() {
        let mut state = ScrollState::new(0.5);
        state.target = 10.0;
        assert_eq!(state.ease_step(), ScrollDirection::Forward);
        state.end_frame();

        state.target = -10.0;
        assert_eq!(state.ease_step(), ScrollDirection::Backward);
    }

    #[test]
    fn snap_rounds_to_nearest_slot_preserving_sign() {
        let width = 300.0;
        for (target, expected) in [
            (740.0, 600.0),
            (760.0, 900.0),
            (-740.0, -600.0),
            (-760.0, -900.0),
            (0.0, 0.0),
        ] {
            let mut scroller = Scroller::new(2.0, 0.05);
            scroller.state.target = target;
            scroller.snap_to_slot(width);
            assert_eq!(scroller.state.target, expected, "target {target}");
        }
    }

    #[test]
    fn snap_ignores_degenerate_slot_width() {
        let mut scroller = Scroller::new(2.0, 0.05);
        scroller.state.target = 123.0;
        scroller.snap_to_slot(0.0);
        assert_eq!(scroller.state.target, 123.0);
    }

    #[test]
    fn wheel_steps_target_by_fixed_fraction() {
        let mut scroller = Scroller::new(2.0, 0.05);
        scroller.wheel(1.0);
        scroller.wheel(1.0);
        scroller.wheel(-3.5);
        assert!((scroller.state.target - 0.4).abs() < 1e-6);
    }

    #[test]
    fn drag_sets_target_from_anchor() {
        let mut scroller = Scroller::new(2.0, 0.05);
        scroller.state.current = 50.0;
        scroller.state.target = 50.0;

        scroller.pointer_down(400.0);
        assert!(scroller.pointer_move(300.0));
        // (400 − 300) · 2 · 0.025 = 5 scroll units past the anchor.
        assert!((scroller.state.target - 55.0).abs() < 1e-6);

        // Only target moved; current still eases from where it was.
        assert_eq!(scroller.state.current, 50.0);
        assert!(scroller.pointer_up());
        assert!(!scroller.pointer_move(250.0));
    }

    #[test]
    fn released_drag_snaps_within_one_debounce_cycle() {
        // 3 items 300 world units wide: drag left by 2.5 item widths,
        // release, snap. The rest position must be an integral number of
        // item widths (2 or 3).
        let item_width = 300.0;
        let mut scroller = Scroller::new(2.0, 0.05);

        scroller.pointer_down(700.0);
        // 2.5 item widths = 750 scroll units = 15000 px at speed 2.
        let _ = scroller.pointer_move(700.0 - 15_000.0);
        assert!((scroller.state.target - 750.0).abs() < 1e-3);
        assert!(scroller.pointer_up());
        scroller.snap_to_slot(item_width);

        let slots = scroller.state.target / item_width;
        assert!(
            (slots - slots.round()).abs() < 1e-6,
            "target {} is not an integral slot",
            scroller.state.target
        );
        assert!(slots.round() == 2.0 || slots.round() == 3.0);

        // And the eased scroll still reaches the snapped slot.
        for _ in 0..200 {
            let _ = scroller.state.ease_step();
            scroller.state.end_frame();
        }
        assert!((scroller.state.current - scroller.state.target).abs() < 1e-2);
    }
}
