//! Per-item layout math: world sizing, arc curvature, wraparound.
//!
//! Everything in here is plain arithmetic over the shared scroll value
//! (no GPU types), so the carousel's geometric guarantees are testable
//! headless. [`super::MediaItem`] feeds the resulting placements into
//! the scene graph.

use crate::camera::{ScreenSize, WorldViewport};
use crate::scroll::ScrollDirection;

/// Reference screen height the world scale is normalized against.
const REFERENCE_HEIGHT_PX: f32 = 1500.0;
/// Plane height in reference pixels before world mapping.
const PLANE_HEIGHT_PX: f32 = 900.0;
/// Plane width in reference pixels before world mapping.
const PLANE_WIDTH_PX: f32 = 700.0;
/// Gap between neighboring planes, world units.
const ITEM_PADDING: f32 = 2.0;

/// Where an item's plane sits this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPlacement {
    /// World x of the plane center.
    pub x: f32,
    /// World y of the plane center (arc sag).
    pub y: f32,
    /// Rotation about z, radians, tangent to the arc.
    pub rotation_z: f32,
}

/// The pure-math half of one media item.
///
/// Sizing fields are recomputed by [`resize`](Self::resize); the wrap
/// offset accumulates over the item's lifetime as it loops past the
/// viewport edges.
#[derive(Debug, Clone)]
pub struct ItemLayout {
    index: usize,
    count: usize,
    bend: f32,
    wrap_offset: f32,
    is_before: bool,
    is_after: bool,
    width: f32,
    height: f32,
    spacing: f32,
    row_width: f32,
    base_x: f32,
    viewport_width: f32,
}

impl ItemLayout {
    /// Layout slot `index` of `count` (the doubled list length) with the
    /// given signed curvature.
    #[must_use]
    pub fn new(index: usize, count: usize, bend: f32) -> Self {
        Self {
            index,
            count,
            bend,
            wrap_offset: 0.0,
            is_before: false,
            is_after: false,
            width: 0.0,
            height: 0.0,
            spacing: 0.0,
            row_width: 0.0,
            base_x: 0.0,
            viewport_width: 0.0,
        }
    }

    /// Plane width in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Plane height in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Center-to-center distance between neighboring items, which is
    /// also the snap slot width.
    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Combined width of the full doubled row.
    #[must_use]
    pub fn row_width(&self) -> f32 {
        self.row_width
    }

    /// Accumulated wraparound correction.
    #[must_use]
    pub fn wrap_offset(&self) -> f32 {
        self.wrap_offset
    }

    /// Recompute world sizes from the current pixel box and world
    /// viewport.
    ///
    /// The scale factor pins item size to screen height: a 1500 px tall
    /// mount shows planes at their full 700×900 reference size, smaller
    /// mounts scale down proportionally.
    pub fn resize(&mut self, screen: ScreenSize, viewport: WorldViewport) {
        let scale = screen.height as f32 / REFERENCE_HEIGHT_PX;
        self.height = viewport.height * (PLANE_HEIGHT_PX * scale)
            / screen.height.max(1) as f32;
        self.width = viewport.width * (PLANE_WIDTH_PX * scale)
            / screen.width.max(1) as f32;
        self.spacing = self.width + ITEM_PADDING;
        self.row_width = self.spacing * self.count as f32;
        self.base_x = self.spacing * self.index as f32;
        self.viewport_width = viewport.width;
    }

    /// Recompute this frame's placement from the eased scroll value,
    /// wrapping the item to the far end when it leaves the viewport in
    /// the direction of travel.
    pub fn update(
        &mut self,
        scroll_current: f32,
        direction: ScrollDirection,
    ) -> ItemPlacement {
        let x = self.base_x - scroll_current - self.wrap_offset;
        let (y, rotation_z) = self.curve(x);

        let half_plane = self.width / 2.0;
        let half_viewport = self.viewport_width / 2.0;
        self.is_before = x + half_plane < -half_viewport;
        self.is_after = x - half_plane > half_viewport;
        match direction {
            ScrollDirection::Forward if self.is_before => {
                self.wrap_offset -= self.row_width;
                self.is_before = false;
                self.is_after = false;
            }
            ScrollDirection::Backward if self.is_after => {
                self.wrap_offset += self.row_width;
                self.is_before = false;
                self.is_after = false;
            }
            _ => {}
        }

        ItemPlacement { x, y, rotation_z }
    }

    /// Arc curvature: sag and tangent rotation for a plane centered at
    /// world `x`.
    ///
    /// The row lies on a circle through (−H, 0), (0, ±bend), (H, 0)
    /// where H is half the viewport width, giving radius
    /// `R = (H² + bend²) / (2·|bend|)`. Positive bend sags downward.
    fn curve(&self, x: f32) -> (f32, f32) {
        if self.bend == 0.0 {
            return (0.0, 0.0);
        }

        let half_viewport = self.viewport_width / 2.0;
        let b = self.bend.abs();
        let radius = (half_viewport * half_viewport + b * b) / (2.0 * b);
        let arc_x = x.abs().min(half_viewport);

        let sag = radius - (radius * radius - arc_x * arc_x).sqrt();
        let rotation = x.signum() * (arc_x / radius).asin();
        if self.bend > 0.0 {
            (-sag, -rotation)
        } else {
            (sag, rotation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: ScreenSize = ScreenSize {
        width: 800,
        height: 200,
    };
    const VIEWPORT: WorldViewport = WorldViewport {
        width: 66.3,
        height: 16.6,
    };

    fn sized(index: usize, count: usize, bend: f32) -> ItemLayout {
        let mut layout = ItemLayout::new(index, count, bend);
        layout.resize(SCREEN, VIEWPORT);
        layout
    }

    #[test]
    fn zero_bend_is_flat_everywhere() {
        let mut layout = sized(0, 6, 0.0);
        for step in 0..200 {
            let scroll = step as f32 * 1.7 - 150.0;
            let p = layout.update(scroll, ScrollDirection::Forward);
            assert_eq!(p.y, 0.0, "scroll {scroll}");
            assert_eq!(p.rotation_z, 0.0, "scroll {scroll}");
        }
    }

    #[test]
    fn centered_item_has_no_sag_for_either_bend_sign() {
        for bend in [3.0, -3.0] {
            let mut layout = sized(0, 6, bend);
            // Index 0 with zero scroll sits exactly at x = 0.
            let p = layout.update(0.0, ScrollDirection::Forward);
            assert_eq!(p.x, 0.0);
            assert!(p.y.abs() < 1e-6, "bend {bend}");
            assert!(p.rotation_z.abs() < 1e-6, "bend {bend}");
        }
    }

    #[test]
    fn bend_sign_sets_sag_direction_and_tangent() {
        let mut positive = sized(1, 6, 3.0);
        let p = positive.update(0.0, ScrollDirection::Forward);
        assert!(p.x > 0.0);
        assert!(p.y < 0.0, "positive bend sags downward");
        assert!(p.rotation_z < 0.0);

        let mut negative = sized(1, 6, -3.0);
        let n = negative.update(0.0, ScrollDirection::Forward);
        assert!(n.y > 0.0, "negative bend sags upward");
        assert!(n.rotation_z > 0.0);

        // Mirror images of each other.
        assert!((p.y + n.y).abs() < 1e-6);
        assert!((p.rotation_z + n.rotation_z).abs() < 1e-6);
    }

    #[test]
    fn sag_clamps_beyond_the_viewport_edge() {
        let layout = sized(0, 6, 3.0);
        let half = VIEWPORT.width / 2.0;
        let at_edge = layout.curve(half);
        let beyond = layout.curve(half * 3.0);
        assert!((at_edge.0 - beyond.0).abs() < 1e-6);
        // Rotation keeps the sign of x even past the clamp.
        assert!(beyond.1 < 0.0);
    }

    #[test]
    fn resize_is_idempotent() {
        let mut once = ItemLayout::new(2, 6, 3.0);
        once.resize(SCREEN, VIEWPORT);
        let mut twice = ItemLayout::new(2, 6, 3.0);
        twice.resize(SCREEN, VIEWPORT);
        twice.resize(SCREEN, VIEWPORT);

        assert_eq!(once.width(), twice.width());
        assert_eq!(once.height(), twice.height());
        assert_eq!(once.spacing(), twice.spacing());
        let a = once.update(5.0, ScrollDirection::Forward);
        let b = twice.update(5.0, ScrollDirection::Forward);
        assert_eq!(a, b);
    }

    #[test]
    fn full_row_of_forward_travel_preserves_x_mod_row_width() {
        let count = 8;
        let mut layouts: Vec<ItemLayout> =
            (0..count).map(|i| sized(i, count, 3.0)).collect();
        let row = layouts[0].row_width();

        let initial: Vec<f32> = layouts
            .iter_mut()
            .map(|l| l.update(0.0, ScrollDirection::Forward).x)
            .collect();

        // Drag forward monotonically by exactly one full row width,
        // in many small frames so wraps trigger as edges are crossed.
        let frames = 400;
        for step in 1..=frames {
            let scroll = row * step as f32 / frames as f32;
            for layout in &mut layouts {
                let _ = layout.update(scroll, ScrollDirection::Forward);
            }
        }

        let mut wrapped_count = 0usize;
        for (layout, x0) in layouts.iter_mut().zip(&initial) {
            let x = layout.update(row, ScrollDirection::Forward).x;
            let residue = (x - x0).rem_euclid(row);
            assert!(
                residue < 1e-2 || row - residue < 1e-2,
                "x {x} not congruent to {x0} mod {row}"
            );
            if layout.wrap_offset() != 0.0 {
                wrapped_count += 1;
            }
        }
        // Items near the leading edge wrapped; their offsets differ from
        // the untouched ones yet congruence still holds.
        assert!(wrapped_count > 0);
        assert!(wrapped_count < count);
    }

    #[test]
    fn wrap_is_direction_sensitive() {
        let mut layout = sized(0, 6, 0.0);
        let row = layout.row_width();

        // Push the item far past the left edge while moving backward:
        // no forward-wrap may fire.
        let _ = layout.update(row, ScrollDirection::Backward);
        assert_eq!(layout.wrap_offset(), 0.0);

        // Same position, moving forward: wraps once, flags reset.
        let _ = layout.update(row, ScrollDirection::Forward);
        assert_eq!(layout.wrap_offset(), -row);

        // The wrapped item is back on screen; a second forward frame at
        // the same scroll must not wrap again.
        let _ = layout.update(row, ScrollDirection::Forward);
        assert_eq!(layout.wrap_offset(), -row);
    }
}
