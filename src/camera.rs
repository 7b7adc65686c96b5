//! Fixed perspective camera and the pixel↔world viewport mapping.
//!
//! The gallery camera never moves: it sits on the +Z axis looking at the
//! origin. What changes on resize is the aspect ratio, and from
//! `{fovy, distance, aspect}` we derive the **world viewport**: the
//! extent of the z = 0 plane visible through the camera, in the same
//! units item widths are expressed in. All layout math runs in those
//! units.

use glam::{Mat4, Vec3};

/// The surface pixel box of the mount area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
}

/// Visible extent of the z = 0 plane in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldViewport {
    /// Visible width in world units.
    pub width: f32,
    /// Visible height in world units.
    pub height: f32,
}

/// Perspective camera on the +Z axis, looking at the origin.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Distance from the origin along +Z.
    pub distance: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create the gallery camera: 45° fov, 20 world units back.
    #[must_use]
    pub fn new() -> Self {
        Self {
            fovy: 45.0,
            distance: 20.0,
            aspect: 1.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Update the aspect ratio from a pixel box. Zero-sized boxes fall
    /// back to 1:1 until the first valid resize arrives.
    pub fn set_aspect(&mut self, screen: ScreenSize) {
        self.aspect = if screen.width == 0 || screen.height == 0 {
            1.0
        } else {
            screen.width as f32 / screen.height as f32
        };
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(
            Vec3::new(0.0, 0.0, self.distance),
            Vec3::ZERO,
            Vec3::Y,
        );
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Extent of the z = 0 plane visible through this camera.
    ///
    /// `height = 2·tan(fovy/2)·distance`, `width = height·aspect`.
    #[must_use]
    pub fn world_viewport(&self) -> WorldViewport {
        let height =
            2.0 * (self.fovy.to_radians() / 2.0).tan() * self.distance;
        WorldViewport {
            width: height * self.aspect,
            height,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Refresh from the camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_follows_fov_and_distance() {
        let mut camera = Camera::new();
        camera.set_aspect(ScreenSize {
            width: 800,
            height: 400,
        });
        let vp = camera.world_viewport();
        let expected_h = 2.0 * (45.0f32.to_radians() / 2.0).tan() * 20.0;
        assert!((vp.height - expected_h).abs() < 1e-5);
        assert!((vp.width - expected_h * 2.0).abs() < 1e-4);
    }

    #[test]
    fn zero_size_screen_defaults_to_square_aspect() {
        let mut camera = Camera::new();
        camera.set_aspect(ScreenSize {
            width: 0,
            height: 0,
        });
        assert_eq!(camera.aspect, 1.0);
        camera.set_aspect(ScreenSize {
            width: 800,
            height: 0,
        });
        assert_eq!(camera.aspect, 1.0);

        // First valid resize takes over.
        camera.set_aspect(ScreenSize {
            width: 300,
            height: 150,
        });
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn viewport_is_square_for_square_aspect() {
        let camera = Camera::new();
        let vp = camera.world_viewport();
        assert!((vp.width - vp.height).abs() < 1e-6);
    }
}
