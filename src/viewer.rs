//! Standalone gallery window backed by winit.
//!
//! ```no_run
//! # use galleria::{config::GalleryConfig, viewer::Viewer};
//! Viewer::builder()
//!     .with_config(GalleryConfig::default())
//!     .with_title("My Gallery")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::GalleryConfig;
use crate::error::GalleriaError;
use crate::gallery::Gallery;
use crate::input::InputEvent;
use crate::util::frame_timing::FrameTiming;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    config: GalleryConfig,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            config: GalleryConfig::default(),
            title: "Galleria".into(),
        }
    }

    /// Set the gallery configuration.
    #[must_use]
    pub fn with_config(mut self, config: GalleryConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            config: self.config,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window hosting one gallery.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    config: GalleryConfig,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window
    /// is closed.
    ///
    /// # Errors
    ///
    /// Returns [`GalleriaError::Viewer`] when the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), GalleriaError> {
        let event_loop =
            EventLoop::new().map_err(|e| GalleriaError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            gallery: None,
            config: self.config,
            title: self.title,
            cursor_x: 0.0,
            frame_timing: FrameTiming::new(),
            frames: 0,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| GalleriaError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    gallery: Option<Gallery>,
    config: GalleryConfig,
    title: String,
    /// Last observed cursor x, handed to pointer-down events.
    cursor_x: f32,
    frame_timing: FrameTiming,
    frames: u64,
}

/// Clamp a window size so the first surface configure is valid.
fn surface_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1100, 600));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = surface_size(window.inner_size());
        let gallery = match pollster::block_on(Gallery::new(
            window.clone(),
            size,
            &self.config,
        )) {
            Ok(g) => g,
            Err(e) => {
                log::error!("failed to initialize gallery: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.gallery = Some(gallery);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(gallery) = &mut self.gallery {
                gallery.destroy();
            }
            event_loop.exit();
            return;
        }

        let Some(gallery) = &mut self.gallery else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                gallery.resize(size.width, size.height);
            }

            WindowEvent::RedrawRequested => {
                gallery.frame();
                match gallery.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost,
                    ) => {
                        gallery.reconfigure_surface();
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }

                self.frame_timing.end_frame();
                self.frames += 1;
                if self.frames % 300 == 0 {
                    log::debug!("fps: {:.0}", self.frame_timing.fps());
                }

                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_x = position.x as f32;
                gallery.handle_event(InputEvent::PointerMoved {
                    x: self.cursor_x,
                });
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if button != MouseButton::Left {
                    return;
                }
                let event = if state == ElementState::Pressed {
                    InputEvent::PointerDown { x: self.cursor_x }
                } else {
                    InputEvent::PointerUp
                };
                gallery.handle_event(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Wheel-toward-the-user advances the carousel; winit's y
                // is negative there, so flip the sign.
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        -(pos.y as f32) * 0.01
                    }
                };
                if delta != 0.0 {
                    gallery.handle_event(InputEvent::Scroll { delta });
                }
            }

            _ => (),
        }
    }
}
