//! The gallery controller: owns the scroll state machine, the media
//! collection, the scene graph, and the render pipelines, and advances
//! them one frame at a time.
//!
//! The controller does not own a frame loop: whoever hosts it (the
//! winit [`Viewer`](crate::viewer::Viewer), an embedding engine) calls
//! [`Gallery::frame`] and [`Gallery::render`] every tick and feeds input
//! through [`Gallery::handle_event`]. That keeps the control flow
//! synchronous and every gesture injectable from tests.

use std::borrow::Cow;

use web_time::{Duration, Instant};
use wgpu::util::DeviceExt;

use crate::camera::{Camera, CameraUniform, ScreenSize};
use crate::config::GalleryConfig;
use crate::error::GalleriaError;
use crate::gpu::mesh::PlaneMesh;
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture;
use crate::input::{DebounceTimer, InputEvent};
use crate::media::loader::ImageLoader;
use crate::media::MediaItem;
use crate::scene::SceneGraph;
use crate::scroll::Scroller;
use crate::text::TextRasterizer;

/// Quiet period after the last wheel event before the snap check runs.
const WHEEL_DEBOUNCE: Duration = Duration::from_millis(200);
/// Ripple resolution of the plane grid.
const PLANE_SEGMENTS: (u32, u32) = (100, 50);

/// An infinite curved image carousel bound to one drawing surface.
///
/// Constructed with [`Gallery::new`], driven with
/// [`handle_event`](Self::handle_event) / [`frame`](Self::frame) /
/// [`render`](Self::render), and torn down with
/// [`destroy`](Self::destroy) (idempotent, also run on drop).
pub struct Gallery {
    context: RenderContext,
    camera: Camera,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    item_layout: wgpu::BindGroupLayout,
    media_pipeline: wgpu::RenderPipeline,
    label_pipeline: wgpu::RenderPipeline,
    plane_mesh: PlaneMesh,
    label_mesh: PlaneMesh,
    sampler: wgpu::Sampler,
    scene: SceneGraph,
    scroller: Scroller,
    snap_debounce: DebounceTimer,
    items: Vec<MediaItem>,
    loader: Option<ImageLoader>,
    screen: ScreenSize,
    destroyed: bool,
}

impl Gallery {
    /// Build a gallery over the given surface target.
    ///
    /// The item list from `config` is duplicated internally so the
    /// wraparound always has a full second row to pull from. Image
    /// decoding starts in the background immediately; label fonts are
    /// resolved here (failure means no labels, not no gallery).
    ///
    /// # Errors
    ///
    /// Returns [`GalleriaError::Gpu`] when no drawing context can be
    /// acquired, the only fatal construction failure.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
        config: &GalleryConfig,
    ) -> Result<Self, GalleriaError> {
        let context = RenderContext::new(window, initial_size).await?;
        let device = &context.device;

        let screen = ScreenSize {
            width: initial_size.0,
            height: initial_size.1,
        };
        let mut camera = Camera::new();
        camera.set_aspect(screen);
        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let camera_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Layout"),
                entries: &[pipeline_helpers::uniform_buffer(0)],
            },
        );
        let camera_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &camera_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                }],
            });

        let item_layout = device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Item Layout"),
                entries: &[
                    pipeline_helpers::uniform_buffer(0),
                    pipeline_helpers::texture_2d(1),
                    pipeline_helpers::filtering_sampler(2),
                ],
            },
        );

        let media_shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Media Shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(
                    include_str!("../assets/shaders/media.wgsl"),
                )),
            });
        let label_shader =
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Label Shader"),
                source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(
                    include_str!("../assets/shaders/label.wgsl"),
                )),
            });
        let media_pipeline = pipeline_helpers::create_plane_pipeline(
            device,
            "Media",
            &media_shader,
            context.format(),
            &[&camera_layout, &item_layout],
        );
        let label_pipeline = pipeline_helpers::create_plane_pipeline(
            device,
            "Label",
            &label_shader,
            context.format(),
            &[&camera_layout, &item_layout],
        );

        let plane_mesh = PlaneMesh::new(
            device,
            "Media Plane",
            PLANE_SEGMENTS.0,
            PLANE_SEGMENTS.1,
        );
        let label_mesh = PlaneMesh::new(device, "Label Quad", 1, 1);
        let sampler = texture::linear_sampler(device, "Item Sampler");

        let rasterizer = config.font.resolve_bytes().and_then(|bytes| {
            match TextRasterizer::new(
                &bytes,
                config.font.size_px,
                config.text_color,
            ) {
                Ok(r) => Some(r),
                Err(e) => {
                    log::warn!("label font unavailable: {e}");
                    None
                }
            }
        });
        if rasterizer.is_none() && !config.items.is_empty() {
            log::warn!("no usable label font; rendering without labels");
        }

        // Double the list so a second row is always waiting off-screen.
        let entries: Vec<_> =
            config.items.iter().chain(config.items.iter()).collect();
        let mut scene = SceneGraph::new();
        let items: Vec<MediaItem> = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                MediaItem::new(
                    device,
                    &context.queue,
                    &item_layout,
                    &sampler,
                    &mut scene,
                    index,
                    entries.len(),
                    config.bend,
                    config.border_radius,
                    &entry.label,
                    rasterizer.as_ref(),
                )
            })
            .collect();

        let jobs: Vec<_> = entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry.image.as_ref().map(|path| (index, path.clone()))
            })
            .collect();
        let loader = if jobs.is_empty() {
            None
        } else {
            ImageLoader::spawn(jobs)
        };

        log::info!(
            "gallery up: {} items ({} doubled), {}x{}",
            config.items.len(),
            items.len(),
            screen.width,
            screen.height
        );

        let mut gallery = Self {
            context,
            camera,
            camera_uniform,
            camera_buffer,
            camera_bind_group,
            item_layout,
            media_pipeline,
            label_pipeline,
            plane_mesh,
            label_mesh,
            sampler,
            scene,
            scroller: Scroller::new(config.scroll_speed, config.scroll_ease),
            snap_debounce: DebounceTimer::new(WHEEL_DEBOUNCE),
            items,
            loader,
            screen,
            destroyed: false,
        };
        gallery.fit_items();
        Ok(gallery)
    }

    /// Feed one input event into the scroll state machine.
    pub fn handle_event(&mut self, event: InputEvent) {
        if self.destroyed {
            return;
        }
        match event {
            InputEvent::PointerDown { x } => self.scroller.pointer_down(x),
            InputEvent::PointerMoved { x } => {
                let _ = self.scroller.pointer_move(x);
            }
            InputEvent::PointerUp => {
                if self.scroller.pointer_up() {
                    self.snap();
                }
            }
            InputEvent::Scroll { delta } => {
                self.scroller.wheel(delta);
                self.snap_debounce.rearm(Instant::now());
            }
        }
    }

    /// Advance one frame: apply finished decodes, run the debounced snap
    /// check, ease the scroll, re-place every item, and rebuild world
    /// matrices.
    pub fn frame(&mut self) {
        if self.destroyed {
            return;
        }

        self.apply_loaded_images();

        if self.snap_debounce.fire(Instant::now()) {
            self.snap();
        }

        let direction = self.scroller.state.ease_step();
        for item in &mut self.items {
            item.update(&self.scroller.state, direction, &mut self.scene);
        }
        self.scene.update_world_transforms();
        for item in &mut self.items {
            item.upload(&self.context.queue, &self.scene);
        }
        self.scroller.state.end_frame();
    }

    /// Draw the frame: one render pass, planes back-to-front in list
    /// order, then labels.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] when the swapchain cannot provide
    /// a texture; the caller reconfigures on `Lost`/`Outdated` and
    /// carries on (frame errors must never halt the loop).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.destroyed {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Gallery Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    wgpu::Color::TRANSPARENT,
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

            pass.set_bind_group(0, &self.camera_bind_group, &[]);

            pass.set_pipeline(&self.media_pipeline);
            for item in &self.items {
                pass.set_bind_group(1, item.bind_group(), &[]);
                self.plane_mesh.draw(&mut pass);
            }

            pass.set_pipeline(&self.label_pipeline);
            for item in &self.items {
                if let Some(bind_group) = item.label_bind_group() {
                    pass.set_bind_group(1, bind_group, &[]);
                    self.label_mesh.draw(&mut pass);
                }
            }
        }
        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Reconfigure for a new pixel size and re-fit every item.
    /// Zero-sized boxes leave the surface alone and fall back to a 1:1
    /// aspect until a valid size arrives.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.destroyed {
            return;
        }
        self.context.resize(width, height);
        self.screen = ScreenSize { width, height };
        self.camera.set_aspect(self.screen);
        self.camera_uniform.update_view_proj(&self.camera);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        self.fit_items();
        log::debug!(
            "resize: {width}x{height}, viewport {:?}",
            self.camera.world_viewport()
        );
    }

    /// Re-apply the current surface configuration after a
    /// `Lost`/`Outdated` frame.
    pub fn reconfigure_surface(&self) {
        self.context.reconfigure();
    }

    /// Tear the gallery down: cancel the pending snap timer, stop
    /// accepting decodes, release the drawing surface. Safe to call any
    /// number of times; runs on drop as well.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.snap_debounce.cancel();
        self.loader = None;
        self.context.release_surface();
        log::debug!("gallery destroyed");
    }

    /// Whether [`destroy`](Self::destroy) has run.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn fit_items(&mut self) {
        let viewport = self.camera.world_viewport();
        for item in &mut self.items {
            item.on_resize(self.screen, viewport, &mut self.scene);
        }
    }

    /// Round the scroll target to the nearest item slot.
    fn snap(&mut self) {
        let Some(first) = self.items.first() else {
            return;
        };
        self.scroller.snap_to_slot(first.spacing());
    }

    fn apply_loaded_images(&mut self) {
        let Some(ref loader) = self.loader else {
            return;
        };
        let ready = loader.drain();
        for img in ready {
            if let Some(item) = self.items.get_mut(img.index) {
                item.apply_image(
                    &self.context.device,
                    &self.context.queue,
                    &self.item_layout,
                    &self.sampler,
                    &img.rgba,
                    img.width,
                    img.height,
                );
            }
        }
    }
}

impl Drop for Gallery {
    fn drop(&mut self) {
        self.destroy();
    }
}
