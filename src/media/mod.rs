//! Media items: one curve-deformed textured plane per gallery entry,
//! with an optional rasterized label hanging underneath.
//!
//! The math lives in [`layout`]; this module owns the GPU side: scene
//! nodes, per-item uniform buffers, bind groups, and the texture swap
//! when a decode lands.

/// Pure per-item layout math.
pub mod layout;
pub(crate) mod loader;

use wgpu::util::DeviceExt;

use crate::camera::{ScreenSize, WorldViewport};
use crate::gpu::texture::ImageTexture;
use crate::scene::{NodeId, SceneGraph};
use crate::scroll::{ScrollDirection, ScrollState};
use crate::text::TextRasterizer;
use self::layout::ItemLayout;

/// Per-frame advance of the ripple time uniform.
const TIME_STEP: f32 = 0.04;
/// Label world height as a fraction of the plane height.
const LABEL_HEIGHT_FRACTION: f32 = 0.15;
/// Gap between the plane's bottom edge and the label, world units.
const LABEL_GAP: f32 = 0.05;

/// Per-plane shader uniforms. Layout must match `media.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MediaUniform {
    /// World transform of the plane.
    pub model: [[f32; 4]; 4],
    /// Plane size in world units (letterbox ratio input).
    pub plane_size: [f32; 2],
    /// Source image size in pixels; zero until the decode lands.
    pub image_size: [f32; 2],
    /// Corner radius as a fraction of the unit quad (0–0.5).
    pub border_radius: f32,
    /// Ripple phase, advanced a fixed step per frame.
    pub time: f32,
    /// Scroll distance covered last frame.
    pub speed: f32,
    /// Padding for GPU alignment.
    pub(crate) _pad: f32,
}

/// Label quad shader uniforms. Layout must match `label.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LabelUniform {
    /// World transform of the label quad.
    pub model: [[f32; 4]; 4],
}

/// GPU state for one label: its scene node, bitmap aspect, and bindings.
struct Label {
    node: NodeId,
    /// Bitmap width / height, preserved when scaling to the plane.
    aspect: f32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    // Kept alive for the bind group's sake.
    _texture: ImageTexture,
}

/// One gallery entry: plane node, texture, uniforms, optional label.
pub struct MediaItem {
    layout: ItemLayout,
    plane: NodeId,
    label: Option<Label>,
    uniform: MediaUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    texture: ImageTexture,
}

fn bind_textured_quad(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::BindGroupLayout,
    uniform_buffer: &wgpu::Buffer,
    texture: &ImageTexture,
    sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

impl MediaItem {
    /// Create the item at slot `index` of the doubled list.
    ///
    /// The plane starts on the placeholder texture; `label_text` is
    /// rasterized immediately when a rasterizer is available.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        scene: &mut SceneGraph,
        index: usize,
        count: usize,
        bend: f32,
        border_radius: f32,
        label_text: &str,
        rasterizer: Option<&TextRasterizer>,
    ) -> Self {
        let plane = scene.add_node(None);

        let uniform = MediaUniform {
            model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            plane_size: [0.0, 0.0],
            image_size: [0.0, 0.0],
            border_radius,
            // De-phase the ripple between items.
            time: (index as f32 * 37.0) % 100.0,
            speed: 0.0,
            _pad: 0.0,
        };
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("Media {index} Uniforms")),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let texture = ImageTexture::placeholder(device, queue);
        let bind_group = bind_textured_quad(
            device,
            &format!("Media {index}"),
            bind_layout,
            &uniform_buffer,
            &texture,
            sampler,
        );

        let label = rasterizer.map(|r| {
            let bitmap = r.rasterize(label_text);
            let aspect = bitmap.width as f32 / bitmap.height.max(1) as f32;
            let texture = ImageTexture::from_rgba(
                device,
                queue,
                &format!("Label {index}"),
                &bitmap.rgba,
                bitmap.width,
                bitmap.height,
            );
            let label_uniform = LabelUniform {
                model: glam::Mat4::IDENTITY.to_cols_array_2d(),
            };
            let uniform_buffer = device.create_buffer_init(
                &wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Label {index} Uniforms")),
                    contents: bytemuck::cast_slice(&[label_uniform]),
                    usage: wgpu::BufferUsages::UNIFORM
                        | wgpu::BufferUsages::COPY_DST,
                },
            );
            let bind_group = bind_textured_quad(
                device,
                &format!("Label {index}"),
                bind_layout,
                &uniform_buffer,
                &texture,
                sampler,
            );
            Label {
                node: scene.add_node(Some(plane)),
                aspect,
                uniform_buffer,
                bind_group,
                _texture: texture,
            }
        });

        Self {
            layout: ItemLayout::new(index, count, bend),
            plane,
            label,
            uniform,
            uniform_buffer,
            bind_group,
            texture,
        }
    }

    /// Recompute world sizes and re-fit plane and label nodes.
    pub fn on_resize(
        &mut self,
        screen: ScreenSize,
        viewport: WorldViewport,
        scene: &mut SceneGraph,
    ) {
        self.layout.resize(screen, viewport);
        let width = self.layout.width();
        let height = self.layout.height();
        self.uniform.plane_size = [width, height];

        scene.node_mut(self.plane).scale = glam::Vec3::new(width, height, 1.0);

        // A zero-size surface (pre-first-resize) leaves the label where
        // it was rather than dividing by a degenerate plane size.
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        if let Some(ref label) = self.label {
            // The label node is a child of the scaled plane, so its
            // local transform is expressed in plane-sized units and
            // divided back out here to land at the intended world size:
            // 15% of the plane height, hanging just under the bottom
            // edge.
            let world_h = height * LABEL_HEIGHT_FRACTION;
            let world_w = world_h * label.aspect;
            let node = scene.node_mut(label.node);
            node.scale =
                glam::Vec3::new(world_w / width, world_h / height, 1.0);
            node.position = glam::Vec3::new(
                0.0,
                -0.5 - (world_h / 2.0 + LABEL_GAP) / height,
                0.0,
            );
        }
    }

    /// Advance one frame: place the plane from the eased scroll and step
    /// the shader uniforms.
    pub fn update(
        &mut self,
        scroll: &ScrollState,
        direction: ScrollDirection,
        scene: &mut SceneGraph,
    ) {
        let placement = self.layout.update(scroll.current, direction);
        let node = scene.node_mut(self.plane);
        node.position = glam::Vec3::new(placement.x, placement.y, 0.0);
        node.rotation_z = placement.rotation_z;

        self.uniform.time += TIME_STEP;
        self.uniform.speed = scroll.frame_delta();
    }

    /// Push this frame's uniforms (with world matrices from the scene's
    /// recompute pass) to the GPU.
    pub fn upload(&mut self, queue: &wgpu::Queue, scene: &SceneGraph) {
        self.uniform.model = scene.world_matrix(self.plane).to_cols_array_2d();
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );

        if let Some(ref label) = self.label {
            let label_uniform = LabelUniform {
                model: scene.world_matrix(label.node).to_cols_array_2d(),
            };
            queue.write_buffer(
                &label.uniform_buffer,
                0,
                bytemuck::cast_slice(&[label_uniform]),
            );
        }
    }

    /// Swap in a decoded image: upload the texture, rebuild the bind
    /// group, publish the pixel size to the letterbox uniform.
    pub fn apply_image(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bind_layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        rgba: &[u8],
        width: u32,
        height: u32,
    ) {
        self.texture =
            ImageTexture::from_rgba(device, queue, "Media Image", rgba, width, height);
        self.bind_group = bind_textured_quad(
            device,
            "Media",
            bind_layout,
            &self.uniform_buffer,
            &self.texture,
            sampler,
        );
        self.uniform.image_size = [width as f32, height as f32];
    }

    /// The snap slot width (plane width plus padding).
    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.layout.spacing()
    }

    /// Bind group for the plane draw.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Bind group for the label draw, when the item has a label.
    #[must_use]
    pub fn label_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.label.as_ref().map(|l| &l.bind_group)
    }
}
