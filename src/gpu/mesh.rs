//! Plane geometry: a unit quad subdivided into a grid so the vertex
//! shader has enough vertices to ripple.

use wgpu::util::DeviceExt;

/// One mesh vertex: position in the unit quad plus texture coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in [−0.5, 0.5]² on the z = 0 plane.
    pub position: [f32; 3],
    /// Texture coordinate; v = 0 at the top edge.
    pub uv: [f32; 2],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

impl Vertex {
    /// Vertex buffer layout matching the shaders' `@location` inputs.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &VERTEX_ATTRS,
        }
    }
}

/// An uploaded plane: vertex buffer, index buffer, index count.
pub struct PlaneMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl PlaneMesh {
    /// Build and upload a unit plane subdivided into
    /// `width_segments × height_segments` cells.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        width_segments: u32,
        height_segments: u32,
    ) -> Self {
        let (vertices, indices) =
            plane_grid(width_segments, height_segments);

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    /// Set buffers and draw the whole plane. Caller binds pipeline and
    /// bind groups first.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Generate the grid: `(segments_x + 1) × (segments_y + 1)` vertices,
/// two triangles per cell. Row 0 is the top edge (v = 0) so images read
/// top-first map upright.
fn plane_grid(segments_x: u32, segments_y: u32) -> (Vec<Vertex>, Vec<u32>) {
    let cols = segments_x + 1;
    let rows = segments_y + 1;
    let mut vertices = Vec::with_capacity((cols * rows) as usize);
    for row in 0..rows {
        let v = row as f32 / segments_y as f32;
        for col in 0..cols {
            let u = col as f32 / segments_x as f32;
            vertices.push(Vertex {
                position: [u - 0.5, 0.5 - v, 0.0],
                uv: [u, v],
            });
        }
    }

    let mut indices =
        Vec::with_capacity((segments_x * segments_y * 6) as usize);
    for row in 0..segments_y {
        for col in 0..segments_x {
            let top_left = row * cols + col;
            let top_right = top_left + 1;
            let bottom_left = top_left + cols;
            let bottom_right = bottom_left + 1;
            indices.extend_from_slice(&[
                top_left,
                bottom_left,
                top_right,
                top_right,
                bottom_left,
                bottom_right,
            ]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_match_segments() {
        let (vertices, indices) = plane_grid(100, 50);
        assert_eq!(vertices.len(), 101 * 51);
        assert_eq!(indices.len(), 100 * 50 * 6);
    }

    #[test]
    fn grid_spans_the_unit_quad() {
        let (vertices, _) = plane_grid(2, 2);
        let min_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::INFINITY, f32::min);
        let max_y = vertices
            .iter()
            .map(|v| v.position[1])
            .fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_x, -0.5);
        assert_eq!(max_y, 0.5);
    }

    #[test]
    fn top_edge_has_v_zero() {
        let (vertices, _) = plane_grid(1, 1);
        for v in &vertices {
            if v.position[1] == 0.5 {
                assert_eq!(v.uv[1], 0.0);
            }
        }
    }
}
