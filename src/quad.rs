use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 1, 2, 3];

/// Corners of a square centered on the origin: top left, top right, bottom
/// left, bottom right.
pub fn quad_vertices(half_extent: Vec2) -> [Vertex; 4] {
    let Vec2 { x, y } = half_extent;
    [
        Vertex { position: [-x, y, 0.0] },
        Vertex { position: [x, y, 0.0] },
        Vertex { position: [-x, -y, 0.0] },
        Vertex { position: [x, -y, 0.0] },
    ]
}

/// The single square every cell is drawn with, moved into place per draw.
pub struct QuadData {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl QuadData {
    pub fn create(device: &wgpu::Device, half_extent: Vec2) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cell Quad Vertices"),
            contents: bytemuck::cast_slice(&quad_vertices(half_extent)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cell Quad Indices"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            num_indices: QUAD_INDICES.len() as u32,
        }
    }
}
