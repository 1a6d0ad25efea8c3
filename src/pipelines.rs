use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::{
    config::Palette,
    layout::GridLayout,
    quad::{QuadData, Vertex},
    shaders::ShaderImportProcessor,
    simulation::{CellSprite, CellVisual},
    LifeError,
};

/// Uploaded before each cell is drawn. Must match `CellConstants` in
/// `assets/shaders/common/cell_constants.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct CellPushConstants {
    color: [f32; 4],
    offset: [f32; 2],
    _padding: [f32; 2],
}

impl CellPushConstants {
    pub fn new(color: [f32; 4], offset: Vec2) -> Self {
        Self {
            color,
            offset: offset.to_array(),
            _padding: [0.0; 2],
        }
    }

    pub fn for_sprite(sprite: &CellSprite, layout: &GridLayout, palette: &Palette) -> Self {
        let color = match sprite.visual {
            CellVisual::Hovered => palette.hovered,
            CellVisual::Alive => palette.alive,
            CellVisual::Dead => palette.dead,
        };
        Self::new(color, layout.to_ndc(sprite.center))
    }
}

const PUSH_CONSTANT_STAGES: wgpu::ShaderStages = wgpu::ShaderStages::VERTEX_FRAGMENT;

/// Draws one cell per draw call with the shared quad.
pub struct CellPipeline {
    pipeline: wgpu::RenderPipeline,
}

impl CellPipeline {
    pub fn load(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, LifeError> {
        let cell_shader =
            ShaderImportProcessor::default().load_shader(device, "cell.wgsl", Some("cell_shader"))?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cell Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[wgpu::PushConstantRange {
                stages: PUSH_CONSTANT_STAGES,
                range: 0..std::mem::size_of::<CellPushConstants>() as u32,
            }],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cell Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &cell_shader,
                entry_point: "vs_main",
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &cell_shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Ok(Self { pipeline })
    }

    pub fn draw<'r>(
        &'r self,
        rpass: &mut wgpu::RenderPass<'r>,
        quad: &'r QuadData,
        constants: impl Iterator<Item = CellPushConstants>,
    ) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_vertex_buffer(0, quad.vertex_buffer.slice(..));
        rpass.set_index_buffer(quad.index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for pc in constants {
            rpass.set_push_constants(PUSH_CONSTANT_STAGES, 0, bytemuck::cast_slice(&[pc]));
            rpass.draw_indexed(0..quad.num_indices, 0, 0..1);
        }
    }
}
