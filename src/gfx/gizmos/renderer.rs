//! GPU line renderer for [`Gizmos`].

use cgmath::Matrix4;

use crate::{
    error::Result,
    gfx::{
        resources::TextureResource,
        rendering::{
            pipeline_manager::{PipelineConfig, PipelineManager},
            uniforms::GizmoUniforms,
        },
        shader::sources,
        transform::matrix_to_array,
    },
    wgpu_utils::{self, UniformBuffer},
};

use super::primitives::{GizmoVertex, Gizmos};

/// Pipeline name the gizmo lines are drawn with.
pub const GIZMO_PIPELINE: &str = "gizmo";

const INITIAL_VERTEX_CAPACITY: usize = 1024;

/// Uploads the frame's gizmo lines and draws them inside the scene pass.
pub struct GizmoRenderer {
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    vertex_count: u32,
    uniforms: UniformBuffer<GizmoUniforms>,
    bind_group: wgpu::BindGroup,
}

impl GizmoRenderer {
    /// Creates the renderer and registers the `gizmo` line-list pipeline,
    /// depth tested against the scene's depth buffer.
    pub fn new(device: &wgpu::Device, pipelines: &mut PipelineManager) -> Result<Self> {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Gizmo Bind Group Layout"),
            entries: &[wgpu_utils::entry(
                0,
                wgpu::ShaderStages::VERTEX,
                wgpu_utils::uniform(),
            )],
        });

        let uniforms = UniformBuffer::new_with_data(
            device,
            &GizmoUniforms {
                projection_view: [[0.0; 4]; 4],
            },
        );

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Gizmo Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniforms.binding_resource(),
            }],
        });

        pipelines.load_shader(GIZMO_PIPELINE, sources::GIZMO)?;
        pipelines.register_pipeline(
            GIZMO_PIPELINE,
            PipelineConfig::default_with_shader(GIZMO_PIPELINE)
                .with_label("Gizmo Pipeline")
                .with_primitive_topology(wgpu::PrimitiveTopology::LineList)
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(TextureResource::SCENE_COLOUR_FORMAT)
                .with_bind_group_layouts(vec![layout])
                .with_vertex_buffers(vec![GizmoVertex::desc()]),
        )?;

        Ok(Self {
            vertex_buffer: Self::create_vertex_buffer(device, INITIAL_VERTEX_CAPACITY),
            vertex_capacity: INITIAL_VERTEX_CAPACITY,
            vertex_count: 0,
            uniforms,
            bind_group,
        })
    }

    fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Gizmo Vertex Buffer"),
            size: (capacity * std::mem::size_of::<GizmoVertex>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Uploads this frame's line vertices and camera matrix.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        gizmos: &Gizmos,
        projection_view: Matrix4<f32>,
    ) {
        let vertices = gizmos.line_vertices();
        self.vertex_count = vertices.len() as u32;
        if vertices.is_empty() {
            return;
        }

        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            log::debug!("growing gizmo vertex buffer to {} vertices", self.vertex_capacity);
            self.vertex_buffer = Self::create_vertex_buffer(device, self.vertex_capacity);
        }

        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));
        self.uniforms.update_content(
            queue,
            GizmoUniforms {
                projection_view: matrix_to_array(&projection_view),
            },
        );
    }

    /// Draws the lines uploaded by the last [`prepare`](Self::prepare).
    pub fn render(&self, pass: &mut wgpu::RenderPass<'_>, pipelines: &PipelineManager) {
        if self.vertex_count == 0 {
            return;
        }
        let Some(pipeline) = pipelines.get_pipeline(GIZMO_PIPELINE) else {
            log::warn!("gizmo pipeline missing; skipping {} vertices", self.vertex_count);
            return;
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
