//! Offscreen scene target and the fullscreen post-processing pass.

use crate::{
    error::Result,
    gfx::{
        resources::TextureResource,
        scene::mesh::Mesh,
        shader::ShaderProgram,
    },
    wgpu_utils::{self, UniformBuffer},
};

use super::{
    draw_target::DrawTarget,
    frame::FrameRecorder,
    pipeline_manager::{PipelineConfig, PipelineManager},
    uniforms::{PostEffect, PostUniforms},
};

/// Owns the image the scene is rendered into and draws it onto the surface
/// through the `post` program.
pub struct PostProcess {
    target: TextureResource,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniforms: UniformBuffer<PostUniforms>,
    effect: PostEffect,
    program: ShaderProgram,
    quad: Mesh,
    recorder: FrameRecorder,
}

impl PostProcess {
    pub fn new(
        device: &wgpu::Device,
        pipelines: &mut PipelineManager,
        width: u32,
        height: u32,
        surface_format: wgpu::TextureFormat,
        effect: PostEffect,
    ) -> Result<Self> {
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Post Bind Group Layout"),
            entries: &[
                wgpu_utils::entry(0, wgpu::ShaderStages::FRAGMENT, wgpu_utils::texture_2d()),
                wgpu_utils::entry(
                    1,
                    wgpu::ShaderStages::FRAGMENT,
                    wgpu_utils::sampler(wgpu::SamplerBindingType::Filtering),
                ),
                wgpu_utils::entry(2, wgpu::ShaderStages::FRAGMENT, wgpu_utils::uniform()),
            ],
        });

        let target = TextureResource::create_render_target(device, width, height, "Scene Colour Target");
        let uniforms = UniformBuffer::new_with_data(device, &PostUniforms::new(effect));
        let bind_group = Self::create_bind_group(device, &layout, &target, &uniforms);

        let program = ShaderProgram::post();
        pipelines.load_shader(program.name(), program.source())?;
        pipelines.register_pipeline(
            program.name(),
            PipelineConfig::default_with_shader(program.name())
                .with_label("Post Pipeline")
                .with_cull_mode(None)
                .with_color_format(surface_format)
                .with_bind_group_layouts(vec![layout.clone()])
                .with_vertex_buffers(vec![program.layout().buffer_layout()]),
        )?;

        let mut quad = Mesh::new("fullscreen quad");
        quad.initialize_fullscreen_quad(device);

        let mut recorder = FrameRecorder::new();
        recorder.bind_program(&program);
        quad.draw(&mut recorder);

        Ok(Self {
            target,
            layout,
            bind_group,
            uniforms,
            effect,
            program,
            quad,
            recorder,
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        target: &TextureResource,
        uniforms: &UniformBuffer<PostUniforms>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Post Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&target.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&target.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.binding_resource(),
                },
            ],
        })
    }

    /// View the scene pass renders into.
    pub fn target_view(&self) -> &wgpu::TextureView {
        &self.target.view
    }

    /// Recreates the offscreen target at the new surface size.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.target = TextureResource::create_render_target(device, width, height, "Scene Colour Target");
        self.bind_group = Self::create_bind_group(device, &self.layout, &self.target, &self.uniforms);
    }

    pub fn effect(&self) -> PostEffect {
        self.effect
    }

    pub fn set_effect(&mut self, queue: &wgpu::Queue, effect: PostEffect) {
        if effect != self.effect {
            log::info!("post effect: {}", effect.label());
        }
        self.effect = effect;
        self.uniforms.update_content(queue, PostUniforms::new(effect));
    }

    /// Draws the offscreen image onto `surface_view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        pipelines: &PipelineManager,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Post Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: surface_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let Some(pipeline) = pipelines.get_pipeline(self.program.name()) else {
            log::warn!("post pipeline missing; surface left blank");
            return;
        };

        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        for draw in self.recorder.draws() {
            pass.set_vertex_buffer(0, draw.mesh.vertex_buffer.slice(..));
            pass.draw(0..draw.mesh.element_count, 0..1);
        }
    }

    pub fn quad(&self) -> &Mesh {
        &self.quad
    }
}
