//! WGPU-based rendering engine
//!
//! Owns the device, surface and pipelines. A frame is composed on the CPU
//! into a [`FrameRecorder`] and replayed here: scene draws and gizmo lines go
//! into an offscreen target, which the post pass then draws onto the surface
//! before the UI overlay.

use std::{collections::HashMap, sync::Arc};

use cgmath::Matrix4;
use wgpu::TextureFormat;

use crate::{
    error::{LanternError, Result},
    gfx::{
        gizmos::{GizmoRenderer, Gizmos},
        resources::TextureResource,
        scene::vertex::VertexLayout,
        shader::ShaderProgram,
    },
    wgpu_utils::{self, DynamicUniformBuffer},
};

use super::{
    frame::FrameRecorder,
    pipeline_manager::{PipelineConfig, PipelineManager},
    post_process::PostProcess,
    uniforms::{DrawUniforms, PostEffect},
};

/// Per-draw uniform blocks allocated up front; grows on demand.
const INITIAL_DRAW_CAPACITY: usize = 64;

/// Startup options for [`RenderEngine::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub vsync: bool,
    pub clear_colour: [f32; 3],
    pub post_effect: PostEffect,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            clear_colour: [0.25, 0.25, 0.25],
            post_effect: PostEffect::Passthrough,
        }
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::Immediate
    }
}

fn to_wgpu_colour(colour: [f32; 3]) -> wgpu::Color {
    wgpu::Color {
        r: colour[0] as f64,
        g: colour[1] as f64,
        b: colour[2] as f64,
        a: 1.0,
    }
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    draw_layout: wgpu::BindGroupLayout,
    draw_uniforms: DynamicUniformBuffer<DrawUniforms>,
    linked_layouts: HashMap<String, VertexLayout>,
    gizmo_renderer: GizmoRenderer,
    post_process: PostProcess,
    clear_colour: wgpu::Color,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `settings` - Present mode, clear colour and initial post effect
    ///
    /// # Errors
    /// Fails when no surface, adapter or device can be acquired, or when a
    /// built-in shader does not validate.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        settings: RenderSettings,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(LanternError::NoSurfaceFormat)?;
        log::info!("surface format: {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(settings.vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let draw_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Draw Uniform Layout"),
            entries: &[wgpu_utils::entry(
                0,
                wgpu::ShaderStages::VERTEX_FRAGMENT,
                wgpu_utils::uniform_dynamic::<DrawUniforms>(),
            )],
        });
        let draw_uniforms = DynamicUniformBuffer::new(&device, &draw_layout, INITIAL_DRAW_CAPACITY);

        let device_handle: Arc<wgpu::Device> = Arc::new(device);
        let queue_handle: Arc<wgpu::Queue> = Arc::new(queue);
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        let gizmo_renderer = GizmoRenderer::new(&device_handle, &mut pipeline_manager)?;
        let post_process = PostProcess::new(
            &device_handle,
            &mut pipeline_manager,
            config.width,
            config.height,
            format,
            settings.post_effect,
        )?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            format,
            pipeline_manager,
            draw_layout,
            draw_uniforms,
            linked_layouts: HashMap::new(),
            gizmo_renderer,
            post_process,
            clear_colour: to_wgpu_colour(settings.clear_colour),
        })
    }

    /// Compiles `program` and creates its scene pipeline.
    ///
    /// Linking a program under a name that is already linked replaces it.
    pub fn link(&mut self, program: &ShaderProgram) -> Result<()> {
        self.pipeline_manager.load_shader(program.name(), program.source())?;
        self.pipeline_manager.register_pipeline(
            program.name(),
            PipelineConfig::default_with_shader(program.name())
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(TextureResource::SCENE_COLOUR_FORMAT)
                .with_bind_group_layouts(vec![self.draw_layout.clone()])
                .with_vertex_buffers(vec![program.layout().buffer_layout()]),
        )?;
        self.linked_layouts
            .insert(program.name().to_owned(), program.layout());
        log::info!("linked shader program '{}'", program.name());
        Ok(())
    }

    /// Renders one frame: the recorded scene draws and gizmos, the post pass,
    /// then the optional UI overlay.
    ///
    /// # Errors
    /// Returns the surface error when no surface texture could be acquired;
    /// nothing is drawn in that case.
    pub fn render_frame<F>(
        &mut self,
        frame: &FrameRecorder,
        gizmos: &Gizmos,
        projection_view: Matrix4<f32>,
        ui_callback: Option<F>,
    ) -> std::result::Result<(), wgpu::SurfaceError>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView),
    {
        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let blocks: Vec<DrawUniforms> = frame.draws().iter().map(|draw| draw.uniforms).collect();
        self.draw_uniforms
            .write(&self.device, &self.queue, &self.draw_layout, &blocks);
        self.gizmo_renderer
            .prepare(&self.device, &self.queue, gizmos, projection_view);

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: scene and gizmos into the offscreen target
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.post_process.target_view(),
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_colour),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for (index, draw) in frame.draws().iter().enumerate() {
                let Some(pipeline) = self.pipeline_manager.get_pipeline(&draw.program) else {
                    log::warn!("program '{}' is not linked; draw skipped", draw.program);
                    continue;
                };
                if self.linked_layouts.get(&draw.program) != Some(&draw.mesh.layout) {
                    log::warn!(
                        "mesh layout {:?} does not match program '{}'; draw skipped",
                        draw.mesh.layout,
                        draw.program
                    );
                    continue;
                }

                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.draw_uniforms.bind_group(), &[self.draw_uniforms.offset(index)]);
                render_pass.set_vertex_buffer(0, draw.mesh.vertex_buffer.slice(..));
                match &draw.mesh.index_buffer {
                    Some(index_buffer) => {
                        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                        render_pass.draw_indexed(0..draw.mesh.element_count, 0, 0..1);
                    }
                    None => render_pass.draw(0..draw.mesh.element_count, 0..1),
                }
            }

            self.gizmo_renderer
                .render(&mut render_pass, &self.pipeline_manager);
        }

        // PASS 2: post-process onto the surface
        self.post_process
            .render(&mut encoder, &surface_texture_view, &self.pipeline_manager);

        // PASS 3: UI overlay (if provided)
        if let Some(ui_callback) = ui_callback {
            ui_callback(&self.device, &self.queue, &mut encoder, &surface_texture_view);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer and offscreen
    /// target. Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        log::debug!("resizing surface to {}x{}", width, height);
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reconfigures the surface at its current size; used after the surface
    /// reports it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        self.post_process
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns reference to the wgpu device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns reference to the wgpu command queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the surface texture format
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }

    pub fn post_effect(&self) -> PostEffect {
        self.post_process.effect()
    }

    pub fn set_post_effect(&mut self, effect: PostEffect) {
        self.post_process.set_effect(&self.queue, effect);
    }

    pub fn set_clear_colour(&mut self, colour: [f32; 3]) {
        self.clear_colour = to_wgpu_colour(colour);
    }

    /// Set VSync (vertical synchronization) state
    pub fn set_vsync(&mut self, enable: bool) {
        self.config.present_mode = present_mode(enable);
        self.surface.configure(&self.device, &self.config);
    }
}
