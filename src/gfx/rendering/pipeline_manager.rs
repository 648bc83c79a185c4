//! Render pipeline management for wgpu
//!
//! Shader modules and pipelines are created eagerly inside a validation error
//! scope, so a broken WGSL program is reported as a [`LanternError`] at link
//! time instead of surfacing as a panic on the first frame.

use std::{collections::HashMap, sync::Arc};
use wgpu::*;

use crate::error::{LanternError, Result};

/// Configuration for creating a render pipeline
///
/// Defines all parameters needed to create a wgpu render pipeline,
/// including shaders, bind group layouts, and render state.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub label: String,
    pub shader: String,
    pub bind_group_layouts: Vec<BindGroupLayout>,
    pub primitive_topology: PrimitiveTopology,
    pub cull_mode: Option<Face>,
    pub depth_format: Option<TextureFormat>,
    pub multisample: MultisampleState,
    pub color_targets: Vec<Option<ColorTargetState>>,
    pub vertex_buffers: Vec<VertexBufferLayout<'static>>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            label: "Default Pipeline".to_string(),
            shader: "shader".to_string(),
            bind_group_layouts: Vec::new(),
            primitive_topology: PrimitiveTopology::TriangleList,
            cull_mode: Some(Face::Back),
            depth_format: None,
            multisample: MultisampleState::default(),
            color_targets: vec![Some(ColorTargetState {
                format: TextureFormat::Bgra8Unorm,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            vertex_buffers: Vec::new(),
        }
    }
}

impl PipelineConfig {
    /// Creates a new config with a specific shader
    ///
    /// # Arguments
    /// * `shader` - Shader identifier to use for this pipeline
    pub fn default_with_shader(shader: &str) -> Self {
        Self {
            label: format!("{} Pipeline", shader),
            shader: shader.to_string(),
            ..Default::default()
        }
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn with_cull_mode(mut self, face: Option<Face>) -> Self {
        self.cull_mode = face;
        self
    }

    /// Sets the shader for this pipeline (builder pattern)
    pub fn with_shader(mut self, shader: &str) -> Self {
        self.shader = shader.to_string();
        self
    }

    /// Sets all bind group layouts at once (builder pattern)
    ///
    /// # Arguments
    /// * `layouts` - Vector of bind group layouts to use
    pub fn with_bind_group_layouts(mut self, layouts: Vec<BindGroupLayout>) -> Self {
        self.bind_group_layouts = layouts;
        self
    }

    /// Enables depth testing against an attachment of `format`
    pub fn with_depth_format(mut self, format: TextureFormat) -> Self {
        self.depth_format = Some(format);
        self
    }

    /// Sets color targets for this pipeline (builder pattern)
    ///
    /// # Arguments
    /// * `targets` - Vector of color target states
    pub fn with_color_targets(mut self, targets: Vec<Option<ColorTargetState>>) -> Self {
        self.color_targets = targets;
        self
    }

    /// Single colour target of `format` with replace blending
    pub fn with_color_format(self, format: TextureFormat) -> Self {
        self.with_color_targets(vec![Some(ColorTargetState {
            format,
            blend: Some(BlendState::REPLACE),
            write_mask: ColorWrites::ALL,
        })])
    }

    /// Sets primitive topology for this pipeline (builder pattern)
    ///
    /// # Arguments
    /// * `topology` - Primitive topology (TriangleList, LineList, etc.)
    pub fn with_primitive_topology(mut self, topology: PrimitiveTopology) -> Self {
        self.primitive_topology = topology;
        self
    }

    /// Sets the vertex buffer layouts the vertex stage reads
    pub fn with_vertex_buffers(mut self, buffers: Vec<VertexBufferLayout<'static>>) -> Self {
        self.vertex_buffers = buffers;
        self
    }
}

/// Manages render pipelines and the shader modules they are built from
///
/// Pipelines are created as soon as they are registered and looked up by name
/// afterwards. Registering under an existing name replaces the pipeline.
pub struct PipelineManager {
    device: Arc<Device>,
    pipelines: HashMap<String, RenderPipeline>,
    shader_modules: HashMap<String, ShaderModule>,
}

impl PipelineManager {
    /// Creates a new pipeline manager
    ///
    /// # Arguments
    /// * `device` - Shared wgpu device for creating resources
    pub fn new(device: Arc<Device>) -> Self {
        Self {
            device,
            pipelines: HashMap::new(),
            shader_modules: HashMap::new(),
        }
    }

    /// Runs `create` inside a validation error scope and reports any captured
    /// error against `name`.
    fn validated<T>(&self, name: &str, create: impl FnOnce(&Device) -> T) -> Result<T> {
        self.device.push_error_scope(ErrorFilter::Validation);
        let value = create(&self.device);
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(LanternError::ShaderLink {
                name: name.to_string(),
                message: error.to_string(),
            }),
            None => Ok(value),
        }
    }

    /// Loads and compiles a shader module
    ///
    /// # Arguments
    /// * `name` - Shader identifier
    /// * `source` - WGSL shader source code
    ///
    /// # Errors
    /// [`LanternError::ShaderLink`] when the source fails validation.
    pub fn load_shader(&mut self, name: &str, source: &str) -> Result<()> {
        let module = self.validated(name, |device| {
            device.create_shader_module(ShaderModuleDescriptor {
                label: Some(name),
                source: ShaderSource::Wgsl(source.into()),
            })
        })?;

        log::debug!("compiled shader module '{}'", name);
        self.shader_modules.insert(name.to_string(), module);
        Ok(())
    }

    /// Creates a pipeline from `config` and stores it under `name`
    ///
    /// # Errors
    /// [`LanternError::ShaderLink`] when the shader has not been loaded or the
    /// pipeline fails validation (for example a vertex layout mismatch).
    pub fn register_pipeline(&mut self, name: &str, config: PipelineConfig) -> Result<()> {
        let pipeline = self.create_pipeline_from_config(name, &config)?;
        self.pipelines.insert(name.to_string(), pipeline);
        Ok(())
    }

    /// Gets a previously registered pipeline
    pub fn get_pipeline(&self, name: &str) -> Option<&RenderPipeline> {
        self.pipelines.get(name)
    }

    /// Creates a render pipeline from configuration
    fn create_pipeline_from_config(&self, name: &str, config: &PipelineConfig) -> Result<RenderPipeline> {
        let shader = self
            .shader_modules
            .get(&config.shader)
            .ok_or_else(|| LanternError::ShaderLink {
                name: name.to_string(),
                message: format!("shader '{}' not loaded", config.shader),
            })?;

        self.validated(name, |device| {
            let bind_group_layout_refs: Vec<&BindGroupLayout> = config.bind_group_layouts.iter().collect();
            let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
                label: Some(&format!("{} Layout", name)),
                bind_group_layouts: &bind_group_layout_refs,
                push_constant_ranges: &[],
            });

            let depth_stencil = config.depth_format.map(|format| DepthStencilState {
                format,
                depth_write_enabled: true,
                depth_compare: CompareFunction::Less,
                stencil: StencilState::default(),
                bias: DepthBiasState::default(),
            });

            device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some(&config.label),
                layout: Some(&pipeline_layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &config.vertex_buffers,
                    compilation_options: PipelineCompilationOptions::default(),
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &config.color_targets,
                    compilation_options: PipelineCompilationOptions::default(),
                }),
                primitive: PrimitiveState {
                    topology: config.primitive_topology,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    cull_mode: config.cull_mode,
                    polygon_mode: PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil,
                multisample: config.multisample,
                multiview: None,
                cache: None,
            })
        })
    }
}
