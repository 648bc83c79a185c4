//! Application driver: window, event loop and the per-frame update/draw.

use std::{rc::Rc, sync::Arc, time::Instant};

use cgmath::{Vector3, Vector4};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    error::{LanternError, Result},
    gfx::{
        geometry::{generate_sphere, load_obj, unit_cube},
        gizmos::Gizmos,
        light::DirectionalLight,
        rendering::{FrameRecorder, PostEffect, RenderEngine},
        scene::{Mesh, ObjectInstance, Scene},
        shader::ShaderProgram,
    },
    input::{InputState, Key},
    ui::{lighting_panel, UiManager},
};

/// Half the side of the floor grid, in world units.
const GRID_HALF_EXTENT: i32 = 10;

/// The demo application.
///
/// ```no_run
/// use lantern::{app::LanternApp, config::AppConfig};
///
/// LanternApp::new(AppConfig::default()).run().unwrap();
/// ```
pub struct LanternApp {
    config: AppConfig,
}

/// Resources that exist once the window and GPU are up.
struct GpuState {
    window: Arc<Window>,
    render_engine: RenderEngine,
    ui_manager: UiManager,
}

struct AppState<'sun> {
    config: AppConfig,
    scene: Scene<'sun>,
    input: InputState,
    gizmos: Gizmos,
    recorder: FrameRecorder,
    post_effect: PostEffect,
    gpu: Option<GpuState>,
    start_time: Instant,
    last_frame: Instant,
    startup_error: Option<LanternError>,
}

impl LanternApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Opens the window and runs until it is closed or Escape is pressed.
    ///
    /// # Errors
    /// Returns the first startup failure (GPU, shader or model loading) or
    /// an event loop error.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        // the scene borrows the sunlight, so it must outlive the loop
        let sunlight = self.config.sunlight();
        let mut state = AppState::new(self.config, &sunlight);

        event_loop.run_app(&mut state)?;

        match state.startup_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<'sun> AppState<'sun> {
    fn new(config: AppConfig, sunlight: &'sun DirectionalLight) -> Self {
        let mut scene = Scene::new(
            config.camera(),
            (config.width, config.height),
            sunlight,
            config.ambient_light,
        );
        *scene.point_lights_mut() = config.point_lights.clone();
        scene.set_draw_point_lights(config.show_light_gizmos);

        let now = Instant::now();
        Self {
            post_effect: config.post_effect,
            config,
            scene,
            input: InputState::new(),
            gizmos: Gizmos::new(),
            recorder: FrameRecorder::new(),
            gpu: None,
            start_time: now,
            last_frame: now,
            startup_error: None,
        }
    }

    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<GpuState> {
        let window = event_loop.create_window(
            WindowAttributes::default()
                .with_title(self.config.title.clone())
                .with_inner_size(LogicalSize::new(self.config.width, self.config.height)),
        )?;
        let window = Arc::new(window);
        let (width, height) = window.inner_size().into();

        let mut render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.render_settings(),
        ))?;

        self.populate_scene(&mut render_engine)?;
        if width > 0 && height > 0 {
            self.scene.set_window_size(width, height);
        }

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        Ok(GpuState {
            window,
            render_engine,
            ui_manager,
        })
    }

    /// Links the programs, uploads the meshes and adds the demo instances.
    fn populate_scene(&mut self, render_engine: &mut RenderEngine) -> Result<()> {
        let phong = Rc::new(ShaderProgram::phong());
        let normals = Rc::new(ShaderProgram::normals());
        render_engine.link(&phong)?;
        render_engine.link(&normals)?;

        let device = render_engine.device();
        let origin = Vector3::new(0.0, 0.0, 0.0);
        let no_rotation = Vector3::new(0.0, 0.0, 0.0);

        match &self.config.model_path {
            Some(path) => {
                let scale = self.config.model_scale;
                for (index, data) in load_obj(path)?.iter().enumerate() {
                    let label = format!("{} #{}", path.display(), index);
                    self.scene.add_object_instance(ObjectInstance::from_trs(
                        phong.clone(),
                        Rc::new(data.to_mesh(device, &label)),
                        origin,
                        no_rotation,
                        Vector3::new(scale, scale, scale),
                    ));
                }
            }
            None => {
                let cube = Rc::new(unit_cube().to_mesh(device, "unit cube"));
                self.scene.add_object_instance(ObjectInstance::from_trs(
                    phong.clone(),
                    cube,
                    Vector3::new(0.0, 1.0, 0.0),
                    Vector3::new(0.0, 30.0, 0.0),
                    Vector3::new(2.0, 2.0, 2.0),
                ));
            }
        }

        let mut floor = Mesh::new("floor");
        floor.initialize_quad(device);
        let extent = (2 * GRID_HALF_EXTENT) as f32;
        self.scene.add_object_instance(ObjectInstance::from_trs(
            phong.clone(),
            Rc::new(floor),
            // just under the grid lines
            Vector3::new(0.0, -0.01, 0.0),
            no_rotation,
            Vector3::new(extent, 1.0, extent),
        ));

        let sphere = Rc::new(generate_sphere(32, 16).to_mesh(device, "sphere"));
        self.scene.add_object_instance(ObjectInstance::from_trs(
            phong,
            sphere.clone(),
            Vector3::new(-3.5, 1.0, 2.0),
            no_rotation,
            Vector3::new(1.0, 1.0, 1.0),
        ));
        self.scene.add_object_instance(ObjectInstance::from_trs(
            normals,
            sphere,
            Vector3::new(3.5, 1.0, 2.0),
            no_rotation,
            Vector3::new(0.75, 0.75, 0.75),
        ));

        log::info!("scene ready: {} instances", self.scene.instance_count());
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_time = (now - self.last_frame).as_secs_f32();
        let time = (now - self.start_time).as_secs_f32();
        self.last_frame = now;

        let input = self.input.snapshot();
        self.input.end_frame();
        if input.is_key_down(Key::Quit) {
            event_loop.exit();
            return;
        }

        self.gizmos.clear();
        self.gizmos.add_grid(
            GRID_HALF_EXTENT,
            Vector4::new(0.0, 0.0, 0.0, 1.0),
            Vector4::new(1.0, 1.0, 1.0, 1.0),
        );
        self.scene.update(delta_time, time, &input);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let scene = &mut self.scene;
        let post_effect = &mut self.post_effect;
        gpu.ui_manager
            .update_logic(&gpu.window, |ui| lighting_panel(ui, scene, post_effect));
        if gpu.render_engine.post_effect() != self.post_effect {
            gpu.render_engine.set_post_effect(self.post_effect);
        }

        self.recorder.reset();
        self.scene.draw(&mut self.recorder, &mut self.gizmos);
        if self.recorder.ignored_uniforms() > 0 {
            log::trace!("{} uniforms ignored this frame", self.recorder.ignored_uniforms());
        }

        let (width, height) = self.scene.window_size();
        let projection_view = self
            .scene
            .camera()
            .view_projection(width as f32, height.max(1) as f32);

        let ui_manager = &mut gpu.ui_manager;
        let result = gpu.render_engine.render_frame(
            &self.recorder,
            &self.gizmos,
            projection_view,
            Some(
                |device: &wgpu::Device,
                 queue: &wgpu::Queue,
                 encoder: &mut wgpu::CommandEncoder,
                 view: &wgpu::TextureView| {
                    ui_manager.render_display_only(device, queue, encoder, view);
                },
            ),
        );

        match result {
            Ok(()) => {}
            Err(err) => {
                gpu.ui_manager.discard_frame();
                match err {
                    wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                        log::debug!("surface {}; reconfiguring", err);
                        gpu.render_engine.reconfigure();
                    }
                    wgpu::SurfaceError::OutOfMemory => {
                        log::error!("GPU out of memory; exiting");
                        event_loop.exit();
                    }
                    other => log::warn!("skipping frame: {}", other),
                }
            }
        }
    }
}

impl ApplicationHandler for AppState<'_> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(gpu) => {
                gpu.window.request_redraw();
                self.gpu = Some(gpu);
            }
            Err(err) => {
                log::error!("startup failed: {}", err);
                self.startup_error = Some(err);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        // UI gets first look; releases and focus changes always reach the camera input
        let ui_captured = gpu
            .ui_manager
            .handle_window_event(&gpu.window, window_id, &event);
        if ui_captured {
            self.input.handle_captured_window_event(&event);
        } else {
            self.input.handle_window_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                gpu.render_engine.resize(width, height);
                if width > 0 && height > 0 {
                    self.scene.set_window_size(width, height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        if let Some(gpu) = self.gpu.as_ref() {
            if gpu.ui_manager.wants_input() {
                return;
            }
        }
        self.input.handle_device_event(&event);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = self.gpu.as_ref() {
            gpu.window.request_redraw();
        }
    }
}
