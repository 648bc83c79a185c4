//! Application configuration.
//!
//! Plain data with sensible defaults; the binary fills in what the command
//! line overrides.

use std::path::PathBuf;

use cgmath::{InnerSpace, Vector3};

use crate::gfx::{
    camera::Camera,
    light::{DirectionalLight, PointLight},
    rendering::{PostEffect, RenderSettings},
};

/// Startup settings for [`LanternApp`](crate::app::LanternApp).
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
    pub background_colour: [f32; 3],
    pub ambient_light: Vector3<f32>,
    pub sun_direction: Vector3<f32>,
    pub sun_colour: Vector3<f32>,
    /// Camera azimuth and elevation in degrees.
    pub camera_angles: (f32, f32),
    pub camera_position: Vector3<f32>,
    pub point_lights: Vec<PointLight>,
    pub show_light_gizmos: bool,
    pub post_effect: PostEffect,
    /// OBJ model drawn at the origin instead of the procedural cube.
    pub model_path: Option<PathBuf>,
    pub model_scale: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Lantern - Scene Lighting Demo".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
            background_colour: [0.25, 0.25, 0.25],
            ambient_light: Vector3::new(0.25, 0.25, 0.25),
            sun_direction: Vector3::new(-1.0, -1.0, -1.0).normalize(),
            sun_colour: Vector3::new(1.0, 1.0, 1.0),
            camera_angles: (-90.0, -15.0),
            camera_position: Vector3::new(0.0, 3.0, 10.0),
            point_lights: vec![
                PointLight::new(Vector3::new(4.0, 2.0, 0.0), Vector3::new(1.0, 0.3, 0.2), 2.0),
                PointLight::new(Vector3::new(-4.0, 2.0, 0.0), Vector3::new(0.2, 0.4, 1.0), 2.0),
            ],
            show_light_gizmos: true,
            post_effect: PostEffect::Passthrough,
            model_path: None,
            model_scale: 0.5,
        }
    }
}

impl AppConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(path.into());
        self
    }

    pub fn with_post_effect(mut self, effect: PostEffect) -> Self {
        self.post_effect = effect;
        self
    }

    pub fn with_point_lights(mut self, lights: Vec<PointLight>) -> Self {
        self.point_lights = lights;
        self
    }

    pub fn with_ambient_light(mut self, ambient: Vector3<f32>) -> Self {
        self.ambient_light = ambient;
        self
    }

    pub fn with_sun(mut self, direction: Vector3<f32>, colour: Vector3<f32>) -> Self {
        self.sun_direction = direction;
        self.sun_colour = colour;
        self
    }

    pub fn sunlight(&self) -> DirectionalLight {
        DirectionalLight::new(self.sun_direction, self.sun_colour)
    }

    pub fn camera(&self) -> Camera {
        let (theta, phi) = self.camera_angles;
        Camera::new(theta, phi, self.camera_position)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            vsync: self.vsync,
            clear_colour: self.background_colour,
            post_effect: self.post_effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.background_colour, [0.25, 0.25, 0.25]);
        assert!((config.sun_direction.magnitude() - 1.0).abs() < 1e-6);
        assert!(config.model_path.is_none());
        assert!(config.point_lights.len() <= crate::gfx::light::MAX_LIGHTS);
    }

    #[test]
    fn test_builders() {
        let config = AppConfig::default()
            .with_title("test")
            .with_size(640, 480)
            .with_vsync(false)
            .with_model("bunny.obj")
            .with_post_effect(PostEffect::Invert)
            .with_point_lights(Vec::new());

        assert_eq!(config.title, "test");
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.model_path, Some(PathBuf::from("bunny.obj")));
        assert!(config.point_lights.is_empty());

        let settings = config.render_settings();
        assert!(!settings.vsync);
        assert_eq!(settings.post_effect, PostEffect::Invert);
    }

    #[test]
    fn test_camera_and_sun_from_config() {
        let config = AppConfig::default().with_sun(Vector3::new(0.0, -2.0, 0.0), Vector3::new(1.0, 0.5, 0.0));
        let camera = config.camera();
        assert_eq!(camera.theta(), -90.0);
        assert_eq!(camera.phi(), -15.0);
        assert_eq!(camera.position(), Vector3::new(0.0, 3.0, 10.0));

        let sun = config.sunlight();
        assert_eq!(sun.direction, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(sun.colour, Vector3::new(1.0, 0.5, 0.0));
    }
}
