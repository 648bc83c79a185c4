//! Shader programs and named uniform values.
//!
//! A [`ShaderProgram`] is a named WGSL source plus the vertex layout it
//! expects. The render engine links it into a pipeline keyed by name; draw
//! code only ever refers to programs by reference and to uniforms by name.

use std::borrow::Cow;

use cgmath::{Matrix4, Vector3, Vector4};

use crate::gfx::scene::vertex::VertexLayout;

/// Names of the uniforms the lit scene shader understands.
pub mod names {
    pub const CAMERA_POSITION: &str = "camera_position";
    pub const PROJECTION_VIEW: &str = "projection_view";
    pub const MODEL: &str = "model";
    pub const AMBIENT_COLOUR: &str = "ambient_colour";
    pub const LIGHT_COLOUR: &str = "light_colour";
    pub const LIGHT_DIRECTION: &str = "light_direction";
    pub const NUM_LIGHTS: &str = "num_lights";
    pub const POINT_LIGHT_COLOURS: &str = "point_light_colours";
    pub const POINT_LIGHT_POSITIONS: &str = "point_light_positions";
}

/// Value submitted for a named uniform.
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec3(Vector3<f32>),
    Vec4(Vector4<f32>),
    Mat4(Matrix4<f32>),
    Vec3Array(Vec<Vector3<f32>>),
    /// Texture unit index for a sampler uniform.
    TextureSlot(u32),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vector3<f32>> for UniformValue {
    fn from(value: Vector3<f32>) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vector4<f32>> for UniformValue {
    fn from(value: Vector4<f32>) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Matrix4<f32>> for UniformValue {
    fn from(value: Matrix4<f32>) -> Self {
        UniformValue::Mat4(value)
    }
}

impl From<&[Vector3<f32>]> for UniformValue {
    fn from(value: &[Vector3<f32>]) -> Self {
        UniformValue::Vec3Array(value.to_vec())
    }
}

/// WGSL source for the built-in programs.
pub mod sources {
    pub const PHONG: &str = include_str!("shaders/phong.wgsl");
    pub const NORMALS: &str = include_str!("shaders/normals.wgsl");
    pub const POST: &str = include_str!("shaders/post.wgsl");
    pub const GIZMO: &str = include_str!("shaders/gizmo.wgsl");
}

/// A named WGSL program with `vs_main` / `fs_main` entry points.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderProgram {
    name: String,
    source: Cow<'static, str>,
    layout: VertexLayout,
}

impl ShaderProgram {
    pub fn new(name: &str, source: impl Into<Cow<'static, str>>, layout: VertexLayout) -> Self {
        Self {
            name: name.to_owned(),
            source: source.into(),
            layout,
        }
    }

    /// Blinn-Phong lighting with one sun and up to `MAX_LIGHTS` point lights.
    pub fn phong() -> Self {
        Self::new("phong", sources::PHONG, VertexLayout::Standard)
    }

    /// Debug program that shades by world-space normal.
    pub fn normals() -> Self {
        Self::new("normals", sources::NORMALS, VertexLayout::Standard)
    }

    /// Fullscreen post-processing program.
    pub fn post() -> Self {
        Self::new("post", sources::POST, VertexLayout::Screen)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn layout(&self) -> VertexLayout {
        self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_programs_declare_entry_points() {
        for program in [ShaderProgram::phong(), ShaderProgram::normals(), ShaderProgram::post()] {
            assert!(program.source().contains("fn vs_main"), "{}", program.name());
            assert!(program.source().contains("fn fs_main"), "{}", program.name());
        }
        assert!(sources::GIZMO.contains("fn vs_main"));
    }

    #[test]
    fn test_phong_declares_every_named_uniform() {
        let source = ShaderProgram::phong();
        for name in [
            names::CAMERA_POSITION,
            names::PROJECTION_VIEW,
            names::MODEL,
            names::AMBIENT_COLOUR,
            names::LIGHT_COLOUR,
            names::LIGHT_DIRECTION,
            names::NUM_LIGHTS,
            names::POINT_LIGHT_COLOURS,
            names::POINT_LIGHT_POSITIONS,
        ] {
            assert!(source.source().contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(UniformValue::from(3), UniformValue::Int(3));
        let lights = [Vector3::new(1.0, 2.0, 3.0)];
        assert_eq!(
            UniformValue::from(&lights[..]),
            UniformValue::Vec3Array(vec![Vector3::new(1.0, 2.0, 3.0)])
        );
    }
}
