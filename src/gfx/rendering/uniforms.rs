//! `#[repr(C)]` uniform blocks shared with the WGSL shaders.

use cgmath::{Matrix4, SquareMatrix, Vector3};

use crate::gfx::{
    light::MAX_LIGHTS,
    shader::{names, UniformValue},
    transform::matrix_to_array,
};

/// Per-draw block for the lit scene programs (`DrawUniforms` in WGSL).
///
/// vec3 values are widened to vec4 to satisfy uniform alignment.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniforms {
    pub projection_view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub ambient_colour: [f32; 4],
    pub light_colour: [f32; 4],
    pub light_direction: [f32; 4],
    pub point_light_colours: [[f32; 4]; MAX_LIGHTS],
    pub point_light_positions: [[f32; 4]; MAX_LIGHTS],
    pub num_lights: i32,
    pub _padding: [i32; 3],
}

impl Default for DrawUniforms {
    fn default() -> Self {
        let identity = matrix_to_array(&Matrix4::identity());
        Self {
            projection_view: identity,
            model: identity,
            ..bytemuck::Zeroable::zeroed()
        }
    }
}

fn widen(v: Vector3<f32>, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn fill_array(slots: &mut [[f32; 4]; MAX_LIGHTS], values: &[Vector3<f32>], w: f32) {
    *slots = [[0.0; 4]; MAX_LIGHTS];
    for (slot, value) in slots.iter_mut().zip(values) {
        *slot = widen(*value, w);
    }
}

impl DrawUniforms {
    /// Stores `value` under `name`. Returns false, leaving the block
    /// untouched, when the name is unknown or the value has the wrong shape.
    pub fn set(&mut self, name: &str, value: &UniformValue) -> bool {
        match (name, value) {
            (names::PROJECTION_VIEW, UniformValue::Mat4(m)) => self.projection_view = matrix_to_array(m),
            (names::MODEL, UniformValue::Mat4(m)) => self.model = matrix_to_array(m),
            (names::CAMERA_POSITION, UniformValue::Vec3(v)) => self.camera_position = widen(*v, 1.0),
            (names::AMBIENT_COLOUR, UniformValue::Vec3(v)) => self.ambient_colour = widen(*v, 1.0),
            (names::LIGHT_COLOUR, UniformValue::Vec3(v)) => self.light_colour = widen(*v, 1.0),
            (names::LIGHT_DIRECTION, UniformValue::Vec3(v)) => self.light_direction = widen(*v, 0.0),
            (names::NUM_LIGHTS, UniformValue::Int(n)) => {
                self.num_lights = (*n).clamp(0, MAX_LIGHTS as i32)
            }
            (names::POINT_LIGHT_COLOURS, UniformValue::Vec3Array(values)) => {
                fill_array(&mut self.point_light_colours, values, 1.0)
            }
            (names::POINT_LIGHT_POSITIONS, UniformValue::Vec3Array(values)) => {
                fill_array(&mut self.point_light_positions, values, 1.0)
            }
            _ => return false,
        }
        true
    }
}

/// Post-processing effect applied to the offscreen scene image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PostEffect {
    #[default]
    Passthrough,
    Greyscale,
    Invert,
    Vignette,
}

impl PostEffect {
    pub const ALL: [PostEffect; 4] = [
        PostEffect::Passthrough,
        PostEffect::Greyscale,
        PostEffect::Invert,
        PostEffect::Vignette,
    ];

    /// Selector value read by `post.wgsl`.
    pub fn index(self) -> u32 {
        match self {
            PostEffect::Passthrough => 0,
            PostEffect::Greyscale => 1,
            PostEffect::Invert => 2,
            PostEffect::Vignette => 3,
        }
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            PostEffect::Passthrough => "None",
            PostEffect::Greyscale => "Greyscale",
            PostEffect::Invert => "Invert",
            PostEffect::Vignette => "Vignette",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|effect| effect.label().eq_ignore_ascii_case(name))
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PostUniforms {
    pub effect: u32,
    pub vignette_strength: f32,
    pub _padding: [f32; 2],
}

impl PostUniforms {
    pub fn new(effect: PostEffect) -> Self {
        Self {
            effect: effect.index(),
            vignette_strength: 0.6,
            _padding: [0.0; 2],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GizmoUniforms {
    pub projection_view: [[f32; 4]; 4],
}
