//! Light value types.
//!
//! The scene has one directional "sun" and a list of point lights. Only the
//! first [`MAX_LIGHTS`] point lights are handed to the shader; the uniform
//! arrays in `phong.wgsl` are sized by the same constant.

use cgmath::{InnerSpace, Vector3, Vector4};

use crate::gfx::gizmos::Gizmos;

/// Upper bound on point lights that reach the shader.
pub const MAX_LIGHTS: usize = 4;

/// Radius of the sphere drawn for a point light gizmo.
pub const POINT_GIZMO_RADIUS: f32 = 0.2;
pub const POINT_GIZMO_SEGMENTS: u32 = 20;

const SUN_GIZMO_LENGTH: f32 = 5.0;

/// Infinitely distant light. `colour` already includes intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vector3<f32>,
    pub colour: Vector3<f32>,
}

impl DirectionalLight {
    /// Creates a light shining along `direction` (normalized here). A zero
    /// direction is kept as is and contributes no sunlight.
    pub fn new(direction: Vector3<f32>, colour: Vector3<f32>) -> Self {
        let direction = if direction.magnitude2() > 0.0 {
            direction.normalize()
        } else {
            direction
        };
        Self { direction, colour }
    }
}

/// Positional light with separate colour and intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub colour: Vector3<f32>,
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: Vector3<f32>, colour: Vector3<f32>, intensity: f32) -> Self {
        Self {
            position,
            colour,
            intensity,
        }
    }

    /// Colour as seen by the shader: `colour * intensity`.
    pub fn shader_colour(&self) -> Vector3<f32> {
        self.colour * self.intensity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional,
    Point,
}

/// Either kind of light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Light::Directional(_) => LightKind::Directional,
            Light::Point(_) => LightKind::Point,
        }
    }

    /// Colour submitted to the shader for this light.
    pub fn shader_colour(&self) -> Vector3<f32> {
        match self {
            Light::Directional(light) => light.colour,
            Light::Point(light) => light.shader_colour(),
        }
    }

    /// Adds a debug primitive for this light.
    ///
    /// Point lights become a small sphere in their shader colour; the sun
    /// becomes a line pointing at the origin along its direction.
    pub fn draw_gizmo(&self, gizmos: &mut Gizmos) {
        match self {
            Light::Point(light) => {
                let c = light.shader_colour();
                gizmos.add_sphere(
                    light.position,
                    POINT_GIZMO_RADIUS,
                    POINT_GIZMO_SEGMENTS,
                    POINT_GIZMO_SEGMENTS,
                    Vector4::new(c.x, c.y, c.z, 1.0),
                );
            }
            Light::Directional(light) => {
                let origin = Vector3::new(0.0, 0.0, 0.0);
                let c = light.colour;
                gizmos.add_line(
                    origin - light.direction * SUN_GIZMO_LENGTH,
                    origin,
                    Vector4::new(c.x, c.y, c.z, 1.0),
                );
            }
        }
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::gizmos::GizmoPrimitive;

    #[test]
    fn test_kinds_follow_variant() {
        let sun: Light = DirectionalLight::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0)).into();
        let bulb: Light = PointLight::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 0.0, 0.0), 2.0).into();

        assert_eq!(sun.kind(), LightKind::Directional);
        assert_eq!(bulb.kind(), LightKind::Point);
    }

    #[test]
    fn test_shader_colour_scales_point_lights_only() {
        let bulb = PointLight::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(0.5, 0.25, 1.0), 4.0);
        assert_eq!(bulb.shader_colour(), Vector3::new(2.0, 1.0, 4.0));

        let sun = DirectionalLight::new(Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.5, 0.5, 0.5));
        assert_eq!(Light::from(sun).shader_colour(), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn test_directional_direction_is_normalized() {
        let sun = DirectionalLight::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0));
        assert!((sun.direction.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_stays_finite() {
        let sun = DirectionalLight::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(sun.direction, Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_point_gizmo_is_sphere() {
        let mut gizmos = Gizmos::new();
        let bulb = PointLight::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(1.0, 0.5, 0.0), 2.0);
        Light::Point(bulb).draw_gizmo(&mut gizmos);

        assert_eq!(gizmos.primitives().len(), 1);
        match gizmos.primitives()[0] {
            GizmoPrimitive::Sphere {
                center,
                radius,
                rows,
                columns,
                colour,
            } => {
                assert_eq!(center, Vector3::new(1.0, 2.0, 3.0));
                assert_eq!(radius, 0.2);
                assert_eq!((rows, columns), (20, 20));
                assert_eq!(colour, Vector4::new(2.0, 1.0, 0.0, 1.0));
            }
            ref other => panic!("expected a sphere, got {:?}", other),
        }
    }

    #[test]
    fn test_directional_gizmo_is_line() {
        let mut gizmos = Gizmos::new();
        let sun = DirectionalLight::new(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0));
        Light::Directional(sun).draw_gizmo(&mut gizmos);

        assert!(matches!(gizmos.primitives()[0], GizmoPrimitive::Line { .. }));
    }
}
