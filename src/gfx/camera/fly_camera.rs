use cgmath::{perspective, Matrix4, Point3, Rad, Vector3};

use crate::input::{InputSnapshot, Key, MouseButton};

use super::camera_utils::{forward_from_angles, right_from_azimuth, OPENGL_TO_WGPU_MATRIX};

/// Elevation limits in degrees.
pub const MIN_PHI: f32 = -70.0;
pub const MAX_PHI: f32 = 70.0;

/// Translation speed in world units per second.
pub const MOVE_SPEED: f32 = 7.0;
/// Rotation speed in degrees per unit of mouse delta.
pub const PAN_SPEED: f32 = 0.1;

pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_4;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;

/// Free-fly camera.
///
/// Orientation is tracked as an azimuth (`theta`) and an elevation (`phi`),
/// both in degrees. WASD moves along the view and right vectors, Q/E move
/// along world up, and dragging with the right mouse button turns the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    theta: f32,
    phi: f32,
    position: Vector3<f32>,
    fov: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, 0.0, Vector3::new(0.0, 0.0, 0.0))
    }
}

impl Camera {
    /// Creates a camera; `phi` is clamped into the elevation bounds.
    pub fn new(theta: f32, phi: f32, position: Vector3<f32>) -> Self {
        Self {
            theta,
            phi: phi.clamp(MIN_PHI, MAX_PHI),
            position,
            fov: DEFAULT_FOV,
        }
    }

    /// Overrides the vertical field of view (radians).
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Applies one frame of input.
    ///
    /// Movement axes are taken from the orientation at the start of the call,
    /// so panning in the same frame does not bend this frame's movement.
    pub fn update(&mut self, delta_time: f32, input: &InputSnapshot) {
        let forward = self.forward();
        let right = self.right();
        let up = Vector3::unit_y();
        let step = delta_time * MOVE_SPEED;

        if input.is_key_down(Key::Forward) {
            self.position += forward * step;
        }
        if input.is_key_down(Key::Back) {
            self.position -= forward * step;
        }

        if input.is_key_down(Key::Left) {
            self.position -= right * step;
        }
        if input.is_key_down(Key::Right) {
            self.position += right * step;
        }

        if input.is_key_down(Key::Up) {
            self.position += up * step;
        }
        if input.is_key_down(Key::Down) {
            self.position -= up * step;
        }

        if input.is_mouse_button_down(MouseButton::Right) {
            self.theta += input.mouse_delta_x() * PAN_SPEED;
            self.phi = (self.phi + input.mouse_delta_y() * PAN_SPEED).clamp(MIN_PHI, MAX_PHI);
        }
    }

    /// World-to-camera transform looking along the current orientation.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::new(self.position.x, self.position.y, self.position.z);
        Matrix4::look_to_rh(eye, self.forward(), Vector3::unit_y())
    }

    /// Perspective projection for a viewport of the given size, in wgpu clip space.
    pub fn projection_matrix(&self, width: f32, height: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Rad(self.fov), width / height, NEAR_PLANE, FAR_PLANE)
    }

    /// `projection * view`, the order shaders expect.
    pub fn view_projection(&self, width: f32, height: f32) -> Matrix4<f32> {
        self.projection_matrix(width, height) * self.view_matrix()
    }

    pub fn forward(&self) -> Vector3<f32> {
        forward_from_angles(self.theta, self.phi)
    }

    pub fn right(&self) -> Vector3<f32> {
        right_from_azimuth(self.theta)
    }

    pub fn position(&self) -> Vector3<f32> {
        self.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.position = position;
    }

    pub fn theta(&self) -> f32 {
        self.theta
    }

    pub fn phi(&self) -> f32 {
        self.phi
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }
}
