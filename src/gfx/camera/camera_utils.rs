use cgmath::{Deg, Matrix4, Rad, Vector3};

/// Remaps OpenGL clip-space depth (-1..1) to the 0..1 range wgpu expects.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Spherical-to-Cartesian view direction for an azimuth/elevation pair in degrees.
pub fn forward_from_angles(theta: f32, phi: f32) -> Vector3<f32> {
    let theta = Rad::from(Deg(theta)).0;
    let phi = Rad::from(Deg(phi)).0;
    Vector3::new(phi.cos() * theta.cos(), phi.sin(), phi.cos() * theta.sin())
}

/// Horizontal right vector for an azimuth in degrees.
pub fn right_from_azimuth(theta: f32) -> Vector3<f32> {
    let theta = Rad::from(Deg(theta)).0;
    Vector3::new(-theta.sin(), 0.0, theta.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_forward_is_unit_length() {
        for (theta, phi) in [(0.0, 0.0), (-90.0, -15.0), (37.0, 70.0), (400.0, -70.0)] {
            let forward = forward_from_angles(theta, phi);
            assert!((forward.magnitude() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_right_is_perpendicular_to_forward() {
        for (theta, phi) in [(0.0, 0.0), (-90.0, 20.0), (135.0, -45.0)] {
            let forward = forward_from_angles(theta, phi);
            let right = right_from_azimuth(theta);
            assert!(forward.dot(right).abs() < 1e-5);
        }
    }

    #[test]
    fn test_zero_angles_look_down_positive_x() {
        let forward = forward_from_angles(0.0, 0.0);
        assert_eq!(forward, Vector3::new(1.0, 0.0, 0.0));
    }
}
