//! Affine transform helpers.

use cgmath::{Deg, Matrix4, Vector3};

/// Composes `translate(position) * rotZ * rotY * rotX * scale`.
///
/// `euler_degrees` holds the rotation about X, Y and Z in degrees; Z is
/// applied last (outermost), X first.
pub fn make_transform(
    position: Vector3<f32>,
    euler_degrees: Vector3<f32>,
    scale: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(euler_degrees.z))
        * Matrix4::from_angle_y(Deg(euler_degrees.y))
        * Matrix4::from_angle_x(Deg(euler_degrees.x))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Reads the translation column of an affine transform.
pub fn translation_of(transform: &Matrix4<f32>) -> Vector3<f32> {
    transform.w.truncate()
}

/// Column-major array form, as uploaded to uniform buffers.
pub fn matrix_to_array(matrix: &Matrix4<f32>) -> [[f32; 4]; 4] {
    (*matrix).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{SquareMatrix, Vector4};

    fn assert_near(a: Vector3<f32>, b: Vector3<f32>) {
        assert!(
            (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5 && (a.z - b.z).abs() < 1e-5,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_translation_is_exact() {
        let cases = [
            (Vector3::new(1.5, -2.0, 3.25), Vector3::new(0.0, 0.0, 0.0), 1.0),
            (Vector3::new(-10.0, 0.5, 7.0), Vector3::new(45.0, 30.0, -60.0), 2.0),
            (Vector3::new(0.0, 100.0, -0.125), Vector3::new(90.0, 180.0, 270.0), 0.5),
        ];

        for (position, euler, s) in cases {
            let transform = make_transform(position, euler, Vector3::new(s, s, s));
            assert_eq!(translation_of(&transform), position);
        }
    }

    #[test]
    fn test_identity_inputs_give_identity() {
        let transform = make_transform(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        assert_eq!(transform, Matrix4::identity());
    }

    #[test]
    fn test_rotation_order_applies_x_first() {
        // 90 about X takes +Y to +Z, then 90 about Z leaves +Z alone
        let transform = make_transform(
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(90.0, 0.0, 90.0),
            Vector3::new(1.0, 1.0, 1.0),
        );
        let v = transform * Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert_near(v.truncate(), Vector3::new(0.0, 0.0, 1.0));

        // +X: X rotation leaves it, Z rotation takes it to +Y
        let v = transform * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_near(v.truncate(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let transform = make_transform(
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 3.0, 4.0),
        );
        let p = transform * Vector4::new(1.0, 1.0, 1.0, 1.0);
        assert_near(p.truncate(), Vector3::new(3.0, 5.0, 7.0));
    }
}
