//! Placed, drawable occurrences of a mesh.

use std::rc::Rc;

use cgmath::{Matrix4, Vector3};

use crate::gfx::{
    rendering::draw_target::DrawTarget,
    shader::{names, ShaderProgram, UniformValue},
    transform::{make_transform, translation_of},
};

use super::{mesh::Mesh, scene::Scene};

/// A mesh drawn with a shader program at a transform.
///
/// Meshes and programs are shared between instances. An instance keeps no
/// lighting state; every draw pulls camera and light values from the scene.
#[derive(Debug, Clone)]
pub struct ObjectInstance {
    shader: Rc<ShaderProgram>,
    mesh: Rc<Mesh>,
    transform: Matrix4<f32>,
}

impl ObjectInstance {
    pub fn new(shader: Rc<ShaderProgram>, mesh: Rc<Mesh>, transform: Matrix4<f32>) -> Self {
        Self {
            shader,
            mesh,
            transform,
        }
    }

    /// Builds the transform from position, Euler angles in degrees and scale
    /// (see [`make_transform`]).
    pub fn from_trs(
        shader: Rc<ShaderProgram>,
        mesh: Rc<Mesh>,
        position: Vector3<f32>,
        euler_degrees: Vector3<f32>,
        scale: Vector3<f32>,
    ) -> Self {
        Self::new(shader, mesh, make_transform(position, euler_degrees, scale))
    }

    /// Binds the program, submits scene and instance uniforms, then draws
    /// the mesh.
    ///
    /// Uniform order: camera position, projection-view, model, ambient,
    /// sun colour, sun direction, light count, point light colours, point
    /// light positions.
    pub fn draw(&self, scene: &Scene<'_>, target: &mut dyn DrawTarget) {
        let camera = scene.camera();
        let (width, height) = scene.window_size();
        let sunlight = scene.sunlight();

        target.bind_program(&self.shader);

        target.bind_uniform(names::CAMERA_POSITION, camera.position().into());
        target.bind_uniform(
            names::PROJECTION_VIEW,
            camera.view_projection(width as f32, height.max(1) as f32).into(),
        );
        target.bind_uniform(names::MODEL, self.transform.into());

        target.bind_uniform(names::AMBIENT_COLOUR, scene.ambient_light().into());
        target.bind_uniform(names::LIGHT_COLOUR, sunlight.colour.into());
        target.bind_uniform(names::LIGHT_DIRECTION, sunlight.direction.into());

        target.bind_uniform(names::NUM_LIGHTS, UniformValue::Int(scene.num_lights() as i32));
        target.bind_uniform(names::POINT_LIGHT_COLOURS, scene.point_light_colours().into());
        target.bind_uniform(names::POINT_LIGHT_POSITIONS, scene.point_light_positions().into());

        self.mesh.draw(target);
    }

    /// World position, read from the translation column.
    pub fn position(&self) -> Vector3<f32> {
        translation_of(&self.transform)
    }

    pub fn transform(&self) -> Matrix4<f32> {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Matrix4<f32>) {
        self.transform = transform;
    }

    pub fn mesh(&self) -> &Rc<Mesh> {
        &self.mesh
    }

    pub fn shader(&self) -> &Rc<ShaderProgram> {
        &self.shader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance_at(position: Vector3<f32>) -> ObjectInstance {
        ObjectInstance::from_trs(
            Rc::new(ShaderProgram::phong()),
            Rc::new(Mesh::new("quad")),
            position,
            Vector3::new(30.0, 45.0, 60.0),
            Vector3::new(2.0, 2.0, 2.0),
        )
    }

    #[test]
    fn test_position_reads_translation() {
        let instance = instance_at(Vector3::new(4.0, -1.5, 2.25));
        assert_eq!(instance.position(), Vector3::new(4.0, -1.5, 2.25));
    }

    #[test]
    fn test_set_transform_moves_instance() {
        let mut instance = instance_at(Vector3::new(0.0, 0.0, 0.0));
        instance.set_transform(Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(instance.position(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_clones_share_mesh_and_program() {
        let instance = instance_at(Vector3::new(0.0, 0.0, 0.0));
        let copy = instance.clone();
        assert!(Rc::ptr_eq(instance.mesh(), copy.mesh()));
        assert!(Rc::ptr_eq(instance.shader(), copy.shader()));
    }
}
