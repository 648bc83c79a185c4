//! Scene composition: camera, lights and object instances.

use cgmath::Vector3;

use crate::{
    gfx::{
        camera::Camera,
        gizmos::Gizmos,
        light::{DirectionalLight, Light, PointLight, MAX_LIGHTS},
        rendering::draw_target::DrawTarget,
    },
    input::InputSnapshot,
};

use super::object::ObjectInstance;

/// Handle returned by [`Scene::add_object_instance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

/// Everything drawn in a frame.
///
/// The scene owns its camera, point lights and instances. The sunlight is
/// borrowed from the driver and must outlive the scene.
#[derive(Debug)]
pub struct Scene<'sun> {
    camera: Camera,
    window_size: (u32, u32),
    sunlight: &'sun DirectionalLight,
    ambient_light: Vector3<f32>,

    point_lights: Vec<PointLight>,
    // rebuilt from `point_lights` at the start of every draw
    point_light_positions: [Vector3<f32>; MAX_LIGHTS],
    point_light_colours: [Vector3<f32>; MAX_LIGHTS],

    instances: Vec<(InstanceId, ObjectInstance)>,
    next_instance_id: u64,

    draw_point_lights: bool,
}

impl<'sun> Scene<'sun> {
    pub fn new(
        camera: Camera,
        window_size: (u32, u32),
        sunlight: &'sun DirectionalLight,
        ambient_light: Vector3<f32>,
    ) -> Self {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        Self {
            camera,
            window_size,
            sunlight,
            ambient_light,
            point_lights: Vec::new(),
            point_light_positions: [zero; MAX_LIGHTS],
            point_light_colours: [zero; MAX_LIGHTS],
            instances: Vec::new(),
            next_instance_id: 0,
            draw_point_lights: false,
        }
    }

    /// Appends an instance; draw order follows insertion order.
    pub fn add_object_instance(&mut self, instance: ObjectInstance) -> InstanceId {
        let id = InstanceId(self.next_instance_id);
        self.next_instance_id += 1;
        self.instances.push((id, instance));
        id
    }

    /// Removes an instance, keeping the order of the rest. Unknown ids are
    /// ignored.
    pub fn remove_object_instance(&mut self, id: InstanceId) -> Option<ObjectInstance> {
        let index = self.instances.iter().position(|(other, _)| *other == id)?;
        Some(self.instances.remove(index).1)
    }

    /// Advances the camera. `_time` (seconds since start) is not used yet.
    pub fn update(&mut self, delta_time: f32, _time: f32, input: &InputSnapshot) {
        self.camera.update(delta_time, input);
    }

    /// Draws every instance into `target`, then adds point light gizmos if
    /// enabled.
    ///
    /// Only the first [`MAX_LIGHTS`] point lights reach the shader; the rest
    /// are ignored.
    pub fn draw(&mut self, target: &mut dyn DrawTarget, gizmos: &mut Gizmos) {
        self.rebuild_light_arrays();

        let scene: &Scene<'sun> = self;
        for (_, instance) in &scene.instances {
            instance.draw(scene, target);
        }

        if self.draw_point_lights {
            for light in &self.point_lights {
                Light::Point(*light).draw_gizmo(gizmos);
            }
        }
    }

    fn rebuild_light_arrays(&mut self) {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        self.point_light_positions = [zero; MAX_LIGHTS];
        self.point_light_colours = [zero; MAX_LIGHTS];

        for (i, light) in self.point_lights.iter().take(MAX_LIGHTS).enumerate() {
            self.point_light_positions[i] = light.position;
            self.point_light_colours[i] = light.shader_colour();
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn sunlight(&self) -> &'sun DirectionalLight {
        self.sunlight
    }

    pub fn ambient_light(&self) -> Vector3<f32> {
        self.ambient_light
    }

    pub fn set_ambient_light(&mut self, ambient_light: Vector3<f32>) {
        self.ambient_light = ambient_light;
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn point_lights_mut(&mut self) -> &mut Vec<PointLight> {
        &mut self.point_lights
    }

    /// Point lights that reach the shader: `min(len, MAX_LIGHTS)`.
    pub fn num_lights(&self) -> usize {
        self.point_lights.len().min(MAX_LIGHTS)
    }

    /// Positions uploaded by the last draw, `num_lights()` long.
    pub fn point_light_positions(&self) -> &[Vector3<f32>] {
        &self.point_light_positions[..self.num_lights()]
    }

    /// Colours (already scaled by intensity) uploaded by the last draw.
    pub fn point_light_colours(&self) -> &[Vector3<f32>] {
        &self.point_light_colours[..self.num_lights()]
    }

    pub fn draw_point_lights(&self) -> bool {
        self.draw_point_lights
    }

    pub fn set_draw_point_lights(&mut self, visible: bool) {
        self.draw_point_lights = visible;
    }

    pub fn draw_point_lights_mut(&mut self) -> &mut bool {
        &mut self.draw_point_lights
    }

    pub fn instances(&self) -> impl Iterator<Item = (InstanceId, &ObjectInstance)> {
        self.instances.iter().map(|(id, instance)| (*id, instance))
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ObjectInstance> {
        self.instances
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, instance)| instance)
    }

    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut ObjectInstance> {
        self.instances
            .iter_mut()
            .find(|(other, _)| *other == id)
            .map(|(_, instance)| instance)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use cgmath::Vector4;

    use crate::gfx::{
        gizmos::GizmoPrimitive,
        rendering::draw_target::{DrawCommand, DrawLog},
        scene::mesh::Mesh,
        shader::{names, ShaderProgram, UniformValue},
    };
    use crate::input::Key;

    fn sun() -> DirectionalLight {
        DirectionalLight::new(Vector3::new(-1.0, -1.0, -1.0), Vector3::new(1.0, 1.0, 1.0))
    }

    fn ambient() -> Vector3<f32> {
        Vector3::new(0.25, 0.25, 0.25)
    }

    fn camera() -> Camera {
        Camera::new(-90.0, -15.0, Vector3::new(0.0, 3.0, 10.0))
    }

    fn instance(mesh: &str, x: f32) -> ObjectInstance {
        ObjectInstance::from_trs(
            Rc::new(ShaderProgram::phong()),
            Rc::new(Mesh::new(mesh)),
            Vector3::new(x, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        )
    }

    fn light(i: usize) -> PointLight {
        PointLight::new(
            Vector3::new(i as f32, 1.0, 0.0),
            Vector3::new(1.0, 0.5, 0.25),
            (i + 1) as f32,
        )
    }

    fn drawn_meshes(log: &DrawLog) -> Vec<String> {
        log.commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::DrawMesh { mesh, .. } => Some(mesh.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_uniform_submission_order() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        scene.add_object_instance(instance("cube", 0.0));

        let mut log = DrawLog::new();
        scene.draw(&mut log, &mut Gizmos::new());

        assert_eq!(log.commands()[0], DrawCommand::BindProgram("phong".into()));
        assert_eq!(
            log.uniform_names(),
            vec![
                names::CAMERA_POSITION,
                names::PROJECTION_VIEW,
                names::MODEL,
                names::AMBIENT_COLOUR,
                names::LIGHT_COLOUR,
                names::LIGHT_DIRECTION,
                names::NUM_LIGHTS,
                names::POINT_LIGHT_COLOURS,
                names::POINT_LIGHT_POSITIONS,
            ]
        );
        assert!(matches!(log.commands().last(), Some(DrawCommand::DrawMesh { .. })));
    }

    #[test]
    fn test_scene_values_reach_uniforms() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (800, 600), &sunlight, ambient());
        scene.add_object_instance(instance("cube", 2.0));

        let mut log = DrawLog::new();
        scene.draw(&mut log, &mut Gizmos::new());

        assert_eq!(
            log.uniform_values(names::CAMERA_POSITION),
            vec![&UniformValue::Vec3(Vector3::new(0.0, 3.0, 10.0))]
        );
        assert_eq!(
            log.uniform_values(names::LIGHT_DIRECTION),
            vec![&UniformValue::Vec3(sunlight.direction)]
        );
        assert_eq!(
            log.uniform_values(names::AMBIENT_COLOUR),
            vec![&UniformValue::Vec3(ambient())]
        );
        assert_eq!(
            log.uniform_values(names::PROJECTION_VIEW),
            vec![&UniformValue::Mat4(scene.camera().view_projection(800.0, 600.0))]
        );
        assert_eq!(log.uniform_values(names::NUM_LIGHTS), vec![&UniformValue::Int(0)]);
        assert_eq!(
            log.uniform_values(names::POINT_LIGHT_POSITIONS),
            vec![&UniformValue::Vec3Array(Vec::new())]
        );
    }

    #[test]
    fn test_draw_is_idempotent() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        scene.add_object_instance(instance("a", 0.0));
        scene.add_object_instance(instance("b", 1.0));
        scene.point_lights_mut().extend((0..3).map(light));

        let mut first = DrawLog::new();
        scene.draw(&mut first, &mut Gizmos::new());
        let positions = scene.point_light_positions().to_vec();
        let colours = scene.point_light_colours().to_vec();

        let mut second = DrawLog::new();
        scene.draw(&mut second, &mut Gizmos::new());

        assert_eq!(first, second);
        assert_eq!(scene.point_light_positions(), &positions[..]);
        assert_eq!(scene.point_light_colours(), &colours[..]);
    }

    #[test]
    fn test_only_first_four_lights_are_used() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        scene.add_object_instance(instance("cube", 0.0));
        scene.point_lights_mut().extend((0..5).map(light));

        let mut log = DrawLog::new();
        scene.draw(&mut log, &mut Gizmos::new());

        assert_eq!(scene.num_lights(), 4);
        let expected_positions: Vec<_> = (0..4).map(|i| light(i).position).collect();
        let expected_colours: Vec<_> = (0..4).map(|i| light(i).shader_colour()).collect();

        assert_eq!(scene.point_light_positions(), &expected_positions[..]);
        assert_eq!(log.uniform_values(names::NUM_LIGHTS), vec![&UniformValue::Int(4)]);
        assert_eq!(
            log.uniform_values(names::POINT_LIGHT_POSITIONS),
            vec![&UniformValue::Vec3Array(expected_positions)]
        );
        assert_eq!(
            log.uniform_values(names::POINT_LIGHT_COLOURS),
            vec![&UniformValue::Vec3Array(expected_colours)]
        );

        let fifth = light(4).position;
        for value in log.uniform_values(names::POINT_LIGHT_POSITIONS) {
            if let UniformValue::Vec3Array(positions) = value {
                assert!(!positions.contains(&fifth));
            }
        }
    }

    #[test]
    fn test_removed_lights_clear_from_arrays() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        scene.point_lights_mut().extend((0..2).map(light));
        scene.draw(&mut DrawLog::new(), &mut Gizmos::new());

        scene.point_lights_mut().pop();
        scene.draw(&mut DrawLog::new(), &mut Gizmos::new());
        assert_eq!(scene.num_lights(), 1);
        assert_eq!(scene.point_light_positions(), &[light(0).position][..]);
    }

    #[test]
    fn test_instances_draw_in_insertion_order() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        for name in ["first", "second", "third"] {
            scene.add_object_instance(instance(name, 0.0));
        }

        let mut log = DrawLog::new();
        scene.draw(&mut log, &mut Gizmos::new());
        assert_eq!(drawn_meshes(&log), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_remove_absent_instance_is_noop() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        let a = scene.add_object_instance(instance("a", 0.0));
        let b = scene.add_object_instance(instance("b", 1.0));
        let c = scene.add_object_instance(instance("c", 2.0));

        let removed = scene.remove_object_instance(b);
        assert_eq!(removed.map(|i| i.position()), Some(Vector3::new(1.0, 0.0, 0.0)));

        // second removal of the same id finds nothing
        assert!(scene.remove_object_instance(b).is_none());
        let ids: Vec<_> = scene.instances().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![a, c]);

        let mut log = DrawLog::new();
        scene.draw(&mut log, &mut Gizmos::new());
        assert_eq!(drawn_meshes(&log), vec!["a", "c"]);
    }

    #[test]
    fn test_instance_lookup_and_mutation() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        let id = scene.add_object_instance(instance("a", 0.0));

        scene
            .instance_mut(id)
            .expect("instance exists")
            .set_transform(cgmath::Matrix4::from_translation(Vector3::new(0.0, 5.0, 0.0)));
        assert_eq!(scene.instance(id).map(|i| i.position()), Some(Vector3::new(0.0, 5.0, 0.0)));
        assert_eq!(scene.instance_count(), 1);
    }

    #[test]
    fn test_gizmos_follow_flag() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        scene.point_lights_mut().extend((0..5).map(light));

        let mut gizmos = Gizmos::new();
        scene.draw(&mut DrawLog::new(), &mut gizmos);
        assert!(gizmos.is_empty());

        *scene.draw_point_lights_mut() = true;
        scene.draw(&mut DrawLog::new(), &mut gizmos);
        // every light gets a gizmo, including those past the cap
        assert_eq!(gizmos.primitives().len(), 5);
        match gizmos.primitives()[1] {
            GizmoPrimitive::Sphere { center, colour, .. } => {
                assert_eq!(center, light(1).position);
                assert_eq!(colour, Vector4::new(2.0, 1.0, 0.5, 1.0));
            }
            ref other => panic!("expected a sphere, got {:?}", other),
        }
    }

    #[test]
    fn test_update_drives_camera() {
        let sunlight = sun();
        let mut scene = Scene::new(camera(), (1280, 720), &sunlight, ambient());
        let forward = scene.camera().forward();

        let input = InputSnapshot::default().with_key(Key::Forward);
        scene.update(1.0, 123.0, &input);

        let moved = scene.camera().position() - Vector3::new(0.0, 3.0, 10.0);
        let expected = forward * 7.0;
        assert!((moved.x - expected.x).abs() < 1e-4);
        assert!((moved.y - expected.y).abs() < 1e-4);
        assert!((moved.z - expected.z).abs() < 1e-4);
    }

    #[test]
    fn test_sunlight_outlives_scene() {
        let sunlight = sun();
        {
            let scene = Scene::new(camera(), (1, 1), &sunlight, ambient());
            assert!(std::ptr::eq(scene.sunlight(), &sunlight));
        }
        assert_eq!(sunlight.colour, Vector3::new(1.0, 1.0, 1.0));
    }
}
