//! GPU-backed [`DrawTarget`].
//!
//! Draw calls made while composing a frame are recorded here and replayed by
//! the render engine inside the scene render pass. Each draw captures a copy
//! of the current [`DrawUniforms`] block; the engine uploads all blocks into
//! one dynamic-offset uniform buffer.

use crate::gfx::{
    scene::mesh::{Mesh, MeshBuffers},
    shader::{ShaderProgram, UniformValue},
};

use super::{draw_target::DrawTarget, uniforms::DrawUniforms};

/// A draw ready for replay.
#[derive(Debug, Clone)]
pub struct RecordedDraw {
    pub program: String,
    pub uniforms: DrawUniforms,
    pub mesh: MeshBuffers,
}

#[derive(Debug, Default)]
pub struct FrameRecorder {
    program: Option<String>,
    uniforms: DrawUniforms,
    draws: Vec<RecordedDraw>,
    ignored_uniforms: usize,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything recorded so far; called at the start of each frame.
    pub fn reset(&mut self) {
        self.program = None;
        self.uniforms = DrawUniforms::default();
        self.draws.clear();
        self.ignored_uniforms = 0;
    }

    pub fn draws(&self) -> &[RecordedDraw] {
        &self.draws
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    /// Uniform submissions this frame that matched no field of the block.
    pub fn ignored_uniforms(&self) -> usize {
        self.ignored_uniforms
    }
}

impl DrawTarget for FrameRecorder {
    fn bind_program(&mut self, program: &ShaderProgram) {
        self.program = Some(program.name().to_owned());
        self.uniforms = DrawUniforms::default();
    }

    fn bind_uniform(&mut self, name: &str, value: UniformValue) {
        if !self.uniforms.set(name, &value) {
            log::trace!("ignoring uniform '{}'", name);
            self.ignored_uniforms += 1;
        }
    }

    fn draw_mesh(&mut self, mesh: &Mesh) {
        let Some(program) = self.program.clone() else {
            log::warn!("mesh '{}' drawn with no program bound", mesh.label());
            return;
        };
        let Some(buffers) = mesh.buffers() else {
            log::trace!("skipping uninitialized mesh '{}'", mesh.label());
            return;
        };

        self.draws.push(RecordedDraw {
            program,
            uniforms: self.uniforms,
            mesh: buffers,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::shader::names;

    #[test]
    fn test_unknown_uniforms_are_counted_not_stored() {
        let mut recorder = FrameRecorder::new();
        recorder.bind_program(&ShaderProgram::phong());
        recorder.bind_uniform("diffuse_texture", UniformValue::TextureSlot(0));
        recorder.bind_uniform(names::NUM_LIGHTS, UniformValue::Int(3));

        assert_eq!(recorder.ignored_uniforms(), 1);
        assert_eq!(recorder.uniforms.num_lights, 3);
    }

    #[test]
    fn test_uninitialized_meshes_are_skipped() {
        let mut recorder = FrameRecorder::new();
        recorder.bind_program(&ShaderProgram::phong());
        recorder.draw_mesh(&Mesh::new("never uploaded"));
        assert!(recorder.is_empty());
    }

    #[test]
    fn test_binding_a_program_resets_the_block() {
        let mut recorder = FrameRecorder::new();
        recorder.bind_program(&ShaderProgram::phong());
        recorder.bind_uniform(names::NUM_LIGHTS, UniformValue::Int(2));
        recorder.bind_program(&ShaderProgram::normals());

        assert_eq!(recorder.uniforms, DrawUniforms::default());
        assert_eq!(recorder.program.as_deref(), Some("normals"));
    }

    #[test]
    fn test_reset_clears_frame_state() {
        let mut recorder = FrameRecorder::new();
        recorder.bind_program(&ShaderProgram::phong());
        recorder.bind_uniform("bogus", UniformValue::Float(0.0));
        recorder.reset();

        assert!(recorder.program.is_none());
        assert_eq!(recorder.ignored_uniforms(), 0);
    }
}
