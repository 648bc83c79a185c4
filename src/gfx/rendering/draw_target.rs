//! The draw submission surface.
//!
//! Scene code talks to a [`DrawTarget`]: bind a program, submit named
//! uniforms, draw a mesh. [`FrameRecorder`](super::frame::FrameRecorder)
//! turns those calls into GPU work; [`DrawLog`] just records them.

use crate::gfx::{
    scene::mesh::Mesh,
    shader::{ShaderProgram, UniformValue},
};

pub trait DrawTarget {
    /// Makes `program` current for subsequent uniforms and draws.
    fn bind_program(&mut self, program: &ShaderProgram);

    /// Sets a uniform on the current program. Names the program does not
    /// declare are ignored.
    fn bind_uniform(&mut self, name: &str, value: UniformValue);

    /// Draws `mesh` with the current program and uniforms.
    fn draw_mesh(&mut self, mesh: &Mesh);
}

/// One recorded call on a [`DrawLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BindProgram(String),
    Uniform { name: String, value: UniformValue },
    DrawMesh {
        mesh: String,
        triangles: u32,
        indexed: bool,
    },
}

/// A [`DrawTarget`] that records every call in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawLog {
    commands: Vec<DrawCommand>,
}

impl DrawLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Uniform names in submission order.
    pub fn uniform_names(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Uniform { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Every value submitted under `name`, in order.
    pub fn uniform_values(&self, name: &str) -> Vec<&UniformValue> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Uniform { name: n, value } if n == name => Some(value),
                _ => None,
            })
            .collect()
    }

    pub fn draw_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::DrawMesh { .. }))
            .count()
    }
}

impl DrawTarget for DrawLog {
    fn bind_program(&mut self, program: &ShaderProgram) {
        self.commands
            .push(DrawCommand::BindProgram(program.name().to_owned()));
    }

    fn bind_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(DrawCommand::Uniform {
            name: name.to_owned(),
            value,
        });
    }

    fn draw_mesh(&mut self, mesh: &Mesh) {
        self.commands.push(DrawCommand::DrawMesh {
            mesh: mesh.label().to_owned(),
            triangles: mesh.triangle_count(),
            indexed: mesh.is_indexed(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_keeps_call_order() {
        let mut log = DrawLog::new();
        log.bind_program(&ShaderProgram::phong());
        log.bind_uniform("a", UniformValue::Int(1));
        log.bind_uniform("b", UniformValue::Float(2.0));
        log.bind_uniform("a", UniformValue::Int(3));
        log.draw_mesh(&Mesh::new("m"));

        assert_eq!(log.commands()[0], DrawCommand::BindProgram("phong".into()));
        assert_eq!(log.uniform_names(), vec!["a", "b", "a"]);
        assert_eq!(
            log.uniform_values("a"),
            vec![&UniformValue::Int(1), &UniformValue::Int(3)]
        );
        assert_eq!(log.draw_count(), 1);

        log.clear();
        assert!(log.commands().is_empty());
    }
}
