// src/ui/lighting_panel.rs
//! Overlay panel for the scene's point lights, light gizmos and post effect.

use cgmath::Vector3;

use crate::gfx::{
    light::{PointLight, MAX_LIGHTS},
    rendering::PostEffect,
    scene::Scene,
};

/// Lights the panel lets the user create. More than [`MAX_LIGHTS`] are
/// allowed so the cut-off is visible.
pub const MAX_PANEL_LIGHTS: usize = 2 * MAX_LIGHTS;

/// Appends a white light on a ring around the origin, placed by index so
/// new lights don't stack. Returns false once [`MAX_PANEL_LIGHTS`] is reached.
pub fn add_default_light(lights: &mut Vec<PointLight>) -> bool {
    if lights.len() >= MAX_PANEL_LIGHTS {
        return false;
    }
    let angle = lights.len() as f32 * std::f32::consts::TAU / MAX_PANEL_LIGHTS as f32;
    lights.push(PointLight::new(
        Vector3::new(4.0 * angle.cos(), 2.0, 4.0 * angle.sin()),
        Vector3::new(1.0, 1.0, 1.0),
        1.0,
    ));
    true
}

/// Whether the light at `index` is among those passed to the shader.
pub fn reaches_shader(index: usize) -> bool {
    index < MAX_LIGHTS
}

/// Draws the lighting window.
///
/// Edits go straight into `scene`; the effect selection is written to
/// `post_effect` for the driver to forward to the renderer.
pub fn lighting_panel(ui: &imgui::Ui, scene: &mut Scene<'_>, post_effect: &mut PostEffect) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Lighting")
        .size([340.0, 480.0], imgui::Condition::FirstUseEver)
        .position([20.0, 20.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.checkbox("Show light gizmos", scene.draw_point_lights_mut());
            ui.separator();

            render_point_lights(ui, scene);
            ui.separator();

            ui.text("Post effect");
            for effect in PostEffect::ALL {
                ui.radio_button(effect.label(), post_effect, effect);
            }
        });
}

fn render_point_lights(ui: &imgui::Ui, scene: &mut Scene<'_>) {
    ui.text(format!(
        "Point lights: {} ({} lit)",
        scene.point_lights().len(),
        scene.num_lights()
    ));

    let mut remove = None;
    for (index, light) in scene.point_lights_mut().iter_mut().enumerate() {
        let _id = ui.push_id_usize(index);

        if reaches_shader(index) {
            ui.text(format!("Light {}", index));
        } else {
            ui.text_disabled(format!("Light {} (over the {} light limit)", index, MAX_LIGHTS));
        }

        let mut position: [f32; 3] = light.position.into();
        if ui.input_float3("Position", &mut position).build() {
            light.position = position.into();
        }

        let mut colour: [f32; 3] = light.colour.into();
        if ui.color_edit3("Colour", &mut colour) {
            light.colour = colour.into();
        }

        ui.slider("Intensity", 0.0, 10.0, &mut light.intensity);

        if ui.button("Remove") {
            remove = Some(index);
        }
        ui.spacing();
    }

    if let Some(index) = remove {
        scene.point_lights_mut().remove(index);
    }

    if scene.point_lights().len() < MAX_PANEL_LIGHTS {
        if ui.button("Add light") {
            add_default_light(scene.point_lights_mut());
        }
    } else {
        ui.text_disabled("Light list is full");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_default_light_stops_at_cap() {
        let mut lights = Vec::new();
        for _ in 0..MAX_PANEL_LIGHTS {
            assert!(add_default_light(&mut lights));
        }
        assert!(!add_default_light(&mut lights));
        assert_eq!(lights.len(), MAX_PANEL_LIGHTS);
    }

    #[test]
    fn test_new_lights_do_not_overlap() {
        let mut lights = Vec::new();
        add_default_light(&mut lights);
        add_default_light(&mut lights);
        assert_ne!(lights[0].position, lights[1].position);
        assert_eq!(lights[0].position.y, 2.0);
    }

    #[test]
    fn test_only_first_lights_reach_shader() {
        assert!(reaches_shader(0));
        assert!(reaches_shader(MAX_LIGHTS - 1));
        assert!(!reaches_shader(MAX_LIGHTS));
    }
}
