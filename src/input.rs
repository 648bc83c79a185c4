//! Keyboard and mouse input.
//!
//! [`InputState`] accumulates winit events between frames. Once per frame the
//! driver takes an [`InputSnapshot`] from it and passes that into
//! `Scene::update`, so camera movement is a function of the snapshot alone.

use std::collections::HashSet;

use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Logical keys the demo reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Up,
    Down,
    Quit,
}

impl Key {
    /// Maps a physical key to its logical binding (WASD, Q/E, Escape).
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::KeyW => Some(Key::Forward),
            KeyCode::KeyS => Some(Key::Back),
            KeyCode::KeyA => Some(Key::Left),
            KeyCode::KeyD => Some(Key::Right),
            KeyCode::KeyE => Some(Key::Up),
            KeyCode::KeyQ => Some(Key::Down),
            KeyCode::Escape => Some(Key::Quit),
            _ => None,
        }
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(MouseButton::Left),
            winit::event::MouseButton::Right => Some(MouseButton::Right),
            winit::event::MouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Immutable view of the input for one update.
///
/// Mouse delta y is positive when the mouse moves up the screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    keys: HashSet<Key>,
    buttons: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
}

impl InputSnapshot {
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.buttons.contains(&button)
    }

    pub fn mouse_delta_x(&self) -> f32 {
        self.mouse_delta.0
    }

    pub fn mouse_delta_y(&self) -> f32 {
        self.mouse_delta.1
    }

    pub fn with_key(mut self, key: Key) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons.insert(button);
        self
    }

    pub fn with_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_delta = (dx, dy);
        self
    }
}

/// Accumulates input events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    keys: HashSet<Key>,
    buttons: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds a window event. Returns true if the event changed input state.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.apply_window_event(event, true)
    }

    /// Feeds a window event the UI consumed. Presses are dropped but
    /// releases still apply, so nothing pressed over the scene stays held.
    pub fn handle_captured_window_event(&mut self, event: &WindowEvent) -> bool {
        self.apply_window_event(event, false)
    }

    fn apply_window_event(&mut self, event: &WindowEvent, accept_presses: bool) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event, accept_presses),
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = MouseButton::from_winit(*button) else {
                    return false;
                };
                match state {
                    ElementState::Pressed => accept_presses && self.buttons.insert(button),
                    ElementState::Released => self.buttons.remove(&button),
                }
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                true
            }
            _ => false,
        }
    }

    /// Feeds a raw device event; only mouse motion is used.
    pub fn handle_device_event(&mut self, event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse_delta.0 += delta.0 as f32;
            // winit reports y growing downwards
            self.mouse_delta.1 -= delta.1 as f32;
        }
    }

    fn handle_key(&mut self, event: &KeyEvent, accept_presses: bool) -> bool {
        let PhysicalKey::Code(code) = event.physical_key else {
            return false;
        };
        let Some(key) = Key::from_key_code(code) else {
            return false;
        };
        match event.state {
            ElementState::Pressed => accept_presses && self.keys.insert(key),
            ElementState::Released => self.keys.remove(&key),
        }
    }

    pub fn press_key(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release_key(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Drops every held key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }

    /// Captures the current state for this frame's update.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            keys: self.keys.clone(),
            buttons: self.buttons.clone(),
            mouse_delta: self.mouse_delta,
        }
    }

    /// Clears per-frame accumulators. Call after the update has consumed the snapshot.
    pub fn end_frame(&mut self) {
        self.mouse_delta = (0.0, 0.0);
    }
}
