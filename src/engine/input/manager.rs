// Input manager - maps raw winit events onto sandbox actions

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton};
use winit::keyboard::PhysicalKey;

use super::action::{default_bindings, Action, InputSource};

/// Tracks the edge-triggered action state plus the cursor position.
///
/// Every sandbox effect fires on a press edge, so the manager keeps a
/// `just_pressed` set that the frame drains and an `is_pressed` set for
/// completeness. Cursor positions are stored in canvas coordinates; the
/// caller converts from window space before feeding them in.
pub struct InputManager {
    bindings: HashMap<InputSource, Action>,
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    cursor: Vec2,
}

impl InputManager {
    /// Create a manager with the fixed default bindings.
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            cursor: Vec2::ZERO,
        }
    }

    /// Process a keyboard event from winit. Key repeats are ignored so a
    /// held key fires its action once.
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            if let Some(&action) = self.bindings.get(&source) {
                match event.state {
                    ElementState::Pressed => {
                        if !event.repeat {
                            self.press(action);
                        }
                    }
                    ElementState::Released => {
                        self.release(action);
                    }
                }
            }
        }
    }

    /// Process a mouse button event from winit.
    pub fn process_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        let source = InputSource::mouse(button);
        if let Some(&action) = self.bindings.get(&source) {
            match state {
                ElementState::Pressed => self.press(action),
                ElementState::Released => self.release(action),
            }
        }
    }

    /// Record the latest cursor position, already in canvas coordinates.
    pub fn process_cursor_moved(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Clear the per-frame press edges. Call once per frame after the
    /// actions have been applied.
    pub fn update(&mut self) {
        self.just_pressed.clear();
    }

    /// Check if an action fired this frame.
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action is currently held.
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Latest cursor position in canvas coordinates.
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
