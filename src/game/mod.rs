// Sandbox game state: translates input actions into world operations

use log::info;

use crate::engine::input::{Action, InputManager};
use crate::engine::physics::{Bounds, World};

/// Fixed canvas width, in pixels
pub const CANVAS_WIDTH: f32 = 1280.0;

/// Fixed canvas height, in pixels
pub const CANVAS_HEIGHT: f32 = 1024.0;

/// The running sandbox: one world plus the control wiring around it.
pub struct Sandbox {
    world: World,
}

impl Sandbox {
    /// Create a sandbox with the fixed canvas and one starting crate.
    pub fn new() -> Self {
        Self {
            world: World::new(Bounds::new(CANVAS_WIDTH, CANVAS_HEIGHT)),
        }
    }

    /// Apply every action that fired since the last frame.
    ///
    /// Mouse nudges use the manager's latest cursor position, already in
    /// canvas coordinates.
    pub fn apply_input(&mut self, input: &InputManager) {
        if input.just_pressed(Action::SpawnBody) {
            self.world.spawn_body();
            info!("Spawned crate ({} total)", self.world.bodies().len());
        }
        if input.just_pressed(Action::ResetScene) {
            self.world.reset();
            info!("Scene reset");
        }
        if input.just_pressed(Action::RaiseGravity) {
            self.world.raise_gravity();
        }
        if input.just_pressed(Action::LowerGravity) {
            self.world.lower_gravity();
        }
        if input.just_pressed(Action::ToggleGravity) {
            self.world.toggle_gravity();
        }
        if input.just_pressed(Action::NudgeVertical) {
            self.world.nudge_vertical(input.cursor());
        }
        if input.just_pressed(Action::NudgeHorizontal) {
            self.world.nudge_horizontal(input.cursor());
        }
    }

    /// Status line shown at the top of the canvas.
    pub fn status_line(&self) -> String {
        format!(
            "Gravity: {:.2}   [Space] spawn  [Enter] reset  [Up/Down] gravity  [Backspace] toggle  [Click] nudge",
            self.world.first_gravity()
        )
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use winit::event::{ElementState, MouseButton};

    #[test]
    fn test_sandbox_starts_with_one_crate() {
        let sandbox = Sandbox::new();
        assert_eq!(sandbox.world().bodies().len(), 1);
    }

    #[test]
    fn test_status_line_shows_gravity() {
        let sandbox = Sandbox::new();
        assert!(sandbox.status_line().starts_with("Gravity: 1.00"));
    }

    #[test]
    fn test_status_line_tracks_gravity_changes() {
        let mut sandbox = Sandbox::new();
        sandbox.world_mut().raise_gravity();
        assert!(sandbox.status_line().starts_with("Gravity: 1.25"));
    }

    #[test]
    fn test_left_click_nudges_via_input_manager() {
        let mut sandbox = Sandbox::new();
        let mut input = InputManager::new();

        // Cursor above the spawn point, then a left click
        input.process_cursor_moved(Vec2::new(CANVAS_WIDTH / 2.0, 0.0));
        input.process_mouse_button(ElementState::Pressed, MouseButton::Left);

        sandbox.apply_input(&input);
        input.update();

        assert_eq!(sandbox.world().bodies()[0].velocity().y, 20.0);

        // The consumed edge does not fire again next frame
        sandbox.apply_input(&input);
        assert_eq!(sandbox.world().bodies()[0].velocity().y, 20.0);
    }

    #[test]
    fn test_right_click_nudges_horizontally() {
        let mut sandbox = Sandbox::new();
        let mut input = InputManager::new();

        // Cursor right of the spawn point pushes the crate left
        input.process_cursor_moved(Vec2::new(CANVAS_WIDTH, 50.0));
        input.process_mouse_button(ElementState::Pressed, MouseButton::Right);

        sandbox.apply_input(&input);
        input.update();

        assert_eq!(sandbox.world().bodies()[0].velocity().x, -20.0);
        assert_eq!(sandbox.world().bodies()[0].velocity().y, 0.0);
    }
}
