// Sandbox action definitions and fixed bindings

use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Everything the user can do to the sandbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Drop a new crate at the spawn point
    SpawnBody,
    /// Throw everything away and start with one crate
    ResetScene,
    /// Increase gravity on every body
    RaiseGravity,
    /// Decrease gravity on every body (floored)
    LowerGravity,
    /// Swap gravity with the cached previous value
    ToggleGravity,
    /// Kick the crate nearest the cursor up or down
    NudgeVertical,
    /// Kick the crate nearest the cursor left or right
    NudgeHorizontal,
}

/// An input source (keyboard key or mouse button)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }

    /// Create a mouse button input source
    pub fn mouse(button: MouseButton) -> Self {
        Self::Mouse(button)
    }
}

/// The fixed binding table. The sandbox has no remapping; this is the whole
/// input surface.
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::Space), Action::SpawnBody),
        (InputSource::key(KeyCode::Enter), Action::ResetScene),
        (InputSource::key(KeyCode::ArrowUp), Action::RaiseGravity),
        (InputSource::key(KeyCode::ArrowDown), Action::LowerGravity),
        (InputSource::key(KeyCode::Backspace), Action::ToggleGravity),
        (InputSource::mouse(MouseButton::Left), Action::NudgeVertical),
        (InputSource::mouse(MouseButton::Right), Action::NudgeHorizontal),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_equality() {
        assert_eq!(Action::SpawnBody, Action::SpawnBody);
        assert_ne!(Action::SpawnBody, Action::ResetScene);
    }

    #[test]
    fn test_input_source_constructors() {
        assert_eq!(
            InputSource::key(KeyCode::Space),
            InputSource::Keyboard(KeyCode::Space)
        );
        assert_eq!(
            InputSource::mouse(MouseButton::Left),
            InputSource::Mouse(MouseButton::Left)
        );
    }

    #[test]
    fn test_default_bindings_cover_every_action() {
        let bindings = default_bindings();
        for action in [
            Action::SpawnBody,
            Action::ResetScene,
            Action::RaiseGravity,
            Action::LowerGravity,
            Action::ToggleGravity,
            Action::NudgeVertical,
            Action::NudgeHorizontal,
        ] {
            assert!(
                bindings.iter().any(|(_, bound)| *bound == action),
                "Action {:?} has no binding",
                action
            );
        }
    }

    #[test]
    fn test_nudges_bound_to_mouse() {
        let bindings = default_bindings();

        let vertical = bindings
            .iter()
            .find(|(_, action)| *action == Action::NudgeVertical);
        let horizontal = bindings
            .iter()
            .find(|(_, action)| *action == Action::NudgeHorizontal);

        assert!(matches!(
            vertical,
            Some((InputSource::Mouse(MouseButton::Left), _))
        ));
        assert!(matches!(
            horizontal,
            Some((InputSource::Mouse(MouseButton::Right), _))
        ));
    }

    #[test]
    fn test_no_duplicate_sources() {
        let bindings = default_bindings();
        let mut seen = std::collections::HashSet::new();
        for (source, _) in bindings {
            assert!(seen.insert(source), "Duplicate input source in bindings");
        }
    }
}
