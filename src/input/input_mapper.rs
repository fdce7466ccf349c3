//! Input mapping from raw events to semantic actions
//!
//! Maps keyboard and mouse input to high-level actions like CycleBackend and
//! Exit. The demo has no continuous input; every action is edge-triggered on
//! press.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Actions triggered by user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Advance to the next render backend (left click)
    CycleBackend,
    /// Exit application (Escape)
    Exit,
    /// Toggle fullscreen mode (F key)
    ToggleFullscreen,
    /// Regenerate the point cloud (R key)
    ReseedPoints,
}

/// Maps raw input events to semantic actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` on press for mapped keys, `None` otherwise
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        // Only handle key presses, not releases
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyF => Some(InputAction::ToggleFullscreen),
            KeyCode::KeyR => Some(InputAction::ReseedPoints),
            _ => None,
        }
    }

    /// Map mouse button to an action
    ///
    /// Returns `Some(CycleBackend)` for a left-button press
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<InputAction> {
        if button == MouseButton::Left && state == ElementState::Pressed {
            Some(InputAction::CycleBackend)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_cycles_backend() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::CycleBackend));
    }

    #[test]
    fn test_click_release_ignored() {
        let action = InputMapper::map_mouse_button(MouseButton::Left, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_right_click_ignored() {
        let action = InputMapper::map_mouse_button(MouseButton::Right, ElementState::Pressed);
        assert_eq!(action, None);
    }

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        for key in [KeyCode::KeyW, KeyCode::KeyA, KeyCode::Space] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyF, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ReseedPoints)
        );
    }
}
