//! Input mapping from raw events to application actions
//!
//! Camera keys (WASD, arrows, Space, Shift, Q/E, Z/C) are NOT mapped here.
//! They go directly to the CameraController.

use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Actions triggered by non-camera keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Exit application (Escape)
    Exit,
    /// Reset camera to its starting position and orientation (R)
    ResetCamera,
    /// Toggle fullscreen mode (F11)
    ToggleFullscreen,
    /// Switch between filled and wireframe rendering (Tab)
    ToggleRenderMode,
    /// Switch between per-press and held-key camera control (G)
    ToggleControlMode,
}

/// Maps raw key events to application actions
pub struct InputMapper;

impl InputMapper {
    /// Map keyboard input to an action
    ///
    /// Returns `Some(action)` on press of an application key, `None` for
    /// releases and camera keys.
    pub fn map_keyboard(key: KeyCode, state: ElementState) -> Option<InputAction> {
        if state != ElementState::Pressed {
            return None;
        }

        match key {
            KeyCode::Escape => Some(InputAction::Exit),
            KeyCode::KeyR => Some(InputAction::ResetCamera),
            KeyCode::F11 => Some(InputAction::ToggleFullscreen),
            KeyCode::Tab => Some(InputAction::ToggleRenderMode),
            KeyCode::KeyG => Some(InputAction::ToggleControlMode),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust3d_input::action_for_key;

    #[test]
    fn test_escape_exits() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Pressed);
        assert_eq!(action, Some(InputAction::Exit));
    }

    #[test]
    fn test_camera_keys_not_mapped() {
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::ArrowUp,
            KeyCode::KeyQ,
            KeyCode::KeyZ,
        ] {
            let action = InputMapper::map_keyboard(key, ElementState::Pressed);
            assert_eq!(action, None, "Key {:?} should not be mapped", key);
        }
    }

    #[test]
    fn test_no_overlap_with_camera_keys() {
        for key in [
            KeyCode::Escape,
            KeyCode::KeyR,
            KeyCode::F11,
            KeyCode::Tab,
            KeyCode::KeyG,
        ] {
            assert!(InputMapper::map_keyboard(key, ElementState::Pressed).is_some());
            assert_eq!(action_for_key(key), None, "Key {:?} is also a camera key", key);
        }
    }

    #[test]
    fn test_key_release_ignored() {
        let action = InputMapper::map_keyboard(KeyCode::Escape, ElementState::Released);
        assert_eq!(action, None);
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyR, ElementState::Pressed),
            Some(InputAction::ResetCamera)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::F11, ElementState::Pressed),
            Some(InputAction::ToggleFullscreen)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::Tab, ElementState::Pressed),
            Some(InputAction::ToggleRenderMode)
        );
        assert_eq!(
            InputMapper::map_keyboard(KeyCode::KeyG, ElementState::Pressed),
            Some(InputAction::ToggleControlMode)
        );
    }
}
