//! Keyboard camera controller
//!
//! Controls:
//! - W/S: Move front/back
//! - A/D: Move left/right
//! - Space/Shift: Move up/down
//! - Arrow keys: Look up/down/left/right
//! - Q/E: Rotate (roll) left/right
//! - Z/C: Zoom in/out

use winit::event::ElementState;
use winit::keyboard::KeyCode;

const ACTION_COUNT: usize = 14;

/// A named camera operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CameraAction {
    ZoomIn,
    ZoomOut,
    RotateLeft,
    RotateRight,
    LookUp,
    LookDown,
    LookLeft,
    LookRight,
    MoveFront,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
}

impl CameraAction {
    /// Every action, in declaration order
    pub const ALL: [CameraAction; ACTION_COUNT] = [
        CameraAction::ZoomIn,
        CameraAction::ZoomOut,
        CameraAction::RotateLeft,
        CameraAction::RotateRight,
        CameraAction::LookUp,
        CameraAction::LookDown,
        CameraAction::LookLeft,
        CameraAction::LookRight,
        CameraAction::MoveFront,
        CameraAction::MoveBack,
        CameraAction::MoveLeft,
        CameraAction::MoveRight,
        CameraAction::MoveUp,
        CameraAction::MoveDown,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Map a key to its camera action
pub fn action_for_key(key: KeyCode) -> Option<CameraAction> {
    let action = match key {
        KeyCode::KeyW => CameraAction::MoveFront,
        KeyCode::KeyS => CameraAction::MoveBack,
        KeyCode::KeyA => CameraAction::MoveLeft,
        KeyCode::KeyD => CameraAction::MoveRight,
        KeyCode::Space => CameraAction::MoveUp,
        KeyCode::ShiftLeft | KeyCode::ShiftRight => CameraAction::MoveDown,
        KeyCode::ArrowUp => CameraAction::LookUp,
        KeyCode::ArrowDown => CameraAction::LookDown,
        KeyCode::ArrowLeft => CameraAction::LookLeft,
        KeyCode::ArrowRight => CameraAction::LookRight,
        KeyCode::KeyQ => CameraAction::RotateLeft,
        KeyCode::KeyE => CameraAction::RotateRight,
        KeyCode::KeyZ => CameraAction::ZoomIn,
        KeyCode::KeyC => CameraAction::ZoomOut,
        _ => return None,
    };
    Some(action)
}

/// How key input turns into camera operations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    /// One operation per key press, applied with `delta_time = 1`
    #[default]
    Discrete,
    /// Every held key applies each frame, scaled by the frame time
    Continuous,
}

/// Camera controller for handling keyboard input
#[derive(Debug)]
pub struct CameraController {
    mode: ControlMode,
    held: [bool; ACTION_COUNT],
    pending: Vec<CameraAction>,

    /// Steps per second for held keys in continuous mode
    pub actions_per_second: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            mode: ControlMode::Discrete,
            held: [false; ACTION_COUNT],
            pending: Vec::new(),
            actions_per_second: 10.0,
        }
    }

    /// Process keyboard input
    ///
    /// Returns true if the key is a camera key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let Some(action) = action_for_key(key) else {
            return false;
        };

        let pressed = state == ElementState::Pressed;
        self.held[action.index()] = pressed;
        if pressed && self.mode == ControlMode::Discrete {
            self.pending.push(action);
        }
        true
    }

    /// Apply the input gathered since the last update
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32) {
        match self.mode {
            ControlMode::Discrete => {
                for action in self.pending.drain(..) {
                    camera.apply(action, 1.0);
                }
            }
            ControlMode::Continuous => {
                let delta_time = dt * self.actions_per_second;
                for action in CameraAction::ALL {
                    if self.held[action.index()] {
                        camera.apply(action, delta_time);
                    }
                }
            }
        }
    }

    /// Check if any camera key is held
    pub fn is_active(&self) -> bool {
        self.held.iter().any(|&held| held)
    }

    pub fn is_held(&self, action: CameraAction) -> bool {
        self.held[action.index()]
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Switch between discrete and continuous input
    pub fn toggle_mode(&mut self) -> ControlMode {
        self.mode = match self.mode {
            ControlMode::Discrete => ControlMode::Continuous,
            ControlMode::Continuous => ControlMode::Discrete,
        };
        self.pending.clear();
        log::info!("Camera input mode: {:?}", self.mode);
        self.mode
    }

    /// Release every key and drop queued presses
    pub fn clear(&mut self) {
        self.held = [false; ACTION_COUNT];
        self.pending.clear();
    }

    /// Builder: set the input mode
    pub fn with_mode(mut self, mode: ControlMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder: set the continuous-mode rate
    pub fn with_actions_per_second(mut self, rate: f32) -> Self {
        self.actions_per_second = rate;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    fn zoom_in(&mut self, delta_time: f32);
    fn zoom_out(&mut self, delta_time: f32);
    fn rotate_left(&mut self, delta_time: f32);
    fn rotate_right(&mut self, delta_time: f32);
    fn look_up(&mut self, delta_time: f32);
    fn look_down(&mut self, delta_time: f32);
    fn look_left(&mut self, delta_time: f32);
    fn look_right(&mut self, delta_time: f32);
    fn move_front(&mut self, delta_time: f32);
    fn move_back(&mut self, delta_time: f32);
    fn move_left(&mut self, delta_time: f32);
    fn move_right(&mut self, delta_time: f32);
    fn move_up(&mut self, delta_time: f32);
    fn move_down(&mut self, delta_time: f32);

    /// Dispatch a named action
    fn apply(&mut self, action: CameraAction, delta_time: f32) {
        match action {
            CameraAction::ZoomIn => self.zoom_in(delta_time),
            CameraAction::ZoomOut => self.zoom_out(delta_time),
            CameraAction::RotateLeft => self.rotate_left(delta_time),
            CameraAction::RotateRight => self.rotate_right(delta_time),
            CameraAction::LookUp => self.look_up(delta_time),
            CameraAction::LookDown => self.look_down(delta_time),
            CameraAction::LookLeft => self.look_left(delta_time),
            CameraAction::LookRight => self.look_right(delta_time),
            CameraAction::MoveFront => self.move_front(delta_time),
            CameraAction::MoveBack => self.move_back(delta_time),
            CameraAction::MoveLeft => self.move_left(delta_time),
            CameraAction::MoveRight => self.move_right(delta_time),
            CameraAction::MoveUp => self.move_up(delta_time),
            CameraAction::MoveDown => self.move_down(delta_time),
        }
    }
}
