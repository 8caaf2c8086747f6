//! Camera Input Handling
//!
//! This crate maps keyboard input to the named camera operations.

mod camera_controller;

pub use camera_controller::{action_for_key, CameraAction, CameraControl, CameraController, ControlMode};
