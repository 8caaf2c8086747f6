//! Input handling module
//!
//! Maps raw key events to application actions. Camera keys go to the
//! `CameraController` instead.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
