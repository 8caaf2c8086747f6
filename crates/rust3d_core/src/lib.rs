//! Core types for the rust3d renderer
//!
//! This crate provides the data the pipeline consumes:
//!
//! - [`Color`] - RGBA8 color, byte-compatible with the framebuffer
//! - [`Primitive`] - A line or triangle
//! - [`Shape`] - Ordered primitives with an optional color
//! - [`load_shape`] / [`parse_shape`] - The shape text format
//! - [`Scene`] - Loadable/saveable list of placed shape files

mod color;
mod shape;
pub mod loader;
mod scene;

pub use color::Color;
pub use shape::{Primitive, Shape};
pub use loader::{load_shape, parse_shape, ShapeLoadError};
pub use scene::{InstanceTemplate, Scene, SceneError, SceneLoadError, SceneSaveError};

// Re-export commonly used types from rust3d_math for convenience
pub use rust3d_math::{Line, Triangle, Vec4};
