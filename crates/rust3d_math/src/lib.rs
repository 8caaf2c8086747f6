//! Homogeneous 3D Mathematics Library
//!
//! This crate provides the vector, matrix and plane types for the rust3d
//! software renderer.
//!
//! ## Core Types
//!
//! - [`Vec4`] - Homogeneous vector with x, y, z, w components
//! - [`Mat4`] - 4x4 column-major matrix, manipulated through [`mat4`] functions
//! - [`Plane`] - Clip plane given by a point and a normal
//!
//! ## Primitives
//!
//! - [`Line`] - A segment between two points
//! - [`Triangle`] - Three points

mod vec4;
pub mod mat4;
pub mod plane;
pub mod primitive;

pub use vec4::Vec4;
pub use mat4::Mat4;
pub use plane::Plane;
pub use primitive::{Line, Triangle};
