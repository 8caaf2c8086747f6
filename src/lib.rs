//! rust3d application library
//!
//! Configuration, input mapping and the window/render systems used by the
//! `rust3d` binary.

pub mod config;
pub mod input;
pub mod systems;
