//! Application systems
//!
//! Window and render state split out of main.rs.

mod render;
mod window;

pub use render::{RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
