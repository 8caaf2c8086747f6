//! Software Rendering Library
//!
//! This crate projects, clips and rasterizes shapes on the CPU and presents
//! the result through wgpu.
//!
//! ## Key Components
//!
//! - [`camera::Camera`] - Perspective camera with position and orientation
//! - [`clipping`] - Line and triangle clipping against planes
//! - [`raster::Framebuffer`] - Color and depth buffers with scanline fill
//! - [`pipeline::Pipeline`] - Per-frame geometry and raster stages
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`blit::BlitPipeline`] - Uploads and draws the framebuffer

pub mod camera;
pub mod clipping;
pub mod raster;
pub mod pipeline;
pub mod context;
pub mod blit;

pub use camera::{Camera, CameraSettings};
pub use pipeline::{DrawList, Drawable, FrameStats, Pipeline, RenderMode};
pub use raster::{DepthBuffer, Framebuffer, ScreenVertex};

// Re-export core types for convenience
pub use rust3d_core::{Color, Primitive, Shape};
pub use rust3d_math::{Line, Triangle, Vec4};
