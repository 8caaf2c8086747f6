//! Frame rendering system
//!
//! Manages:
//! - Render context and surface
//! - The CPU pipeline and its framebuffer
//! - Presenting the framebuffer through the blit pipeline

use std::sync::Arc;
use winit::window::Window;
use rust3d_core::{Color, Shape};
use rust3d_render::{
    blit::BlitPipeline,
    context::{ContextError, RenderContext},
    Camera, FrameStats, Framebuffer, Pipeline, RenderMode,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// The GPU context could not be created
    Init(ContextError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Init(e) => write!(f, "Render setup failed: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Init(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Init(e)
    }
}

impl From<wgpu::SurfaceError> for RenderError {
    fn from(e: wgpu::SurfaceError) -> Self {
        match e {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => RenderError::SurfaceLost,
            wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
            other => RenderError::Other(format!("{:?}", other)),
        }
    }
}

/// Renders frames on the CPU and presents them to the window
pub struct RenderSystem {
    context: RenderContext,
    blit: BlitPipeline,
    framebuffer: Framebuffer,
    pipeline: Pipeline,
}

impl RenderSystem {
    /// Create render system from window and config
    ///
    /// `background` is the clear color, which a scene may override.
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        background: Color,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        let (width, height) = (context.config.width, context.config.height);

        let blit = BlitPipeline::new(&context.device, context.config.format, width, height);
        let pipeline = Pipeline::new()
            .with_mode(render_config.mode)
            .with_background(background)
            .with_default_color(render_config.default_shape_color())
            .with_backface_culling(render_config.cull_backfaces);

        log::info!("Framebuffer {}x{}, {:?} mode", width, height, pipeline.mode);

        Ok(Self {
            context,
            blit,
            framebuffer: Framebuffer::new(width, height),
            pipeline,
        })
    }

    /// Handle window resize; zero sizes are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.framebuffer.resize(width, height);
        self.blit.ensure_size(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Switch between filled and wireframe, returning the new mode
    pub fn toggle_mode(&mut self) -> RenderMode {
        self.pipeline.mode = self.pipeline.mode.toggled();
        log::info!("Render mode: {:?}", self.pipeline.mode);
        self.pipeline.mode
    }

    /// Render a single frame
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        shapes: &[Shape],
    ) -> Result<FrameStats, RenderError> {
        let output = self.context.surface.get_current_texture()?;

        let stats = self.pipeline.render_frame(camera, shapes, &mut self.framebuffer);
        self.blit
            .upload(&self.context.device, &self.context.queue, &self.framebuffer);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        self.blit.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(stats)
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}
