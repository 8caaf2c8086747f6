//! rust3d - Software 3D Renderer
//!
//! Loads a scene of shape files and renders it on the CPU with a
//! keyboard-driven camera.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use rust3d::config::AppConfig;
use rust3d::input::{InputAction, InputMapper};
use rust3d::systems::{RenderError, RenderSystem, WindowSystem};
use rust3d_core::{Color, Scene, Shape};
use rust3d_input::CameraController;
use rust3d_render::Camera;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    /// World-space shapes, never modified after loading
    shapes: Vec<Shape>,
    background: Color,
    camera: Camera,
    controller: CameraController,
    last_frame: std::time::Instant,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let (scene, shapes) = Scene::load_shapes(&config.scene.path)
            .unwrap_or_else(|e| panic!("Failed to load scene '{}': {}", config.scene.path, e));

        log::info!(
            "Loaded scene '{}' with {} shapes, {} primitives",
            scene.name,
            shapes.len(),
            shapes.iter().map(Shape::len).sum::<usize>()
        );

        // A scene background takes priority over the configured one
        let background = scene.background_or(config.rendering.background());

        let camera = Camera::with_settings(
            config.camera.settings(),
            config.window.width,
            config.window.height,
        );

        let controller = CameraController::new()
            .with_mode(config.input.control_mode())
            .with_actions_per_second(config.input.actions_per_second);

        Self {
            config,
            window: None,
            render: None,
            shapes,
            background,
            camera,
            controller,
            last_frame: std::time::Instant::now(),
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::ResetCamera => {
                self.camera.reset();
                self.controller.clear();
                log::info!("Camera reset to starting position");
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::ToggleRenderMode => {
                if let Some(render) = &mut self.render {
                    render.toggle_mode();
                }
            }
            InputAction::ToggleControlMode => {
                self.controller.toggle_mode();
            }
        }
        self.request_redraw();
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = std::time::Instant::now();
        // Cap dt so a stall does not turn into one huge camera step
        let dt = (now - self.last_frame).as_secs_f32().min(1.0 / 30.0);
        self.last_frame = now;

        self.controller.update(&mut self.camera, dt);

        if self.config.debug.show_title_readout {
            if let Some(window) = &self.window {
                window.update_title(&self.camera.readout());
            }
        }

        let Some(render) = &mut self.render else {
            return;
        };

        match render.render_frame(&self.camera, &self.shapes) {
            Ok(stats) => {
                if self.config.debug.log_frame_stats {
                    log::debug!(
                        "{} primitives, {} culled, {} clipped, {} drawn, {} pixels",
                        stats.input_primitives,
                        stats.culled,
                        stats.clipped_away,
                        stats.drawn,
                        stats.pixels_written
                    );
                }
            }
            Err(RenderError::SurfaceLost) => render.recover_surface(),
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                event_loop.exit();
                return;
            }
            Err(e) => log::warn!("{}", e),
        }

        self.request_redraw();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = WindowSystem::create(event_loop, &self.config.window)
            .unwrap_or_else(|e| panic!("{}", e));

        let render = RenderSystem::new(
            window.window().clone(),
            &self.config.rendering,
            self.background,
            self.config.window.vsync,
        )
        .unwrap_or_else(|e| panic!("{}", e));

        let (width, height) = render.size();
        self.camera.resize(width, height);

        self.window = Some(window);
        self.render = Some(render);
        self.last_frame = std::time::Instant::now();
        self.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                self.camera.resize(physical_size.width, physical_size.height);
                self.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(key) = event.physical_key else {
                    return;
                };

                if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                    self.handle_action(action, event_loop);
                    return;
                }

                if event.repeat && event.state == ElementState::Pressed {
                    // Auto-repeat is ignored; continuous mode handles held keys
                    return;
                }

                if self.controller.process_keyboard(key, event.state) {
                    self.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("{}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting rust3d");

    let event_loop = EventLoop::new().unwrap_or_else(|e| panic!("Failed to create event loop: {}", e));
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
