//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`R3D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use rust3d_core::Color;
use rust3d_input::ControlMode;
use rust3d_render::{CameraSettings, RenderMode};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`R3D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // R3D_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("R3D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "rust3d".to_string(),
            width: 720,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting position [x, y, z]
    pub start_position: [f32; 3],
    /// Starting orientation [pitch, yaw, roll] in degrees
    pub start_rotation: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Narrowest field of view
    pub min_fov: f32,
    /// Widest field of view
    pub max_fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far plane (projection depth range)
    pub far: f32,
    /// Distance per movement step
    pub position_step: f32,
    /// Degrees per rotation step
    pub rotation_step: f32,
    /// Degrees of fov per zoom step
    pub fov_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            start_position: settings.position,
            start_rotation: settings.rotation,
            fov: settings.fov,
            min_fov: settings.min_fov,
            max_fov: settings.max_fov,
            near: settings.near,
            far: settings.far,
            position_step: settings.position_step,
            rotation_step: settings.rotation_step,
            fov_step: settings.fov_step,
        }
    }
}

impl CameraConfig {
    /// Camera parameters described by this section
    pub fn settings(&self) -> CameraSettings {
        CameraSettings {
            position: self.start_position,
            rotation: self.start_rotation,
            fov: self.fov,
            min_fov: self.min_fov,
            max_fov: self.max_fov,
            near: self.near,
            far: self.far,
            position_step: self.position_step,
            rotation_step: self.rotation_step,
            fov_step: self.fov_step,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Apply held keys every frame instead of once per key press
    pub continuous: bool,
    /// Steps per second for held keys in continuous mode
    pub actions_per_second: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            actions_per_second: 10.0,
        }
    }
}

impl InputConfig {
    pub fn control_mode(&self) -> ControlMode {
        if self.continuous {
            ControlMode::Continuous
        } else {
            ControlMode::Discrete
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Start in filled or wireframe mode
    pub mode: RenderMode,
    /// Background color [r, g, b], used when the scene sets none
    pub background_color: [u8; 3],
    /// Color for shapes without one [r, g, b]
    pub default_color: [u8; 3],
    /// Drop triangles facing away from the camera
    pub cull_backfaces: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            background_color: [255, 255, 255],
            default_color: [0, 0, 0],
            cull_backfaces: true,
        }
    }
}

impl RenderingConfig {
    pub fn background(&self) -> Color {
        Color::from(self.background_color)
    }

    pub fn default_shape_color(&self) -> Color {
        Color::from(self.default_color)
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene file to load at start-up
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "assets/scene.ron".to_string(),
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log per-frame pipeline counters at debug level
    pub log_frame_stats: bool,
    /// Show camera position and orientation in the window title
    pub show_title_readout: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_frame_stats: false,
            show_title_readout: true,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
