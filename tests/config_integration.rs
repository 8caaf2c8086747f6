//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use rust3d::config::AppConfig;
use rust3d_render::RenderMode;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("R3D_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("R3D_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_enum() {
    std::env::set_var("R3D_RENDERING__MODE", "wireframe");
    std::env::set_var("R3D_CAMERA__FOV", "60");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.rendering.mode, RenderMode::Wireframe);
    assert_eq!(config.camera.fov, 60.0);
    std::env::remove_var("R3D_RENDERING__MODE");
    std::env::remove_var("R3D_CAMERA__FOV");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("R3D_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    // Local overrides make the comparison meaningless
    if cwd.join("config/user.toml").exists() {
        return;
    }
    let config = AppConfig::load_from(cwd.join("config")).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.camera.start_position, defaults.camera.start_position);
    assert_eq!(config.input.actions_per_second, defaults.input.actions_per_second);
    assert_eq!(config.rendering.mode, defaults.rendering.mode);
    assert_eq!(config.scene.path, defaults.scene.path);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 720);
    assert_eq!(config.scene.path, "assets/scene.ron");
}
