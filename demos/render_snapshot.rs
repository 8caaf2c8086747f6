//! Render Snapshot
//!
//! Renders one frame of a scene without opening a window and writes it as
//! a binary PPM image.
//!
//! This example shows:
//! - Loading a scene and its shape files
//! - Configuring a Camera from code instead of config/default.toml
//! - Running the CPU pipeline into a Framebuffer
//!
//! Run with: `cargo run --example render_snapshot -- [scene.ron] [out.ppm] [wireframe]`

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rust3d_core::{Color, Scene};
use rust3d_render::{Camera, CameraSettings, Framebuffer, Pipeline, RenderMode};

const WIDTH: u32 = 720;
const HEIGHT: u32 = 720;

fn write_ppm(path: &Path, fb: &Framebuffer) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write!(out, "P6\n{} {}\n255\n", fb.width(), fb.height())?;
    for pixel in fb.pixels() {
        out.write_all(&pixel.rgb())?;
    }
    out.flush()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| "assets/scene.ron".to_string());
    let out_path = args.next().unwrap_or_else(|| "snapshot.ppm".to_string());
    let mode = match args.next().as_deref() {
        Some("wireframe") => RenderMode::Wireframe,
        _ => RenderMode::Filled,
    };

    let (scene, shapes) = match Scene::load_shapes(&scene_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("Failed to load scene '{}': {}", scene_path, e);
            std::process::exit(1);
        }
    };

    // Pulled back to fit the whole field
    let settings = CameraSettings {
        position: [-1.5, 0.0, -6.0],
        ..CameraSettings::default()
    };
    let camera = Camera::with_settings(settings, WIDTH, HEIGHT);

    let pipeline = Pipeline::new()
        .with_mode(mode)
        .with_background(scene.background_or(Color::BLACK));
    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let stats = pipeline.render_frame(&camera, &shapes, &mut fb);

    log::info!(
        "Rendered '{}': {} of {} primitives drawn, {} culled, {} pixels",
        scene.name,
        stats.drawn,
        stats.input_primitives,
        stats.culled,
        stats.pixels_written
    );

    if let Err(e) = write_ppm(Path::new(&out_path), &fb) {
        log::error!("Failed to write '{}': {}", out_path, e);
        std::process::exit(1);
    }
    log::info!("Wrote {}", out_path);
}
