//! Scene serialization
//!
//! A scene lists which shape files to place in the world, where to put each
//! copy, and what color to give it. Scenes are stored as RON files; the
//! geometry itself stays in the shape text format (see [`crate::loader`]).

use serde::{Serialize, Deserialize};
use std::collections::hash_map::{Entry, HashMap};
use std::path::{Path, PathBuf};
use std::fs;
use std::io;

use rust3d_math::Vec4;

use crate::loader::{load_shape, ShapeLoadError};
use crate::{Color, Shape};

/// One placed copy of a shape file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceTemplate {
    /// Shape file, relative to the scene file's directory
    pub shape: PathBuf,
    /// World-space offset [x, y, z]
    #[serde(default)]
    pub offset: [f32; 3],
    /// Fill color [r, g, b]
    #[serde(default)]
    pub color: Option<[u8; 3]>,
}

impl InstanceTemplate {
    pub fn new(shape: impl Into<PathBuf>) -> Self {
        Self {
            shape: shape.into(),
            offset: [0.0; 3],
            color: None,
        }
    }

    /// Builder: set the offset
    pub fn with_offset(mut self, x: f32, y: f32, z: f32) -> Self {
        self.offset = [x, y, z];
        self
    }

    /// Builder: set the color
    pub fn with_color(mut self, r: u8, g: u8, b: u8) -> Self {
        self.color = Some([r, g, b]);
        self
    }
}

/// A serializable scene of shape instances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Clear color [r, g, b]
    #[serde(default)]
    pub background: Option<[u8; 3]>,
    /// Placed shapes
    pub instances: Vec<InstanceTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: None,
            instances: Vec::new(),
        }
    }

    /// Builder: set the clear color
    pub fn with_background(mut self, r: u8, g: u8, b: u8) -> Self {
        self.background = Some([r, g, b]);
        self
    }

    /// Clear color, or `fallback` when the scene sets none
    pub fn background_or(&self, fallback: Color) -> Color {
        self.background.map(Color::from).unwrap_or(fallback)
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add an instance
    pub fn add_instance(&mut self, instance: InstanceTemplate) {
        self.instances.push(instance);
    }

    /// Load every referenced shape and place the instances
    ///
    /// Each shape file is read once; instances are deep copies of it moved
    /// by their offset.
    pub fn instantiate<P: AsRef<Path>>(&self, base_dir: P) -> Result<Vec<Shape>, SceneError> {
        let base_dir = base_dir.as_ref();
        let mut cache: HashMap<&Path, Shape> = HashMap::new();
        let mut shapes = Vec::with_capacity(self.instances.len());

        for instance in &self.instances {
            let base = match cache.entry(instance.shape.as_path()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let path = base_dir.join(&instance.shape);
                    let shape = load_shape(&path)
                        .map_err(|error| SceneError::Shape { path, error })?;
                    entry.insert(shape)
                }
            };

            let [x, y, z] = instance.offset;
            let mut shape = base.translated(Vec4::direction(x, y, z));
            if let Some(rgb) = instance.color {
                shape.set_color(Some(Color::from(rgb)));
            }
            shapes.push(shape);
        }

        log::info!(
            "Instantiated scene '{}': {} instances from {} shape files",
            self.name,
            shapes.len(),
            cache.len()
        );
        Ok(shapes)
    }

    /// Load a scene file and instantiate it relative to its own directory
    pub fn load_shapes<P: AsRef<Path>>(path: P) -> Result<(Scene, Vec<Shape>), SceneError> {
        let path = path.as_ref();
        let scene = Scene::load(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let shapes = scene.instantiate(base_dir)?;
        Ok((scene, shapes))
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error
    Io(io::Error),
    /// RON parse error
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error
    Io(io::Error),
    /// RON serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

/// Error building the shapes of a scene
#[derive(Debug)]
pub enum SceneError {
    /// The scene file itself could not be loaded
    Load(SceneLoadError),
    /// A referenced shape file failed to load
    Shape { path: PathBuf, error: ShapeLoadError },
}

impl From<SceneLoadError> for SceneError {
    fn from(e: SceneLoadError) -> Self {
        SceneError::Load(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::Load(e) => write!(f, "Scene load error: {}", e),
            SceneError::Shape { path, error } => {
                write!(f, "Shape {}: {}", path.display(), error)
            }
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Load(e) => Some(e),
            SceneError::Shape { error, .. } => Some(error),
        }
    }
}
