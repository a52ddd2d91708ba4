//! Level loading and management.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use walkabout_physics::{CollisionWorld, WorldError};

/// Errors raised while building a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("box {index} has invalid half extents {half_extents}")]
    InvalidBox { index: usize, half_extents: Vec3 },

    #[error("hull {index} is degenerate")]
    DegenerateHull { index: usize },

    #[error("mesh {index} is invalid: {source}")]
    Mesh {
        index: usize,
        #[source]
        source: WorldError,
    },
}

/// A level: a name and its static collision geometry.
#[derive(Debug)]
pub struct Level {
    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,
}

/// An axis-aligned box brush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxBrush {
    pub center: Vec3,
    pub half_extents: Vec3,
}

/// A convex hull brush, given by its point cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HullBrush {
    pub points: Vec<Vec3>,
}

/// A triangle mesh brush.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBrush {
    pub vertices: Vec<Vec3>,
    pub indices: Vec<[u32; 3]>,
}

/// On-disk description of a level's geometry.
///
/// ```json
/// {
///   "name": "courtyard",
///   "boxes": [{ "center": [0, -0.5, 0], "half_extents": [20, 0.5, 20] }],
///   "hulls": [],
///   "meshes": []
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDescription {
    pub name: String,
    pub boxes: Vec<BoxBrush>,
    pub hulls: Vec<HullBrush>,
    pub meshes: Vec<MeshBrush>,
}

impl Level {
    /// Create a level with no geometry.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            collision: CollisionWorld::new(),
        }
    }

    /// An unnamed level with no geometry. Everything falls through it.
    pub fn empty() -> Self {
        Self::new("empty")
    }

    /// Built-in two-deck car park for development.
    ///
    /// The ground deck is 40m square at y=0 with a perimeter wall. A ramp
    /// along the west side climbs to an upper deck 3m up, held by pillars.
    pub fn car_park() -> Self {
        let mut level = Self::new("Car Park");
        let world = &mut level.collision;

        // Ground deck
        world.add_box(Vec3::new(0.0, -0.5, 0.0), Vec3::new(20.0, 0.5, 20.0));

        // Perimeter walls (1.2m parapets)
        world.add_box(Vec3::new(0.0, 0.6, -20.25), Vec3::new(20.0, 0.6, 0.25));
        world.add_box(Vec3::new(0.0, 0.6, 20.25), Vec3::new(20.0, 0.6, 0.25));
        world.add_box(Vec3::new(-20.25, 0.6, 0.0), Vec3::new(0.25, 0.6, 20.0));
        world.add_box(Vec3::new(20.25, 0.6, 0.0), Vec3::new(0.25, 0.6, 20.0));

        // Upper deck over the north half
        world.add_box(Vec3::new(4.0, 2.85, -12.0), Vec3::new(12.0, 0.15, 8.0));

        // Ramp from the ground deck up to the upper deck's west edge
        let ramp = world.add_convex_hull(&[
            Vec3::new(-14.0, 0.0, 8.0),
            Vec3::new(-8.0, 0.0, 8.0),
            Vec3::new(-14.0, 0.0, -12.0),
            Vec3::new(-8.0, 0.0, -12.0),
            Vec3::new(-14.0, 3.0, -12.0),
            Vec3::new(-8.0, 3.0, -12.0),
        ]);
        debug_assert!(ramp.is_some(), "car park ramp hull is degenerate");

        // Pillars under the upper deck
        for x in [-4.0, 4.0, 12.0] {
            for z in [-18.0, -6.0] {
                world.add_box(Vec3::new(x, 1.35, z), Vec3::new(0.4, 1.35, 0.4));
            }
        }

        level
    }

    /// Build a level from a parsed description.
    pub fn from_description(description: &LevelDescription) -> Result<Self, LevelError> {
        let mut level = Self::new(&description.name);

        for (index, brush) in description.boxes.iter().enumerate() {
            let half_extents = brush.half_extents;
            if !half_extents.is_finite() || half_extents.min_element() <= 0.0 {
                return Err(LevelError::InvalidBox {
                    index,
                    half_extents,
                });
            }
            level.collision.add_box(brush.center, half_extents);
        }

        for (index, hull) in description.hulls.iter().enumerate() {
            level
                .collision
                .add_convex_hull(&hull.points)
                .ok_or(LevelError::DegenerateHull { index })?;
        }

        for (index, mesh) in description.meshes.iter().enumerate() {
            level
                .collision
                .add_triangle_mesh(&mesh.vertices, &mesh.indices)
                .map_err(|source| LevelError::Mesh { index, source })?;
        }

        Ok(level)
    }

    /// Parse a JSON level description.
    pub fn from_json_str(source: &str) -> Result<Self, LevelError> {
        let description: LevelDescription = serde_json::from_str(source)?;
        Self::from_description(&description)
    }

    /// Load a JSON level file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let level = Self::from_json_str(&source)?;

        log::info!(
            "loaded level '{}' from {} ({} brushes)",
            level.name,
            path.display(),
            level.collision.brush_count()
        );
        Ok(level)
    }

    /// Load a level, falling back to an empty one if anything goes wrong.
    ///
    /// With no geometry the avatar falls until the controller's
    /// out-of-bounds recovery respawns it.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(level) => level,
            Err(err) => {
                let path = path.as_ref();
                log::error!("could not load level {}: {err}", path.display());
                Self::empty()
            }
        }
    }
}
