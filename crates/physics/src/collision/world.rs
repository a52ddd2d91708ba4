//! Collision world containing all static level geometry.
//!
//! The world is a flat list of brushes. A capsule query walks every brush,
//! pushing a trial copy of the capsule out of each one it overlaps, and reports
//! the total push as a single [`Contact`].

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real};
use parry3d::query::contact;
use parry3d::shape::{Capsule as ParryCapsule, SharedShape};
use thiserror::Error;

use super::capsule::Capsule;
use super::contact::{Contact, WorldGeometry};

/// Below this squared length the accumulated push is treated as a touch.
const TOUCH_EPSILON_SQUARED: f32 = 1e-12;

/// Errors raised while adding geometry to the world.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("triangle mesh has no triangles")]
    EmptyMesh,

    #[error("triangle index {index} is out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("invalid triangle mesh: {0}")]
    InvalidMesh(String),
}

/// A piece of collision geometry in the world.
#[derive(Debug, Clone)]
pub struct CollisionBrush {
    /// Unique identifier for this brush.
    pub id: u32,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position and orientation in world space.
    pub transform: Isometry<Real>,
}

/// The static collision world.
///
/// Supports axis-aligned boxes, convex hulls and triangle meshes. The world
/// is never mutated while the controller queries it, so it can be shared
/// with rendering without synchronization.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    brushes: Vec<CollisionBrush>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box.
    ///
    /// # Arguments
    ///
    /// * `center` - Center position of the box in world space
    /// * `half_extents` - Half-size in each axis (x, y, z)
    pub fn add_box(&mut self, center: Vec3, half_extents: Vec3) -> u32 {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z);
        let transform = Isometry::translation(center.x, center.y, center.z);
        self.push_brush(shape, transform)
    }

    /// Add the convex hull of a point cloud.
    ///
    /// Returns `None` if the points are degenerate (coplanar, too few).
    pub fn add_convex_hull(&mut self, points: &[Vec3]) -> Option<u32> {
        let shape = SharedShape::convex_hull(&to_points(points))?;
        Some(self.push_brush(shape, Isometry::identity()))
    }

    /// Add a triangle mesh.
    ///
    /// # Arguments
    ///
    /// * `vertices` - Mesh vertex positions in world space
    /// * `indices` - Triangle indices (3 per triangle)
    pub fn add_triangle_mesh(
        &mut self,
        vertices: &[Vec3],
        indices: &[[u32; 3]],
    ) -> Result<u32, WorldError> {
        if indices.is_empty() {
            return Err(WorldError::EmptyMesh);
        }
        if let Some(&index) = indices
            .iter()
            .flatten()
            .find(|&&index| index as usize >= vertices.len())
        {
            return Err(WorldError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        let shape = SharedShape::trimesh(to_points(vertices), indices.to_vec())
            .map_err(|err| WorldError::InvalidMesh(format!("{err:?}")))?;

        Ok(self.push_brush(shape, Isometry::identity()))
    }

    /// Remove all collision geometry.
    pub fn clear(&mut self) {
        self.brushes.clear();
    }

    /// Get the number of collision brushes.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Check whether the world has no geometry at all.
    pub fn is_empty(&self) -> bool {
        self.brushes.is_empty()
    }

    fn push_brush(&mut self, shape: SharedShape, transform: Isometry<Real>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(CollisionBrush {
            id,
            shape,
            transform,
        });
        id
    }

    /// Outward normal and depth for one brush, if the trial capsule touches it.
    fn brush_penetration(
        &self,
        brush: &CollisionBrush,
        trial: &Capsule,
    ) -> Option<(Vec3, f32)> {
        let shape = ParryCapsule::new(to_point(trial.start), to_point(trial.end), trial.radius);

        match contact(
            &Isometry::identity(),
            &shape,
            &brush.transform,
            brush.shape.as_ref(),
            0.0,
        ) {
            Ok(Some(hit)) => {
                let normal = Vec3::new(hit.normal2.x, hit.normal2.y, hit.normal2.z);
                Some((normal, (-hit.dist).max(0.0)))
            }
            Ok(None) => None,
            Err(_) => {
                log::trace!("unsupported contact query against brush {}", brush.id);
                None
            }
        }
    }
}

impl WorldGeometry for CollisionWorld {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let mut trial = *capsule;
        let mut last_normal = None;

        for brush in &self.brushes {
            if let Some((normal, depth)) = self.brush_penetration(brush, &trial) {
                trial.translate(normal * depth);
                last_normal = Some(normal);
            }
        }

        let last_normal = last_normal?;
        let push = trial.center() - capsule.center();

        if push.length_squared() < TOUCH_EPSILON_SQUARED {
            return Some(Contact::new(last_normal, 0.0));
        }

        let depth = push.length();
        Some(Contact::new(push / depth, depth))
    }
}

fn to_point(v: Vec3) -> Point<Real> {
    Point::new(v.x, v.y, v.z)
}

fn to_points(vertices: &[Vec3]) -> Vec<Point<Real>> {
    vertices.iter().copied().map(to_point).collect()
}

// ============================================================================
// Tests
// ============================================================================
