//! Contact results and the world geometry query.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::capsule::Capsule;

/// Result of a capsule query that touched something.
///
/// Translating the capsule by `normal * depth` moves it out of the geometry.
/// A query that touches nothing returns `None` rather than a zero contact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unit push-out direction, pointing away from the surface.
    pub normal: Vec3,
    /// Overlap distance along `normal` (never negative).
    pub depth: f32,
}

impl Contact {
    /// Create a contact.
    pub fn new(normal: Vec3, depth: f32) -> Self {
        Self { normal, depth }
    }
}

/// Static geometry that can be queried with the avatar capsule.
///
/// Implementations must be deterministic: the same capsule against the same
/// geometry always yields the same answer. Geometry is read-only during a
/// query, so it may be shared with other readers such as a renderer.
pub trait WorldGeometry {
    /// Intersect the capsule with the world.
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact>;
}

/// Geometry with nothing in it. Every query misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyWorld;

impl WorldGeometry for EmptyWorld {
    fn capsule_intersect(&self, _capsule: &Capsule) -> Option<Contact> {
        None
    }
}

impl<W: WorldGeometry + ?Sized> WorldGeometry for &W {
    fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        (**self).capsule_intersect(capsule)
    }
}
