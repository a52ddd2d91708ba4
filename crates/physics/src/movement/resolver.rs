//! Contact resolution after the capsule has moved.
//!
//! One world query per sub-step. The contact normal decides the ground state,
//! walls and ceilings absorb the velocity going into them, and any overlap is
//! pushed out along the normal.

use glam::Vec3;

use crate::collision::{Capsule, Contact, WorldGeometry};

use super::config::ControllerConfig;
use super::state::GroundState;

/// Ground state implied by a contact: only upward-facing surfaces are floor.
pub fn classify_contact(contact: Option<&Contact>) -> GroundState {
    match contact {
        Some(contact) if contact.normal.y > 0.0 => GroundState::Grounded,
        _ => GroundState::Airborne,
    }
}

/// Remove the component of `velocity` along `normal`.
///
/// The result is tangent to the plane, so clipping it again against the same
/// normal changes nothing.
#[inline]
pub fn clip_velocity(velocity: Vec3, normal: Vec3) -> Vec3 {
    velocity - normal * normal.dot(velocity)
}

/// Query the world and correct the capsule and velocity.
///
/// Returns the new ground state. Floor contacts keep their velocity; only the
/// positional push-out applies to them.
pub fn resolve_collisions<W: WorldGeometry + ?Sized>(
    world: &W,
    capsule: &mut Capsule,
    velocity: &mut Vec3,
    config: &ControllerConfig,
) -> GroundState {
    let Some(contact) = world.capsule_intersect(capsule) else {
        return GroundState::Airborne;
    };

    let ground = classify_contact(Some(&contact));
    log::trace!(
        "contact normal={:?} depth={} -> {:?}",
        contact.normal,
        contact.depth,
        ground
    );

    if !ground.is_grounded() {
        *velocity = clip_velocity(*velocity, contact.normal);
    }

    if contact.depth >= config.min_penetration {
        capsule.translate(contact.normal * contact.depth);
    }

    ground
}
