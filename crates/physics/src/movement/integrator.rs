//! Velocity updates from input, gravity and damping.

use glam::Vec3;

use super::config::ControllerConfig;
use super::state::{GroundState, InputIntent};

/// Horizontal projections shorter than this (squared) have no direction.
const MIN_HORIZONTAL_SQUARED: f32 = 1e-8;

/// Forward and side movement directions for a view direction.
///
/// Both are horizontal and unit length; `side` is `forward × up`, so it
/// points to the right. Returns `None` when the view is (nearly) vertical
/// and the horizontal heading is undefined.
pub fn horizontal_basis(view_forward: Vec3) -> Option<(Vec3, Vec3)> {
    let flat = Vec3::new(view_forward.x, 0.0, view_forward.z);
    if !(flat.length_squared() >= MIN_HORIZONTAL_SQUARED) {
        return None;
    }

    let forward = flat.normalize();
    let side = forward.cross(Vec3::Y);
    Some((forward, side))
}

/// Add the movement impulses for one sub-step and handle jumping.
///
/// Every held direction key contributes `direction * speed`; opposite keys
/// are added independently. A jump overwrites the vertical velocity and
/// only works from the ground.
pub fn apply_input(
    velocity: &mut Vec3,
    intent: &InputIntent,
    ground: GroundState,
    dt: f32,
    config: &ControllerConfig,
) {
    let grounded = ground.is_grounded();
    let speed = dt * config.move_speed(grounded);
    let keys = intent.keys;

    if let Some((forward, side)) = horizontal_basis(intent.view_forward) {
        if keys.forward {
            *velocity += forward * speed;
        }
        if keys.back {
            *velocity += forward * -speed;
        }
        if keys.left {
            *velocity += side * -speed;
        }
        if keys.right {
            *velocity += side * speed;
        }
    }

    if grounded && keys.jump {
        velocity.y = config.jump_speed;
    }
}

/// Apply gravity (airborne only) and exponential velocity decay.
///
/// Damping is `exp(-damping_rate * dt) - 1`, scaled by `air_damping_factor`
/// while airborne, and added as `velocity * damping`.
pub fn apply_gravity_and_damping(
    velocity: &mut Vec3,
    ground: GroundState,
    dt: f32,
    config: &ControllerConfig,
) {
    let mut damping = (-config.damping_rate * dt).exp() - 1.0;

    if !ground.is_grounded() {
        velocity.y -= config.gravity * dt;
        damping *= config.air_damping_factor;
    }

    *velocity += *velocity * damping;
}
