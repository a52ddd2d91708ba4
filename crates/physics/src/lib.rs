//! Walkabout Physics
//!
//! A kinematic character controller for a first-person avatar walking through
//! static level geometry. The avatar is a vertical capsule; each rendered frame
//! is split into a fixed number of sub-steps, and every sub-step integrates
//! input, applies gravity and damping, moves the capsule and pushes it back out
//! of whatever it now overlaps.
//!
//! # Architecture
//!
//! - **Collision**: the capsule shape, contact results and the world geometry
//!   query (a parry3d-backed [`CollisionWorld`] or any other [`WorldGeometry`])
//! - **Movement**: configuration, input intent, the integrator, the collision
//!   resolver and the [`CharacterController`] that steps them
//!
//! ```text
//!  frame_dt ──► clamp ──► ÷ sub_steps ──┐
//!                                       ▼
//!   ┌──────────────── per sub-step ─────────────────┐
//!   │ sample input ─► integrate ─► gravity/damping  │
//!   │   ─► translate ─► resolve contact ─► publish  │
//!   │   ─► out-of-bounds check                      │
//!   └───────────────────────────────────────────────┘
//! ```

pub mod collision;
pub mod movement;

pub use collision::{Capsule, CollisionWorld, Contact, EmptyWorld, WorldError, WorldGeometry};
pub use movement::{
    CharacterController, ConfigError, ControllerConfig, GroundState, InputIntent, InputSampler,
    MoveKeys, Pose, ViewAngles,
};
