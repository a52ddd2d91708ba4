//! Avatar movement.
//!
//! - Input intent and view orientation drive horizontal impulses and jumps
//! - Gravity and exponential damping, ten times weaker in the air
//! - One collision query per sub-step: floor contacts ground the avatar,
//!   wall and ceiling contacts absorb velocity, overlaps are pushed out
//! - Out-of-bounds recovery back to the spawn point
//!
//! # Design
//!
//! The [`CharacterController`] owns all mutable state. The host calls
//! [`CharacterController::tick`] once per rendered frame and reads the
//! resulting [`Pose`]; nothing else writes to the controller.

mod config;
mod controller;
pub mod integrator;
pub mod resolver;
mod state;

pub use config::{ConfigError, ControllerConfig};
pub use controller::CharacterController;
pub use state::{GroundState, InputIntent, InputSampler, MoveKeys, Pose, ViewAngles};
