//! Collision detection between the avatar capsule and static world geometry.
//!
//! # Key Types
//!
//! - [`Capsule`]: The avatar's swept-sphere collision volume
//! - [`Contact`]: Push-out normal and penetration depth from a query
//! - [`WorldGeometry`]: The capsule-intersection query the controller consumes
//! - [`CollisionWorld`]: Box, hull and triangle-mesh brushes backed by parry3d

mod capsule;
mod contact;
mod world;

pub use capsule::Capsule;
pub use contact::{Contact, EmptyWorld, WorldGeometry};
pub use world::{CollisionWorld, WorldError};
