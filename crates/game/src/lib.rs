//! Walkabout Game
//!
//! Everything around the movement core that a host needs to walk an avatar
//! through a level:
//!
//! - Level loading (built-in car park or JSON brush descriptions)
//! - Keyboard and pointer input, sampled by the controller every sub-step
//! - A session tying the controller, level and input together per frame
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                       Session                        │
//! │  ┌──────────┐    ┌─────────────┐    ┌─────────────┐  │
//! │  │ Keyboard │───►│ Character   │───►│ Pose        │  │
//! │  │ Input    │    │ Controller  │    │ (head, view)│  │
//! │  └──────────┘    └──────┬──────┘    └─────────────┘  │
//! │                         │ capsule queries            │
//! │                  ┌──────▼──────┐                     │
//! │                  │ Level       │                     │
//! │                  └─────────────┘                     │
//! └──────────────────────────────────────────────────────┘
//! ```

pub mod input;
pub mod level;
pub mod session;

// Re-export main types
pub use input::{Key, KeyboardInput};
pub use level::{Level, LevelDescription, LevelError};
pub use session::Session;

// Re-export physics types for convenience
pub use walkabout_physics::{
    CharacterController, CollisionWorld, ControllerConfig, GroundState, Pose, ViewAngles,
};
