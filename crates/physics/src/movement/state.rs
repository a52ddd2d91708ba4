//! Movement state and input structures.

use std::f32::consts::FRAC_PI_2;

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Whether the latest contact qualifies as walkable floor.
///
/// Re-evaluated once per sub-step from that sub-step's contact; there is no
/// memory beyond the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundState {
    /// Standing on an upward-facing surface.
    Grounded,
    /// Touching nothing, or only walls and ceilings.
    #[default]
    Airborne,
}

impl GroundState {
    /// Check if the avatar is on the ground.
    #[inline]
    pub fn is_grounded(self) -> bool {
        matches!(self, Self::Grounded)
    }
}

/// View orientation in radians.
///
/// Euler angles applied yaw first, then pitch. With both at zero the view
/// looks down -Z with +Y up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewAngles {
    /// Looking up (positive) or down (negative), within -PI/2..=PI/2.
    pub pitch: f32,
    /// Turning left (positive) or right (negative) around +Y.
    pub yaw: f32,
}

impl ViewAngles {
    /// Create view angles, clamping pitch to straight up/down.
    pub fn new(pitch: f32, yaw: f32) -> Self {
        Self {
            pitch: pitch.clamp(-FRAC_PI_2, FRAC_PI_2),
            yaw,
        }
    }

    /// Rotate the view. Pitch is clamped so the view never flips over.
    pub fn look(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Full look direction including pitch (unit length).
    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Orientation as a quaternion, for the renderer's camera.
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Movement keys held during a sub-step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl MoveKeys {
    /// Check if any key is held.
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right || self.jump
    }
}

/// Snapshot of what the player wants to do this sub-step.
///
/// `view_forward` is the direction the view is facing; only its horizontal
/// part steers movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    /// Held movement keys.
    pub keys: MoveKeys,
    /// Current view direction.
    pub view_forward: Vec3,
}

impl Default for InputIntent {
    fn default() -> Self {
        Self::idle()
    }
}

impl InputIntent {
    /// Create an intent from keys and a view direction.
    pub fn new(keys: MoveKeys, view_forward: Vec3) -> Self {
        Self { keys, view_forward }
    }

    /// Keys combined with the direction the given view faces.
    pub fn from_view(keys: MoveKeys, view: &ViewAngles) -> Self {
        Self::new(keys, view.forward())
    }

    /// No keys held, facing the canonical direction.
    pub fn idle() -> Self {
        Self::from_view(MoveKeys::default(), &ViewAngles::default())
    }
}

/// Source of input, read once at the start of every sub-step.
///
/// The sampler is handed the controller's current view so it can derive the
/// movement direction from it; a head-tracked source may ignore it.
pub trait InputSampler {
    /// Take the input snapshot for the next sub-step.
    fn sample(&mut self, view: &ViewAngles) -> InputIntent;
}

/// A fixed snapshot: every sub-step sees the same intent.
impl InputSampler for InputIntent {
    fn sample(&mut self, _view: &ViewAngles) -> InputIntent {
        *self
    }
}

/// Held keys steering along the controller's own view.
impl InputSampler for MoveKeys {
    fn sample(&mut self, view: &ViewAngles) -> InputIntent {
        InputIntent::from_view(*self, view)
    }
}

/// What the renderer reads after each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Head point of the capsule; the camera anchor.
    pub head: Vec3,
    /// View orientation.
    pub orientation: ViewAngles,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_ground_state_default_is_airborne() {
        assert_eq!(GroundState::default(), GroundState::Airborne);
        assert!(!GroundState::Airborne.is_grounded());
        assert!(GroundState::Grounded.is_grounded());
    }

    #[test]
    fn test_view_directions() {
        let mut view = ViewAngles::default();
        assert!(view.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));

        // Quarter turn left faces -X
        view.yaw = PI / 2.0;
        assert!(view.forward().abs_diff_eq(Vec3::NEG_X, 1e-6));

        // Looking straight up has no horizontal component
        let up = ViewAngles::new(PI, 0.0);
        assert_eq!(up.pitch, FRAC_PI_2);
        assert!(up.forward().abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn test_look_clamps_pitch() {
        let mut view = ViewAngles::default();
        view.look(0.5, 10.0);
        assert_eq!(view.pitch, FRAC_PI_2);
        assert_eq!(view.yaw, 0.5);

        view.look(0.0, -20.0);
        assert_eq!(view.pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_quat_matches_forward() {
        let view = ViewAngles::new(0.3, -1.1);
        let rotated = view.to_quat() * Vec3::NEG_Z;
        assert!(rotated.abs_diff_eq(view.forward(), 1e-5));
    }

    #[test]
    fn test_samplers() {
        let view = ViewAngles::new(0.0, PI);
        let keys = MoveKeys {
            forward: true,
            ..Default::default()
        };

        let mut snapshot = InputIntent::new(keys, Vec3::X);
        assert_eq!(snapshot.sample(&view).view_forward, Vec3::X);

        let mut held = keys;
        let intent = held.sample(&view);
        assert!(intent.keys.forward);
        assert!(intent.view_forward.abs_diff_eq(Vec3::Z, 1e-6));
    }
}
