//! A walkabout session - one avatar in one level.
//!
//! The host feeds raw input into a [`KeyboardInput`], calls
//! [`Session::frame`] once per rendered frame and places the camera at the
//! returned pose.

use walkabout_physics::{CharacterController, ControllerConfig, Pose, ViewAngles};

use crate::input::KeyboardInput;
use crate::level::Level;

/// An avatar walking through a level.
#[derive(Debug)]
pub struct Session {
    /// Rendered frames so far.
    pub frame: u64,

    /// Current level.
    pub level: Level,

    controller: CharacterController,
}

impl Session {
    /// Start a session with the avatar at the spawn point.
    pub fn new(config: ControllerConfig, level: Level) -> Self {
        log::info!(
            "starting session in '{}' ({} brushes)",
            level.name,
            level.collision.brush_count()
        );

        Self {
            frame: 0,
            level,
            controller: CharacterController::new(config),
        }
    }

    /// Advance one rendered frame.
    ///
    /// Pointer motion collected since the previous frame turns the view
    /// first; then the controller runs its sub-steps against the level.
    pub fn frame(&mut self, input: &mut KeyboardInput, frame_dt: f32) -> Pose {
        let (dx, dy) = input.take_pointer_delta();
        if dx != 0.0 || dy != 0.0 {
            self.controller.look(dx, dy);
        }

        let recoveries = self.controller.recoveries();
        let pose = self.controller.tick(&self.level.collision, input, frame_dt);
        self.frame += 1;

        if self.controller.recoveries() != recoveries {
            log::warn!(
                "frame {}: respawned in '{}' ({} total)",
                self.frame,
                self.level.name,
                self.controller.recoveries()
            );
        }

        pose
    }

    /// Drive the view from a tracked headset instead of the pointer.
    pub fn set_head_orientation(&mut self, view: ViewAngles) {
        self.controller.set_view(view);
    }

    /// Swap in a new level and respawn.
    pub fn change_level(&mut self, level: Level) {
        log::info!("changing level '{}' -> '{}'", self.level.name, level.name);
        self.level = level;
        self.controller.reset();
    }

    pub fn controller(&self) -> &CharacterController {
        &self.controller
    }

    pub fn pose(&self) -> Pose {
        self.controller.pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;
    use walkabout_physics::GroundState;

    const FRAME: f32 = 1.0 / 60.0;

    fn car_park_session() -> Session {
        Session::new(ControllerConfig::default(), Level::car_park())
    }

    #[test]
    fn test_session_creation() {
        let session = car_park_session();
        assert_eq!(session.frame, 0);
        assert_eq!(session.pose().head, Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn test_frame_advances_counter() {
        let mut session = car_park_session();
        let mut input = KeyboardInput::new();

        session.frame(&mut input, FRAME);
        session.frame(&mut input, FRAME);

        assert_eq!(session.frame, 2);
    }

    #[test]
    fn test_walk_in_car_park() {
        let mut session = car_park_session();
        let mut input = KeyboardInput::new();
        input.handle_key("KeyW", true);

        for _ in 0..60 {
            session.frame(&mut input, FRAME);
        }

        let pose = session.pose();
        assert!(
            pose.head.z < -2.0,
            "should have walked forward, head={:?}",
            pose.head
        );
        assert!((pose.head.y - 1.6).abs() < 0.05);
        assert_eq!(session.controller().ground(), GroundState::Grounded);
    }

    #[test]
    fn test_empty_level_respawns() {
        let mut session = Session::new(ControllerConfig::default(), Level::empty());
        let mut input = KeyboardInput::new();

        for _ in 0..200 {
            let pose = session.frame(&mut input, FRAME);
            assert!(pose.head.y > -25.0);
        }

        assert!(session.controller().recoveries() >= 1);
    }

    #[test]
    fn test_pointer_turns_view() {
        let mut session = car_park_session();
        let mut input = KeyboardInput::new();
        input.pointer_locked = true;
        input.handle_pointer_motion(100.0, 0.0);

        session.frame(&mut input, FRAME);

        // Moving the pointer right turns right (negative yaw)
        assert!((session.pose().orientation.yaw + 0.2).abs() < 1e-6);
        assert_eq!(input.take_pointer_delta(), (0.0, 0.0));
    }

    #[test]
    fn test_head_orientation_steers() {
        let mut session = car_park_session();
        let mut input = KeyboardInput::new();
        input.head_tracked = true;
        input.pointer_locked = true;
        input.handle_key("KeyW", true);
        session.set_head_orientation(ViewAngles::new(0.0, FRAC_PI_2));

        for _ in 0..30 {
            input.handle_pointer_motion(50.0, 50.0);
            session.frame(&mut input, FRAME);
        }

        let pose = session.pose();
        // Facing -X, pointer motion ignored
        assert!(pose.head.x < -0.5, "head={:?}", pose.head);
        assert!((pose.orientation.yaw - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_change_level_respawns() {
        let mut session = car_park_session();
        let mut input = KeyboardInput::new();
        input.handle_key("KeyW", true);
        for _ in 0..30 {
            session.frame(&mut input, FRAME);
        }

        session.change_level(Level::empty());

        assert_eq!(session.level.name, "empty");
        assert_eq!(session.pose().head, Vec3::new(0.0, 1.6, 0.0));
    }
}
