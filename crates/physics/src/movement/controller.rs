//! Character controller.
//!
//! This is the main entry point for avatar movement. It owns the capsule,
//! velocity, ground state and view, and advances them through the world in
//! fixed sub-steps once per rendered frame.

use glam::Vec3;

use crate::collision::{Capsule, WorldGeometry};

use super::config::ControllerConfig;
use super::integrator::{apply_gravity_and_damping, apply_input};
use super::resolver::resolve_collisions;
use super::state::{GroundState, InputIntent, InputSampler, Pose, ViewAngles};

/// Kinematic capsule controller for a first-person avatar.
///
/// # Example
///
/// ```ignore
/// let mut controller = CharacterController::new(ControllerConfig::default());
///
/// // Each rendered frame:
/// let pose = controller.tick(&world, &mut input, frame_dt);
/// camera.set(pose.head, pose.orientation.to_quat());
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController {
    config: ControllerConfig,
    capsule: Capsule,
    velocity: Vec3,
    ground: GroundState,
    view: ViewAngles,
    /// Head point published after the latest sub-step.
    anchor: Vec3,
    recoveries: u32,
}

impl CharacterController {
    /// Create a controller standing at the canonical spawn point.
    pub fn new(config: ControllerConfig) -> Self {
        let capsule = Capsule::spawn(config.radius, config.height);

        Self {
            anchor: capsule.end,
            capsule,
            velocity: Vec3::ZERO,
            ground: GroundState::Airborne,
            view: ViewAngles::default(),
            config,
            recoveries: 0,
        }
    }

    /// Create a controller with default configuration.
    pub fn with_default_config() -> Self {
        Self::new(ControllerConfig::default())
    }

    /// Advance one rendered frame.
    ///
    /// The frame time is clamped and split into `sub_steps` equal sub-steps;
    /// input is sampled at the start of each one.
    ///
    /// # Arguments
    ///
    /// * `world` - The static geometry to collide with
    /// * `input` - Input source, read once per sub-step
    /// * `frame_dt` - Real time since the previous frame in seconds
    pub fn tick<W, S>(&mut self, world: &W, input: &mut S, frame_dt: f32) -> Pose
    where
        W: WorldGeometry + ?Sized,
        S: InputSampler + ?Sized,
    {
        let sub_dt = self.config.sub_step_dt(frame_dt);

        for _ in 0..self.config.sub_steps {
            let intent = input.sample(&self.view);
            self.step(world, &intent, sub_dt);
        }

        self.pose()
    }

    /// Run a single sub-step of `dt` seconds.
    pub fn step<W: WorldGeometry + ?Sized>(
        &mut self,
        world: &W,
        intent: &InputIntent,
        dt: f32,
    ) {
        apply_input(&mut self.velocity, intent, self.ground, dt, &self.config);
        apply_gravity_and_damping(&mut self.velocity, self.ground, dt, &self.config);

        self.capsule.translate(self.velocity * dt);

        let ground = resolve_collisions(world, &mut self.capsule, &mut self.velocity, &self.config);
        if ground != self.ground {
            log::debug!(
                "ground state {:?} -> {:?} at {:?}",
                self.ground,
                ground,
                self.capsule.start
            );
        }
        self.ground = ground;

        self.anchor = self.capsule.end;
        self.recover_if_out_of_bounds();
    }

    /// Respawn if the head has fallen to or below the out-of-bounds floor.
    ///
    /// Returns whether a reset happened.
    pub fn recover_if_out_of_bounds(&mut self) -> bool {
        if self.anchor.y > self.config.oob_floor {
            return false;
        }

        log::warn!(
            "avatar fell out of bounds at {:?}, respawning (velocity {:?})",
            self.anchor,
            self.velocity
        );
        self.reset();
        self.recoveries += 1;
        true
    }

    /// Put the avatar back at the canonical spawn, at rest and facing forward.
    pub fn reset(&mut self) {
        self.capsule = Capsule::spawn(self.config.radius, self.config.height);
        self.velocity = Vec3::ZERO;
        self.ground = GroundState::Airborne;
        self.view = ViewAngles::default();
        self.anchor = self.capsule.end;
    }

    /// Turn the view by a pointer movement in pixels.
    ///
    /// Moving right turns right and moving down looks down.
    pub fn look(&mut self, dx: f32, dy: f32) {
        let sensitivity = self.config.mouse_sensitivity;
        self.view.look(-dx * sensitivity, -dy * sensitivity);
    }

    /// Replace the view with an absolute orientation, e.g. a tracked headset.
    pub fn set_view(&mut self, view: ViewAngles) {
        self.view = ViewAngles::new(view.pitch, view.yaw);
    }

    /// The published pose: head point and view orientation.
    pub fn pose(&self) -> Pose {
        Pose {
            head: self.anchor,
            orientation: self.view,
        }
    }

    /// Controller configuration.
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Current collision capsule.
    pub fn capsule(&self) -> &Capsule {
        &self.capsule
    }

    /// Current velocity (meters/second).
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Ground state from the latest sub-step.
    pub fn ground(&self) -> GroundState {
        self.ground
    }

    /// Current view orientation.
    pub fn view(&self) -> ViewAngles {
        self.view
    }

    /// How many times the avatar has been respawned.
    pub fn recoveries(&self) -> u32 {
        self.recoveries
    }
}

impl Default for CharacterController {
    fn default() -> Self {
        Self::with_default_config()
    }
}

// ============================================================================
// Tests
// ============================================================================
