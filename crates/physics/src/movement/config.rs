//! Controller configuration constants.
//!
//! All tuning values are grouped here. The defaults reproduce the classic
//! "walk around the car park" feel: snappy on the ground, floaty in the air.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a [`ControllerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration for the character controller.
///
/// All values use metric units (meters, seconds) unless otherwise noted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Avatar Dimensions
    // ========================================================================
    /// Capsule radius (meters).
    pub radius: f32,

    /// Height of the head point above the feet (meters).
    pub height: f32,

    // ========================================================================
    // Movement
    // ========================================================================
    /// Impulse per second of held movement key while grounded.
    pub ground_speed: f32,

    /// Impulse per second of held movement key while airborne.
    pub air_speed: f32,

    /// Vertical speed set by a jump (meters/second).
    pub jump_speed: f32,

    /// Gravity acceleration (meters/second²).
    pub gravity: f32,

    /// Exponential decay rate of velocity while grounded (1/second).
    pub damping_rate: f32,

    /// Fraction of the grounded damping that still applies in the air.
    pub air_damping_factor: f32,

    // ========================================================================
    // Stepping
    // ========================================================================
    /// Fixed number of sub-steps per rendered frame.
    pub sub_steps: u32,

    /// Longest frame delta that is simulated (seconds). Longer stalls are
    /// clamped to this.
    pub max_frame_dt: f32,

    /// Contacts shallower than this are not pushed out (meters).
    pub min_penetration: f32,

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Head height at or below which the avatar is respawned (meters).
    pub oob_floor: f32,

    // ========================================================================
    // Look
    // ========================================================================
    /// Pointer look sensitivity (radians per pixel).
    pub mouse_sensitivity: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            radius: 0.35,
            height: 1.6,

            ground_speed: 25.0,
            air_speed: 8.0,
            jump_speed: 15.0,
            gravity: 30.0,
            damping_rate: 4.0,
            air_damping_factor: 0.1,

            sub_steps: 5,
            max_frame_dt: 0.05,
            min_penetration: 1e-10,

            oob_floor: -25.0,

            mouse_sensitivity: 0.002,
        }
    }
}

impl ControllerConfig {
    /// Parse a TOML document. Keys that are absent keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded controller config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is usable by the controller.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("radius", self.radius),
            ("height", self.height),
            ("ground_speed", self.ground_speed),
            ("air_speed", self.air_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("damping_rate", self.damping_rate),
            ("air_damping_factor", self.air_damping_factor),
            ("max_frame_dt", self.max_frame_dt),
            ("min_penetration", self.min_penetration),
            ("oob_floor", self.oob_floor),
            ("mouse_sensitivity", self.mouse_sensitivity),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(invalid(field, format!("{value} is not finite")));
            }
        }

        let non_negative = [
            ("ground_speed", self.ground_speed),
            ("air_speed", self.air_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("damping_rate", self.damping_rate),
            ("min_penetration", self.min_penetration),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(field, format!("{value} must not be negative")));
            }
        }

        if self.sub_steps == 0 {
            return Err(invalid(
                "sub_steps",
                "at least one sub-step is required".into(),
            ));
        }
        if self.radius <= 0.0 {
            return Err(invalid(
                "radius",
                format!("{} must be positive", self.radius),
            ));
        }
        if self.height <= self.radius {
            return Err(invalid(
                "height",
                format!("{} must exceed the radius {}", self.height, self.radius),
            ));
        }
        if self.max_frame_dt <= 0.0 {
            return Err(invalid(
                "max_frame_dt",
                format!("{} must be positive", self.max_frame_dt),
            ));
        }
        if !(0.0..=1.0).contains(&self.air_damping_factor) {
            return Err(invalid(
                "air_damping_factor",
                format!("{} must be within 0..=1", self.air_damping_factor),
            ));
        }

        Ok(())
    }

    /// Duration of one sub-step for a frame that took `frame_dt` seconds.
    ///
    /// The frame delta is clamped to `0..=max_frame_dt`, so an infinite stall
    /// runs a full `max_frame_dt`. NaN counts as no time at all.
    pub fn sub_step_dt(&self, frame_dt: f32) -> f32 {
        // f32::max returns the other operand for NaN
        let frame_dt = frame_dt.max(0.0).min(self.max_frame_dt);
        frame_dt / self.sub_steps as f32
    }

    /// Movement impulse per second for the given ground state.
    pub fn move_speed(&self, grounded: bool) -> f32 {
        if grounded {
            self.ground_speed
        } else {
            self.air_speed
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ControllerConfig::default();
        assert_eq!(config.gravity, 30.0);
        assert_eq!(config.sub_steps, 5);
        assert_eq!(config.oob_floor, -25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_move_speed() {
        let config = ControllerConfig::default();
        assert_eq!(config.move_speed(true), 25.0);
        assert_eq!(config.move_speed(false), 8.0);
    }

    #[test]
    fn test_sub_step_dt_clamps_stalls() {
        let config = ControllerConfig::default();
        assert_eq!(config.sub_step_dt(0.5), 0.05 / 5.0);
        assert_eq!(config.sub_step_dt(0.02), 0.02 / 5.0);
        assert_eq!(config.sub_step_dt(-1.0), 0.0);
        assert_eq!(config.sub_step_dt(f32::NEG_INFINITY), 0.0);
        assert_eq!(config.sub_step_dt(f32::NAN), 0.0);
        assert_eq!(config.sub_step_dt(f32::INFINITY), 0.05 / 5.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ControllerConfig::from_toml_str("gravity = 9.81\nsub_steps = 8\n")
            .expect("valid toml");

        assert_eq!(config.gravity, 9.81);
        assert_eq!(config.sub_steps, 8);
        assert_eq!(config.jump_speed, 15.0);
    }

    fn rejected_field(source: &str) -> Option<&'static str> {
        match ControllerConfig::from_toml_str(source) {
            Err(ConfigError::Invalid { field, .. }) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert_eq!(rejected_field("sub_steps = 0"), Some("sub_steps"));
        assert_eq!(rejected_field("radius = 2\nheight = 1"), Some("height"));
        assert_eq!(rejected_field("radius = -0.1"), Some("radius"));
        assert_eq!(rejected_field("gravity = -30.0"), Some("gravity"));
        assert_eq!(
            rejected_field("air_damping_factor = 1.5"),
            Some("air_damping_factor")
        );
        assert_eq!(rejected_field("gravity = 9.81"), None);
    }

    #[test]
    fn test_malformed_toml() {
        let err = ControllerConfig::from_toml_str("gravity = \"heavy\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("controller.toml");
        fs::write(&path, "jump_speed = 12.0\n").expect("write config");

        let config = ControllerConfig::load(&path).expect("load config");
        assert_eq!(config.jump_speed, 12.0);

        let missing = ControllerConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
