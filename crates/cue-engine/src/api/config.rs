use serde::{Deserialize, Serialize};

use crate::core::resolver::ResolveParams;
use crate::core::time::FrameSubsteps;
use crate::error::ConfigError;

/// Tuning constants for the simulation. Every field has a default, so a JSON
/// file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Radius shared by every ball, in table units.
    pub ball_radius: f32,
    /// Physics substeps per rendered frame (default: 16).
    pub substeps: u32,
    /// Frame deltas above this are clamped before subdivision, in seconds.
    pub max_frame_dt: f32,
    /// Ball-ball coefficient of restitution, in (0, 1].
    pub restitution: f32,
    /// Speed-proportional friction coefficient (per second).
    pub friction_quadratic: f32,
    /// Constant rolling resistance (units per second squared).
    pub friction_linear: f32,
    /// Clearance added when separating, and size of degenerate nudges.
    pub epsilon: f32,
    /// Cap on position-resolution passes per substep.
    pub max_resolve_passes: u32,
    /// Longest drag honored when shooting; longer drags are clamped.
    pub max_drag: f32,
    /// Cue ball speed produced by a full-length drag.
    pub max_shot_speed: f32,
    /// Impact speed to playback volume factor.
    pub impact_volume_scale: f32,
    /// Seed for shuffling and degenerate-contact nudges.
    pub seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_radius: 2.0,
            substeps: 16,
            max_frame_dt: 0.25,
            restitution: 0.9,
            friction_quadratic: 0.5,
            friction_linear: 2.0,
            epsilon: 1e-4,
            max_resolve_passes: 1000,
            max_drag: 30.0,
            max_shot_speed: 1000.0,
            impact_volume_scale: 0.01,
            seed: 42,
        }
    }
}

impl PhysicsConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the step loop cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        }

        if self.ball_radius.is_nan() || self.ball_radius <= 0.0 {
            return invalid("ball_radius", "must be positive");
        }
        if self.substeps == 0 {
            return invalid("substeps", "must be at least 1");
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            return invalid("max_frame_dt", "must be positive");
        }
        if self.restitution.is_nan() || self.restitution <= 0.0 || self.restitution > 1.0 {
            return invalid("restitution", "must be in (0, 1]");
        }
        if self.friction_quadratic.is_nan()
            || self.friction_linear.is_nan()
            || self.friction_quadratic < 0.0
            || self.friction_linear < 0.0
        {
            return invalid("friction", "coefficients must not be negative");
        }
        if self.epsilon.is_nan() || self.epsilon <= 0.0 {
            return invalid("epsilon", "must be positive");
        }
        if self.max_resolve_passes == 0 {
            return invalid("max_resolve_passes", "must be at least 1");
        }
        if self.max_drag.is_nan() || self.max_drag <= 0.0 {
            return invalid("max_drag", "must be positive");
        }
        if self.max_shot_speed.is_nan() || self.max_shot_speed < 0.0 {
            return invalid("max_shot_speed", "must not be negative");
        }
        Ok(())
    }

    pub fn resolve_params(&self) -> ResolveParams {
        ResolveParams {
            radius: self.ball_radius,
            restitution: self.restitution,
            epsilon: self.epsilon,
            max_passes: self.max_resolve_passes,
        }
    }

    pub fn frame_substeps(&self) -> FrameSubsteps {
        FrameSubsteps::new(self.substeps, self.max_frame_dt)
    }
}
