//! Data-driven tuning
//!
//! Defaults reproduce the hand-tuned constants in [`crate::consts`]. A page
//! can override any subset through a JSON `data-tuning` attribute on the
//! canvas, e.g. `data-tuning='{"friction": 0.8, "seed": 42}'`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{AppError, AppResult};
use crate::sim::{MAX_SMOOTH_LENGTH, PhysicsParams};

/// Tunable simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Smoothing window length (samples)
    pub smooth_length: usize,
    /// Velocity damping
    pub friction: f64,
    /// Gravity for the debug readout
    pub gravity: f64,
    /// Velocity to pixel scale
    pub speed: f64,
    /// Terrain detail level k (2^k + 1 heights)
    pub terrain_detail: u32,
    /// Top of the sand band (fraction of viewport height)
    pub sand_base: f64,
    /// Sand band height (fraction of viewport height)
    pub sand_relief: f64,
    /// Terrain seed; random per page load when absent
    pub seed: Option<u64>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            smooth_length: SMOOTH_LENGTH,
            friction: FRICTION,
            gravity: GRAVITY,
            speed: SPEED,
            terrain_detail: TERRAIN_DETAIL,
            sand_base: SAND_BASE,
            sand_relief: SAND_RELIEF,
            seed: None,
        }
    }
}

impl Tuning {
    /// Parse overrides on top of the defaults and validate the result
    pub fn from_json(json: &str) -> AppResult<Self> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would violate simulation preconditions
    pub fn validate(&self) -> AppResult<()> {
        if self.smooth_length == 0 || self.smooth_length > MAX_SMOOTH_LENGTH {
            return Err(AppError::InvalidTuning(format!(
                "smooth_length must be in 1..={MAX_SMOOTH_LENGTH}"
            )));
        }
        if self.terrain_detail == 0 || self.terrain_detail > crate::sim::MAX_TERRAIN_DETAIL {
            return Err(AppError::InvalidTuning(format!(
                "terrain_detail must be in 1..={}",
                crate::sim::MAX_TERRAIN_DETAIL
            )));
        }
        let finite = [
            ("friction", self.friction),
            ("gravity", self.gravity),
            ("speed", self.speed),
            ("sand_base", self.sand_base),
            ("sand_relief", self.sand_relief),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(AppError::InvalidTuning(format!("{name} must be finite")));
        }
        if self.friction < 0.0 {
            return Err(AppError::InvalidTuning("friction must not be negative".into()));
        }
        Ok(())
    }

    pub fn physics(&self) -> PhysicsParams {
        PhysicsParams {
            friction: self.friction,
            speed: self.speed,
        }
    }
}
