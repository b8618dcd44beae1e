//! Simulation state owned by the frame driver
//!
//! Everything a frame reads or writes lives here. The terrain is generated
//! once and kept by the driver next to this state; it never changes.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::physics::MotionState;
use super::smoothing::{Orientation, OrientationSample, SampleHistory};

/// Viewport in logical (CSS) pixels plus the device pixel ratio
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f64,
    pub height: f64,
    pub ratio: f64,
}

impl Screen {
    pub fn new(width: f64, height: f64, ratio: f64) -> Self {
        Self {
            width,
            height,
            // Browsers without devicePixelRatio report 0
            ratio: if ratio > 0.0 { ratio } else { 1.0 },
        }
    }

    /// Backing store size in physical pixels
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width * self.ratio).round().max(1.0) as u32,
            (self.height * self.ratio).round().max(1.0) as u32,
        )
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new(800.0, 600.0, 1.0)
    }
}

/// Raw sample windows, one per signal group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histories {
    pub orientation: SampleHistory<OrientationSample>,
    pub acceleration: SampleHistory<DVec3>,
}

impl Histories {
    pub fn new(window: usize) -> Self {
        Self {
            orientation: SampleHistory::new(window),
            acceleration: SampleHistory::new(window),
        }
    }
}

/// Complete per-frame state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub screen: Screen,
    pub history: Histories,
    /// Smoothed orientation (radians)
    pub orientation: Orientation,
    /// Smoothed acceleration including gravity, device axes
    pub acceleration: DVec3,
    pub motion: MotionState,
    /// Wall-clock time of the previous frame (ms)
    pub latest_ms: f64,
    /// Debug overlay visible
    pub debug: bool,
}

impl SimulationState {
    /// Fresh state at rest with zero-filled histories
    pub fn new(screen: Screen, window: usize, now_ms: f64) -> Self {
        Self {
            screen,
            history: Histories::new(window),
            orientation: Orientation::default(),
            acceleration: DVec3::ZERO,
            motion: MotionState::default(),
            latest_ms: now_ms,
            debug: false,
        }
    }
}
