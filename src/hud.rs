//! Debug readout
//!
//! Text shown over the canvas when the debug overlay is on. Values are
//! floored to one decimal; angles are shown in units of π.

use std::fmt;

use glam::DVec3;

use crate::floor_tenth;
use crate::sim::{SimulationState, gravity_compensated};

/// Snapshot of the numbers shown in the debug overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugReadout {
    /// alpha, beta, gamma in units of π
    pub orientation: DVec3,
    pub acceleration: DVec3,
    /// Acceleration with gravity removed (display only)
    pub linear_acceleration: DVec3,
    pub speed: DVec3,
    pub position: DVec3,
}

fn floor_vec(v: DVec3) -> DVec3 {
    DVec3::new(floor_tenth(v.x), floor_tenth(v.y), floor_tenth(v.z))
}

impl DebugReadout {
    pub fn from_state(state: &SimulationState, gravity: f64) -> Self {
        let o = &state.orientation;
        let orientation = DVec3::new(o.alpha, o.beta, o.gamma) / std::f64::consts::PI;
        Self {
            orientation: floor_vec(orientation),
            acceleration: floor_vec(state.acceleration),
            linear_acceleration: floor_vec(gravity_compensated(state.acceleration, o, gravity)),
            speed: floor_vec(state.motion.velocity),
            position: floor_vec(state.motion.position),
        }
    }
}

impl fmt::Display for DebugReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.orientation;
        writeln!(
            f,
            "Orientation: (alpha: {}pi, beta: {}pi, gamma: {}pi)",
            o.x, o.y, o.z
        )?;
        let rows = [
            ("Acceleration", self.acceleration),
            ("Acceleration (without gravity)", self.linear_acceleration),
            ("Speed", self.speed),
            ("Position", self.position),
        ];
        for (label, v) in rows {
            writeln!(f, "{label}: (x: {}, y: {}, z: {})", v.x, v.y, v.z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Orientation, Screen};

    #[test]
    fn test_readout_floors_values() {
        let mut state = SimulationState::new(Screen::default(), 8, 0.0);
        state.orientation = Orientation {
            absolute: false,
            alpha: std::f64::consts::PI,
            beta: std::f64::consts::FRAC_PI_2,
            gamma: 0.0,
        };
        state.acceleration = DVec3::new(1.26, -0.01, 9.0);
        state.motion.position = DVec3::new(12.34, 0.0, 0.0);

        let readout = DebugReadout::from_state(&state, 9.0);
        assert_eq!(readout.orientation, DVec3::new(1.0, 0.5, 0.0));
        assert_eq!(readout.acceleration, DVec3::new(1.2, -0.1, 9.0));
        assert_eq!(readout.position.x, 12.3);
    }

    #[test]
    fn test_readout_removes_gravity_for_flat_device() {
        let mut state = SimulationState::new(Screen::default(), 8, 0.0);
        state.acceleration = DVec3::new(0.0, 0.0, 9.0);
        let readout = DebugReadout::from_state(&state, 9.0);
        assert_eq!(readout.linear_acceleration, DVec3::ZERO);
    }

    #[test]
    fn test_readout_text() {
        let state = SimulationState::new(Screen::default(), 8, 0.0);
        let text = DebugReadout::from_state(&state, 9.0).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Orientation: (alpha: 0pi"));
        assert_eq!(lines[3], "Speed: (x: 0, y: 0, z: 0)");
    }
}
