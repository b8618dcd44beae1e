//! Explicit Euler motion with friction and a floor
//!
//! Axes: x to the right, y down the screen, z up off the seabed.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::smoothing::Orientation;

/// Integrator constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsParams {
    /// Velocity damping
    pub friction: f64,
    /// Velocity to position scale
    pub speed: f64,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: crate::consts::FRICTION,
            speed: crate::consts::SPEED,
        }
    }
}

/// Kinematic state of the swimmer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Driving acceleration used by the last step
    pub acceleration: DVec3,
    pub velocity: DVec3,
    pub position: DVec3,
}

/// Advance one frame.
///
/// Velocity is updated first, then position with the new velocity and
/// the same `dt`. Vertical velocity is zeroed while resting on the floor
/// and position never goes below it. `dt` is taken as-is, however large.
pub fn integrate(
    state: &MotionState,
    acceleration: DVec3,
    dt: f64,
    params: &PhysicsParams,
) -> MotionState {
    let effective = acceleration - params.friction * state.velocity;

    let mut velocity = state.velocity + effective * dt;
    if state.position.z <= 0.0 {
        velocity.z = 0.0;
    }

    let mut position = state.position + params.speed * velocity * dt;
    position.z = position.z.max(0.0);

    MotionState {
        acceleration,
        velocity,
        position,
    }
}

/// Map device motion axes onto simulation axes.
///
/// The device reports y up the screen and z out of it; the simulation
/// draws y down and treats the seabed as the floor.
#[inline]
pub fn device_to_world(a: DVec3) -> DVec3 {
    DVec3::new(a.x, -a.y, -a.z)
}

/// Device acceleration with the gravity component removed, using the
/// smoothed orientation. Debug readout only: motion is driven by the raw
/// smoothed acceleration.
pub fn gravity_compensated(a: DVec3, orientation: &Orientation, gravity: f64) -> DVec3 {
    let (sin_b, cos_b) = orientation.beta.sin_cos();
    let (sin_c, cos_c) = orientation.gamma.sin_cos();
    DVec3::new(
        a.x - gravity * sin_c,
        a.y + gravity * sin_b * cos_c,
        a.z - gravity * cos_b * cos_c,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params() -> PhysicsParams {
        PhysicsParams {
            friction: 0.5,
            speed: 10.0,
        }
    }

    #[test]
    fn test_coasting_with_friction() {
        let state = MotionState {
            velocity: DVec3::new(1.0, 0.0, 0.0),
            ..Default::default()
        };
        let next = integrate(&state, DVec3::ZERO, 1.0, &params());
        assert_eq!(next.velocity, DVec3::new(0.5, 0.0, 0.0));
        assert_eq!(next.position, DVec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_floor_clamps_position() {
        let state = MotionState {
            velocity: DVec3::new(0.0, 0.0, -3.0),
            position: DVec3::new(0.0, 0.0, 0.5),
            ..Default::default()
        };
        let next = integrate(&state, DVec3::new(0.0, 0.0, -10.0), 1.0, &params());
        assert_eq!(next.position.z, 0.0);

        // Resting on the floor kills vertical velocity on the following step
        let after = integrate(&next, DVec3::new(0.0, 0.0, -10.0), 1.0, &params());
        assert_eq!(after.velocity.z, 0.0);
        assert_eq!(after.position.z, 0.0);
    }

    #[test]
    fn test_lift_off_needs_height() {
        // On the floor, upward acceleration cannot build vertical speed
        let grounded = MotionState::default();
        let next = integrate(&grounded, DVec3::new(0.0, 0.0, 5.0), 0.1, &params());
        assert_eq!(next.velocity.z, 0.0);
        assert_eq!(next.position.z, 0.0);

        // Above the floor it can
        let floating = MotionState {
            position: DVec3::new(0.0, 0.0, 1.0),
            ..Default::default()
        };
        let next = integrate(&floating, DVec3::new(0.0, 0.0, 5.0), 0.1, &params());
        assert!((next.velocity.z - 0.5).abs() < 1e-12);
        assert!(next.position.z > 1.0);
    }

    #[test]
    fn test_large_dt_is_not_substepped() {
        let state = MotionState {
            velocity: DVec3::new(2.0, 0.0, 0.0),
            ..Default::default()
        };
        // friction * dt > 1 overshoots and flips the sign: accepted
        let next = integrate(&state, DVec3::ZERO, 4.0, &params());
        assert_eq!(next.velocity.x, -2.0);
        assert_eq!(next.position.x, -80.0);
    }

    #[test]
    fn test_device_to_world() {
        let a = device_to_world(DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(a, DVec3::new(1.0, -2.0, -3.0));
    }

    #[test]
    fn test_gravity_compensation_flat_device() {
        // Lying flat, the accelerometer reads +g on z
        let flat = Orientation::default();
        let a = gravity_compensated(DVec3::new(0.0, 0.0, 9.0), &flat, 9.0);
        assert!(a.length() < 1e-12);
    }

    #[test]
    fn test_gravity_compensation_tilted() {
        let tilted = Orientation {
            gamma: std::f64::consts::FRAC_PI_2,
            ..Default::default()
        };
        let a = gravity_compensated(DVec3::ZERO, &tilted, 9.0);
        assert!((a.x + 9.0).abs() < 1e-12);
        assert!(a.y.abs() < 1e-12);
        assert!(a.z.abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_integrate_is_pure(
            ax in -20.0f64..20.0, ay in -20.0f64..20.0, az in -20.0f64..20.0,
            vx in -5.0f64..5.0, vz in -5.0f64..5.0,
            pz in -1.0f64..5.0,
            dt in 0.0f64..0.5,
        ) {
            let state = MotionState {
                velocity: DVec3::new(vx, 0.0, vz),
                position: DVec3::new(0.0, 0.0, pz),
                ..Default::default()
            };
            let a = DVec3::new(ax, ay, az);
            let first = integrate(&state, a, dt, &params());
            let second = integrate(&state, a, dt, &params());
            prop_assert_eq!(first, second);
            prop_assert!(first.position.z >= 0.0);
            if pz <= 0.0 {
                prop_assert_eq!(first.velocity.z, 0.0);
            }
        }
    }
}
