//! Per-frame simulation step
//!
//! Host callbacks only queue [`InputEvent`]s. Once per animation frame the
//! driver hands the queue to [`step`], which applies the events in arrival
//! order and then integrates motion exactly once.

use glam::DVec3;

use super::physics::{PhysicsParams, device_to_world, integrate};
use super::smoothing::{Orientation, OrientationSample, smoothed_acceleration};
use super::state::{Screen, SimulationState};

/// Something the host observed since the previous frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// `deviceorientation` reading (degrees)
    Orientation(OrientationSample),
    /// `devicemotion` acceleration including gravity (device axes)
    Motion(DVec3),
    /// Debug overlay key
    ToggleDebug,
    /// Viewport resized or moved to another display
    Resize(Screen),
}

/// Everything a frame consumes
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Wall-clock time of this frame (ms)
    pub now_ms: f64,
    /// Events in arrival order
    pub events: Vec<InputEvent>,
}

/// Fold one event into the state and refresh its smoothed group
pub fn apply_event(state: &mut SimulationState, event: &InputEvent, kernel: &[f64]) {
    match *event {
        InputEvent::Orientation(sample) => {
            state.history.orientation.push(sample);
            state.orientation = Orientation::from_history(&state.history.orientation, kernel);
        }
        InputEvent::Motion(acceleration) => {
            state.history.acceleration.push(acceleration);
            state.acceleration = smoothed_acceleration(&state.history.acceleration, kernel);
        }
        InputEvent::ToggleDebug => {
            state.debug = !state.debug;
            log::info!("Debug overlay: {}", state.debug);
        }
        InputEvent::Resize(screen) => {
            state.screen = screen;
            log::info!(
                "Resized to {}x{} @{}x",
                screen.width,
                screen.height,
                screen.ratio
            );
        }
    }
}

/// Compute the next frame's state.
///
/// `dt` is the wall-clock gap since the previous frame in seconds. It is
/// not clamped: a stalled tab produces one large step.
pub fn step(
    state: &SimulationState,
    input: &FrameInput,
    kernel: &[f64],
    params: &PhysicsParams,
) -> SimulationState {
    let mut next = state.clone();

    for event in &input.events {
        apply_event(&mut next, event, kernel);
    }

    let dt = (input.now_ms - next.latest_ms) / 1000.0;
    next.motion = integrate(
        &next.motion,
        device_to_world(next.acceleration),
        dt,
        params,
    );
    next.latest_ms = input.now_ms;

    next
}
