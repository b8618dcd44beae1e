//! Simulation module
//!
//! All numeric game logic lives here. No rendering or platform dependencies:
//! - Terrain is generated once from a seeded RNG
//! - Sensor input only reaches the state through queued events
//! - A frame step is a function of (state, input, kernel, params)

pub mod physics;
pub mod smoothing;
pub mod state;
pub mod terrain;
pub mod tick;

pub use physics::{MotionState, PhysicsParams, device_to_world, gravity_compensated, integrate};
pub use smoothing::{
    MAX_SMOOTH_LENGTH, Orientation, OrientationSample, SampleHistory, gaussian_kernel, smooth,
    smoothed_acceleration,
};
pub use state::{Histories, Screen, SimulationState};
pub use terrain::{MAX_TERRAIN_DETAIL, Terrain, generate_trend};
pub use tick::{FrameInput, InputEvent, apply_event, step};
