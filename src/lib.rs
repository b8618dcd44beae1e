//! Dune Drift - a tilt-controlled toy over a procedurally generated seabed
//!
//! Core modules:
//! - `sim`: Terrain generation, sensor smoothing, physics and the frame step
//! - `renderer`: Scene numerics, tessellation and the WebGPU pipeline
//! - `hud`: Debug readout shown over the canvas
//! - `tuning`: Data-driven constants (JSON overrides)

pub mod error;
pub mod hud;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::AppError;
pub use hud::DebugReadout;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Number of raw sensor samples in each smoothing window
    pub const SMOOTH_LENGTH: usize = 8;
    /// Velocity damping (1/s)
    pub const FRICTION: f64 = 0.5;
    /// Gravity magnitude used by the debug readout only (m/s²)
    pub const GRAVITY: f64 = 9.0;
    /// Velocity to pixel scale
    pub const SPEED: f64 = 10.0;

    /// Midpoint displacement rounds (2^k + 1 samples)
    pub const TERRAIN_DETAIL: u32 = 4;
    /// Top of the sand band as a fraction of the viewport height
    pub const SAND_BASE: f64 = 0.8;
    /// Height of the sand band as a fraction of the viewport height
    pub const SAND_RELIEF: f64 = 0.1;

    /// Side of the square swimmer (logical pixels)
    pub const OBJECT_SIZE: f64 = 64.0;
    /// Number of animated light rays
    pub const LIGHT_RAYS: usize = 5;
}

/// Convert device degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Floor to one decimal place, as the debug overlay shows values
#[inline]
pub fn floor_tenth(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}
