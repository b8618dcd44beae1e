//! Startup errors
//!
//! Only setup can fail. Per-frame work is best effort and never returns
//! an error to the host.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("no browser window")]
    NoWindow,

    #[error("no document")]
    NoDocument,

    #[error("canvas element #{0} not found")]
    NoCanvas(String),

    #[error("element #{0} is not a canvas")]
    NotACanvas(String),

    #[error("failed to create surface: {0}")]
    Surface(String),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(String),

    #[error("failed to create device: {0}")]
    Device(String),

    #[error("invalid tuning JSON: {0}")]
    TuningJson(#[from] serde_json::Error),

    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type AppResult<T> = Result<T, AppError>;
