//! Error types for ftj-devices.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "barrier thickness {thickness:e} m is {cells:.3} unit cells; only 3, 4, 5 or 6 whole cells are calibrated"
    )]
    UnsupportedThickness { thickness: f64, cells: f64 },

    #[error("parameter {name} has invalid value: {value}")]
    InvalidValue { name: String, value: f64 },

    #[error("invalid device parameter: {0}")]
    InvalidParameter(String),

    #[error("malformed parameter JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
