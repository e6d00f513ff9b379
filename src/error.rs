//! Error types for scattering configuration and firing

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScatterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid incident energy: kinetic energy {kinetic} MeV must be positive")]
    InvalidIncidentEnergy { kinetic: f64 },

    #[error("Bad target selected: '{0}' (expected one of H1, H2, H3, He3)")]
    UnknownTarget(String),

    #[error("Track exceeded the step cap of {steps} steps")]
    StepLimitExceeded { steps: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScatterError>;
