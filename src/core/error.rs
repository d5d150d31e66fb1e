use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EstimationError {
    #[error("observation set is empty")]
    EmptyInput,

    #[error("observation {index} has invalid value {value} (must be finite and non-negative)")]
    InvalidObservation { index: usize, value: f64 },

    #[error("invalid starting point mu={mu}, sigma={sigma} (sigma must be finite and > 0)")]
    InvalidStartingPoint { mu: f64, sigma: f64 },
}
