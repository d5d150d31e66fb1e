pub mod error;
pub mod estimators;
pub mod observations;

pub use error::EstimationError;
