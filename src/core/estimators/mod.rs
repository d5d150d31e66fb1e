mod censored_normal_estimator;
mod estimation_result;
mod estimator_config;
mod start_guess;

pub use censored_normal_estimator::{CensoredNormalEstimator, censored_log_likelihood};
pub use estimation_result::{EstimationResult, Termination};
pub use estimator_config::EstimatorConfig;
pub use start_guess::{DEFAULT_START_MU, DEFAULT_START_SIGMA, StartGuess};
