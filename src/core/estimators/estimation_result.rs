use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

/// Why the likelihood search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Termination {
    Converged,
    /// The optimizer ran out of iterations.
    IterationLimit,
    /// `mu` or `sigma` left the sanity bound around the data.
    Diverged,
    /// `sigma` shrank toward zero; the likelihood is unbounded.
    Collapsed,
    /// Every observation is censored, so no finite maximum exists.
    AllCensored,
}

/// Outcome of one censored-normal fit.
///
/// When `converged` is `false`, `mu` and `sigma` echo the starting point
/// and `log_likelihood` is `-inf`; callers must branch on the flag before
/// trusting the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EstimationResult {
    pub mu: f64,
    pub sigma: f64,
    pub converged: bool,
    pub log_likelihood: f64,
    pub iterations: usize,
    pub termination: Termination,
}

impl EstimationResult {
    pub(crate) fn converged(mu: f64, sigma: f64, log_likelihood: f64, iterations: usize) -> Self {
        Self {
            mu,
            sigma,
            converged: true,
            log_likelihood,
            iterations,
            termination: Termination::Converged,
        }
    }

    pub(crate) fn failed(
        initial_mu: f64,
        initial_sigma: f64,
        iterations: usize,
        termination: Termination,
    ) -> Self {
        Self {
            mu: initial_mu,
            sigma: initial_sigma,
            converged: false,
            log_likelihood: f64::NEG_INFINITY,
            iterations,
            termination,
        }
    }
}
