use crate::core::estimators::{EstimationResult, Termination};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
use strum_macros::{Display as StrumDisplay, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, StrumDisplay, IntoStaticStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EstimateMethod {
    MaximumLikelihood,
    /// The fit did not converge; adjusted figures are the naive ones.
    NaiveFallback,
}

/// Per-station line handed to the reporting side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub station: String,
    pub n: usize,
    pub n_censored: usize,
    /// Mean of every reading taken at face value.
    pub naive_mean: f64,
    /// Population standard deviation of every reading at face value.
    pub naive_sd: f64,
    pub adjusted_mean: f64,
    pub adjusted_sd: f64,
    pub change_from_naive: f64,
    pub log_likelihood: f64,
    pub converged: bool,
    pub method: EstimateMethod,
    pub iterations: usize,
    pub termination: Termination,
}

impl StationSummary {
    pub fn new(
        station: &str,
        n: usize,
        n_censored: usize,
        naive_mean: f64,
        naive_sd: f64,
        result: &EstimationResult,
    ) -> Self {
        let (adjusted_mean, adjusted_sd, method) = if result.converged {
            (result.mu, result.sigma, EstimateMethod::MaximumLikelihood)
        } else {
            (naive_mean, naive_sd, EstimateMethod::NaiveFallback)
        };
        Self {
            station: station.to_string(),
            n,
            n_censored,
            naive_mean,
            naive_sd,
            adjusted_mean,
            adjusted_sd,
            change_from_naive: adjusted_mean - naive_mean,
            log_likelihood: result.log_likelihood,
            converged: result.converged,
            method,
            iterations: result.iterations,
            termination: result.termination,
        }
    }
}

impl Display for StationSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{}: n={} ({} censored), naive={:.3}±{:.3}, adjusted={:.3}±{:.3} ({:+.3}), {}",
            self.station,
            self.n,
            self.n_censored,
            self.naive_mean,
            self.naive_sd,
            self.adjusted_mean,
            self.adjusted_sd,
            self.change_from_naive,
            self.method
        )
    }
}
