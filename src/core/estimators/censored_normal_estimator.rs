use crate::core::error::EstimationError;
use crate::core::estimators::{EstimationResult, EstimatorConfig, Termination};
use crate::core::observations::ObservationSet;
use crate::optim::{NelderMead, Optimizer};
use crate::utils::math::{normal_log_pdf, normal_log_sf};

/// Maximum-likelihood fit of a normal population to right-censored data.
///
/// Exact readings contribute their log-density; censored readings
/// contribute the log upper-tail probability of the normal at their
/// value. The estimator holds only immutable configuration, so one
/// instance can be shared across stations and threads.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CensoredNormalEstimator {
    config: EstimatorConfig,
}

impl CensoredNormalEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Total log-likelihood of `observations` under `N(mu, sigma²)`.
    ///
    /// Returns `-inf` for `sigma <= 0` or non-finite parameters so an
    /// optimizer probing outside the domain can reject the point.
    pub fn log_likelihood(&self, mu: f64, sigma: f64, observations: &ObservationSet) -> f64 {
        censored_log_likelihood(mu, sigma, observations)
    }

    /// Maximizes the censored log-likelihood from `(initial_mu, initial_sigma)`.
    ///
    /// Non-convergence is not an error: it comes back as
    /// `converged == false` with the starting point echoed.
    pub fn estimate(
        &self,
        observations: &ObservationSet,
        initial_mu: f64,
        initial_sigma: f64,
    ) -> Result<EstimationResult, EstimationError> {
        if !initial_mu.is_finite() || !initial_sigma.is_finite() || initial_sigma <= 0.0 {
            return Err(EstimationError::InvalidStartingPoint {
                mu: initial_mu,
                sigma: initial_sigma,
            });
        }

        if observations.all_censored() {
            return Ok(EstimationResult::failed(
                initial_mu,
                initial_sigma,
                0,
                Termination::AllCensored,
            ));
        }

        let optimizer = NelderMead::new(
            self.config.max_iterations,
            self.config.x_tolerance,
            self.config.f_tolerance,
        );
        let outcome = optimizer.minimize(
            |p| -censored_log_likelihood(p[0], p[1], observations),
            [initial_mu, initial_sigma],
        );
        let [mu, sigma] = outcome.point;

        let scale = 1.0 + observations.max_abs_value();
        let termination = if sigma <= self.config.collapse_ratio * scale {
            Termination::Collapsed
        } else if mu.abs() > self.config.divergence_factor * scale
            || sigma > self.config.divergence_factor * scale
        {
            Termination::Diverged
        } else if !outcome.converged || !outcome.value.is_finite() {
            Termination::IterationLimit
        } else {
            Termination::Converged
        };

        if termination != Termination::Converged {
            return Ok(EstimationResult::failed(
                initial_mu,
                initial_sigma,
                outcome.iterations,
                termination,
            ));
        }

        Ok(EstimationResult::converged(
            mu,
            sigma,
            -outcome.value,
            outcome.iterations,
        ))
    }
}

/// Sum of per-observation log-likelihood terms; see
/// [`CensoredNormalEstimator::log_likelihood`].
pub fn censored_log_likelihood(mu: f64, sigma: f64, observations: &ObservationSet) -> f64 {
    if !mu.is_finite() || !sigma.is_finite() || sigma <= 0.0 {
        return f64::NEG_INFINITY;
    }
    let mut total = 0.0;
    for obs in observations {
        total += if obs.censored {
            normal_log_sf((obs.value - mu) / sigma)
        } else {
            normal_log_pdf(obs.value, mu, sigma)
        };
    }
    if total.is_nan() {
        f64::NEG_INFINITY
    } else {
        total
    }
}
