use crate::core::observations::ObservationSet;
use crate::utils::stats::{mean, population_std_dev};

pub const DEFAULT_START_MU: f64 = 3.0;
pub const DEFAULT_START_SIGMA: f64 = 2.0;

/// How to pick the optimizer's starting `(mu, sigma)` for a station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartGuess {
    Fixed { mu: f64, sigma: f64 },
    /// Moments of the uncensored readings; all readings when none are
    /// uncensored; the fixed default when the spread is zero.
    UncensoredMoments,
}

impl Default for StartGuess {
    fn default() -> Self {
        StartGuess::UncensoredMoments
    }
}

impl StartGuess {
    pub fn resolve(&self, observations: &ObservationSet) -> (f64, f64) {
        match *self {
            StartGuess::Fixed { mu, sigma } => (mu, sigma),
            StartGuess::UncensoredMoments => {
                let mut values = observations.uncensored_values();
                if values.is_empty() {
                    values = observations.values();
                }
                match (mean(&values), population_std_dev(&values)) {
                    (Some(m), Some(s)) if s > 0.0 && s.is_finite() => (m, s),
                    (Some(m), _) => (m, DEFAULT_START_SIGMA),
                    _ => (DEFAULT_START_MU, DEFAULT_START_SIGMA),
                }
            }
        }
    }
}
