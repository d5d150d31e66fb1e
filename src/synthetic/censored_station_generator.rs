use crate::core::error::EstimationError;
use crate::core::observations::{Observation, ObservationSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::io::{Error, ErrorKind};

/// Draws Secchi readings for a station with known true clarity.
///
/// Values come from `N(mu, sigma²)` truncated at zero: negative draws are
/// redrawn, so no probability mass piles up at zero. Any draw at or past
/// `floor` (the water depth) is recorded as a censored reading at `floor`,
/// the same way a disk resting on the bottom is logged in the field.
///
/// `mu` must be positive, which keeps the redraw rate below one half.
#[derive(Debug)]
pub struct CensoredStationGenerator {
    seed: u64,
    rng: StdRng,
    mu: f64,
    sigma: f64,
    floor: f64,
    spare: Option<f64>,
}

impl CensoredStationGenerator {
    pub fn new(mu: f64, sigma: f64, floor: f64, seed: u64) -> Result<Self, Error> {
        if !(mu > 0.0) || !mu.is_finite() || !(sigma > 0.0) || !sigma.is_finite() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "mu and sigma must be finite and > 0",
            ));
        }
        if !(floor > 0.0) || !floor.is_finite() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "floor must be finite and > 0",
            ));
        }
        Ok(Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            mu,
            sigma,
            floor,
            spare: None,
        })
    }

    pub fn restart(&mut self) {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.spare = None;
    }

    /// Box-Muller; the second normal of each pair is kept for the next call.
    fn standard_normal(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // 1 - U keeps the argument of ln in (0, 1]
        let u1: f64 = 1.0 - self.rng.random::<f64>();
        let u2: f64 = self.rng.random::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        self.spare = Some(r * (TAU * u2).sin());
        r * (TAU * u2).cos()
    }

    pub fn next_observation(&mut self) -> Observation {
        let mut draw = self.mu + self.sigma * self.standard_normal();
        while draw < 0.0 {
            draw = self.mu + self.sigma * self.standard_normal();
        }
        if draw >= self.floor {
            Observation::censored(self.floor)
        } else {
            Observation::exact(draw)
        }
    }

    pub fn take(&mut self, n: usize) -> Result<ObservationSet, EstimationError> {
        ObservationSet::new((0..n).map(|_| self.next_observation()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::estimators::CensoredNormalEstimator;
    use crate::utils::stats::mean;

    #[test]
    fn ctor_guards() {
        assert!(CensoredStationGenerator::new(2.0, 0.0, 5.0, 1).is_err());
        assert!(CensoredStationGenerator::new(2.0, 1.0, 0.0, 1).is_err());
        assert!(CensoredStationGenerator::new(f64::NAN, 1.0, 5.0, 1).is_err());
        let err = CensoredStationGenerator::new(2.0, -1.0, 5.0, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn same_seed_same_set() {
        let mut a = CensoredStationGenerator::new(2.0, 1.0, 3.0, 7).unwrap();
        let mut b = CensoredStationGenerator::new(2.0, 1.0, 3.0, 7).unwrap();
        assert_eq!(a.take(50).unwrap(), b.take(50).unwrap());

        let first = {
            a.restart();
            a.take(10).unwrap()
        };
        a.restart();
        assert_eq!(a.take(10).unwrap(), first);
    }

    #[test]
    fn censors_at_floor_and_never_negative() {
        let mut g = CensoredStationGenerator::new(2.0, 1.5, 2.5, 11).unwrap();
        let set = g.take(500).unwrap();
        assert!(set.censored_count() > 0);
        for o in &set {
            assert!(o.value >= 0.0);
            if o.censored {
                assert_eq!(o.value, 2.5);
            } else {
                assert!(o.value < 2.5);
            }
        }
    }

    #[test]
    fn non_positive_mean_is_rejected() {
        assert!(CensoredStationGenerator::new(0.0, 1.0, 5.0, 1).is_err());
        assert!(CensoredStationGenerator::new(-1.0, 1.0, 5.0, 1).is_err());
    }

    #[test]
    fn negative_draws_are_redrawn_not_clamped() {
        // about 30% of raw N(0.5, 1) draws fall below zero
        let mut g = CensoredStationGenerator::new(0.5, 1.0, 10.0, 3).unwrap();
        let set = g.take(1000).unwrap();
        assert_eq!(set.censored_count(), 0);
        assert!(set.iter().all(|o| o.value > 0.0));
        let near_zero = set.iter().filter(|o| o.value < 0.05).count();
        assert!(near_zero < 100, "{near_zero} readings piled up near zero");
    }

    #[test]
    fn zero_draws_is_empty_input() {
        let mut g = CensoredStationGenerator::new(2.0, 1.0, 3.0, 1).unwrap();
        assert_eq!(g.take(0).unwrap_err(), EstimationError::EmptyInput);
    }

    #[test]
    fn estimator_recovers_true_clarity_better_than_naive_mean() {
        let (mu, sigma) = (3.0, 1.0);
        let mut g = CensoredStationGenerator::new(mu, sigma, 3.5, 2024).unwrap();
        let set = g.take(2000).unwrap();
        assert!(set.censored_count() > 400);

        let naive = mean(&set.values()).unwrap();
        let r = CensoredNormalEstimator::default()
            .estimate(&set, 3.0, 2.0)
            .unwrap();
        assert!(r.converged);
        assert!((r.mu - mu).abs() < 0.1, "mu={}", r.mu);
        assert!((r.sigma - sigma).abs() < 0.1, "sigma={}", r.sigma);
        assert!((r.mu - mu).abs() < (naive - mu).abs());
    }
}
