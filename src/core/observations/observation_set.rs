use crate::core::error::EstimationError;
use crate::core::observations::Observation;

/// Non-empty set of valid observations for one station and time window.
///
/// Every value is finite and non-negative; construction is the only place
/// the invariant is checked, so estimators can rely on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    observations: Vec<Observation>,
}

impl ObservationSet {
    pub fn new(observations: Vec<Observation>) -> Result<Self, EstimationError> {
        if observations.is_empty() {
            return Err(EstimationError::EmptyInput);
        }
        if let Some((index, bad)) = observations
            .iter()
            .enumerate()
            .find(|(_, o)| !o.is_valid())
        {
            return Err(EstimationError::InvalidObservation {
                index,
                value: bad.value,
            });
        }
        Ok(Self { observations })
    }

    pub fn from_pairs<I>(pairs: I) -> Result<Self, EstimationError>
    where
        I: IntoIterator<Item = (f64, bool)>,
    {
        Self::new(pairs.into_iter().map(Observation::from).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    pub fn censored_count(&self) -> usize {
        self.observations.iter().filter(|o| o.censored).count()
    }

    pub fn all_censored(&self) -> bool {
        self.observations.iter().all(|o| o.censored)
    }

    /// Every recorded value, censored or not, read at face value.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn uncensored_values(&self) -> Vec<f64> {
        self.observations
            .iter()
            .filter(|o| !o.censored)
            .map(|o| o.value)
            .collect()
    }

    /// Largest absolute value in the set, used to scale sanity bounds.
    pub fn max_abs_value(&self) -> f64 {
        self.observations
            .iter()
            .map(|o| o.value.abs())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        let err = ObservationSet::new(vec![]).unwrap_err();
        assert_eq!(err, EstimationError::EmptyInput);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        let err = ObservationSet::from_pairs([(1.0, false), (-0.5, false)]).unwrap_err();
        assert_eq!(
            err,
            EstimationError::InvalidObservation {
                index: 1,
                value: -0.5
            }
        );

        let err = ObservationSet::from_pairs([(f64::INFINITY, true)]).unwrap_err();
        assert!(matches!(
            err,
            EstimationError::InvalidObservation { index: 0, .. }
        ));

        let err = ObservationSet::from_pairs([(2.0, true), (f64::NAN, false)]).unwrap_err();
        assert!(matches!(
            err,
            EstimationError::InvalidObservation { index: 1, .. }
        ));
    }

    #[test]
    fn accepts_zero_depth() {
        let set = ObservationSet::from_pairs([(0.0, false)]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(!set.is_empty());
    }

    #[test]
    fn counts_and_partitions() {
        let set = ObservationSet::from_pairs([
            (3.0, false),
            (2.5, false),
            (4.0, true),
            (4.0, true),
            (3.5, false),
        ])
        .unwrap();
        assert_eq!(set.len(), 5);
        assert_eq!(set.censored_count(), 2);
        assert!(!set.all_censored());
        assert_eq!(set.uncensored_values(), vec![3.0, 2.5, 3.5]);
        assert_eq!(set.values(), vec![3.0, 2.5, 4.0, 4.0, 3.5]);
        assert_eq!(set.max_abs_value(), 4.0);
        assert_eq!((&set).into_iter().count(), 5);
    }

    #[test]
    fn all_censored_detected() {
        let set = ObservationSet::from_pairs([(4.0, true), (4.0, true)]).unwrap();
        assert!(set.all_censored());
        assert!(set.uncensored_values().is_empty());
    }
}
