use serde::{Deserialize, Serialize};

/// One sampled reading.
///
/// A censored observation only bounds the true quantity from below: the
/// disk was still visible on the bottom, so the water was at least
/// `value` clear.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub censored: bool,
}

impl Observation {
    #[inline]
    pub fn exact(value: f64) -> Self {
        Self {
            value,
            censored: false,
        }
    }

    #[inline]
    pub fn censored(value: f64) -> Self {
        Self {
            value,
            censored: true,
        }
    }

    #[inline]
    pub(crate) fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value >= 0.0
    }
}

impl From<(f64, bool)> for Observation {
    fn from((value, censored): (f64, bool)) -> Self {
        Self { value, censored }
    }
}
