use crate::core::observations::Observation;
use chrono::{Datelike, NaiveDate};
use std::str::FromStr;
use strum_macros::{Display, IntoStaticStr};

/// The Secchi column of one row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecchiReading {
    Depth(f64),
    /// Coded "BSV": the disk was still visible on the bottom.
    BottomVisible,
    Missing,
}

impl FromStr for SecchiReading {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty()
            || t.eq_ignore_ascii_case("na")
            || t.eq_ignore_ascii_case("nan")
            || t == "."
        {
            return Ok(SecchiReading::Missing);
        }
        if t.eq_ignore_ascii_case("bsv") {
            return Ok(SecchiReading::BottomVisible);
        }
        t.parse::<f64>()
            .map(SecchiReading::Depth)
            .map_err(|_| format!("unrecognised Secchi reading {t:?}"))
    }
}

/// One raw row of the flat monitoring table.
#[derive(Debug, Clone, PartialEq)]
pub struct SecchiRecord {
    pub station: String,
    pub date: NaiveDate,
    pub secchi: SecchiReading,
    /// Total water depth at the station on that visit, the floor a
    /// bottom-visible reading is censored at.
    pub depth: Option<f64>,
}

/// Why a row produced no observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum DropReason {
    Missing,
    BottomVisibleWithoutDepth,
    InvalidValue,
}

impl SecchiRecord {
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Applies the BSV convention: a bottom-visible reading becomes a
    /// censored observation at the station depth.
    pub fn observation(&self) -> Result<Observation, DropReason> {
        let obs = match self.secchi {
            SecchiReading::Missing => return Err(DropReason::Missing),
            SecchiReading::Depth(v) => Observation::exact(v),
            SecchiReading::BottomVisible => match self.depth {
                Some(d) => Observation::censored(d),
                None => return Err(DropReason::BottomVisibleWithoutDepth),
            },
        };
        if obs.is_valid() {
            Ok(obs)
        } else {
            Err(DropReason::InvalidValue)
        }
    }
}
