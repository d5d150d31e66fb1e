use crate::core::observations::{Observation, ObservationSet};
use crate::ingest::record::{DropReason, SecchiRecord};
use crate::logging::{self, Component};
use std::collections::{BTreeMap, BTreeSet};

/// Which years of data feed an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    All,
    /// Inclusive calendar-year range.
    YearRange { first: i32, last: i32 },
    /// The `years` most recent complete years. Without an explicit
    /// `last_full_year`, the latest year present in the data is treated
    /// as still in progress.
    RecentFullYears {
        years: u32,
        last_full_year: Option<i32>,
    },
}

impl TimeWindow {
    /// Inclusive `(first, last)` year bounds, or `None` when unbounded.
    pub fn resolve(&self, records: &[SecchiRecord]) -> Option<(i32, i32)> {
        match *self {
            TimeWindow::All => None,
            TimeWindow::YearRange { first, last } => Some((first, last)),
            TimeWindow::RecentFullYears {
                years,
                last_full_year,
            } => {
                let last = match last_full_year {
                    Some(y) => y,
                    None => {
                        let latest = records
                            .iter()
                            .filter(|r| r.observation().is_ok())
                            .map(SecchiRecord::year)
                            .max()?;
                        latest - 1
                    }
                };
                // spans reaching past i32 clamp to the earliest representable year
                let first = i64::from(last) - i64::from(years.max(1)) + 1;
                Some((i32::try_from(first).unwrap_or(i32::MIN), last))
            }
        }
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        TimeWindow::RecentFullYears {
            years: 5,
            last_full_year: None,
        }
    }
}

/// Station-selection rule applied after windowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationFilter {
    /// Minimum number of distinct calendar years with a usable reading.
    pub min_years: usize,
}

#[derive(Default)]
struct StationBucket {
    observations: Vec<Observation>,
    years: BTreeSet<i32>,
    dropped: BTreeMap<DropReason, usize>,
}

/// Buckets raw rows into one [`ObservationSet`] per station.
///
/// Rows outside the window, rows without a usable reading, and stations
/// with too short a history are left out. Output is ordered by station id.
pub fn group_by_station(
    records: &[SecchiRecord],
    window: &TimeWindow,
    filter: &StationFilter,
) -> BTreeMap<String, ObservationSet> {
    let bounds = window.resolve(records);
    let in_window = |year: i32| bounds.map_or(true, |(lo, hi)| lo <= year && year <= hi);

    let mut buckets: BTreeMap<&str, StationBucket> = BTreeMap::new();
    for rec in records.iter().filter(|r| in_window(r.year())) {
        let bucket = buckets.entry(rec.station.as_str()).or_default();
        match rec.observation() {
            Ok(obs) => {
                bucket.observations.push(obs);
                bucket.years.insert(rec.year());
            }
            Err(reason) => *bucket.dropped.entry(reason).or_default() += 1,
        }
    }

    let mut sets = BTreeMap::new();
    for (station, bucket) in buckets {
        for (reason, count) in &bucket.dropped {
            logging::debug(
                Component::Ingest,
                Some(station),
                &format!("dropped {count} row(s): {reason}"),
            );
        }
        if bucket.years.len() < filter.min_years {
            logging::info(
                Component::Ingest,
                Some(station),
                &format!(
                    "excluded: {} year(s) of data, {} required",
                    bucket.years.len(),
                    filter.min_years
                ),
            );
            continue;
        }
        match ObservationSet::new(bucket.observations) {
            Ok(set) => {
                sets.insert(station.to_string(), set);
            }
            Err(e) => logging::debug(Component::Ingest, Some(station), &format!("excluded: {e}")),
        }
    }
    sets
}
