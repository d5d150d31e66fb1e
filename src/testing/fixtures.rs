use crate::core::observations::ObservationSet;
use crate::ingest::{SecchiReading, SecchiRecord};
use chrono::NaiveDate;

/// Five readings at one station: three exact, two disk-on-bottom at 4 m.
pub fn mixed_station() -> ObservationSet {
    ObservationSet::from_pairs([
        (3.0, false),
        (2.5, false),
        (4.0, true),
        (4.0, true),
        (3.5, false),
    ])
    .unwrap()
}

pub fn uncensored_station() -> ObservationSet {
    ObservationSet::from_pairs([1.2, 2.3, 3.1, 4.8, 2.2, 3.3].into_iter().map(|v| (v, false)))
        .unwrap()
}

pub fn record(station: &str, date: &str, secchi: SecchiReading, depth: Option<f64>) -> SecchiRecord {
    SecchiRecord {
        station: station.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        secchi,
        depth,
    }
}
