//! Turns the flat monitoring table into per-station observation sets.
//!
//! - `table_reader` parses the fixed-schema CSV.
//! - `record` applies the bottom-visible (BSV) censoring convention.
//! - `grouping` windows rows by year and buckets them by station.

mod error;
mod grouping;
mod record;
mod table_reader;

pub use error::IngestError;
pub use grouping::{StationFilter, TimeWindow, group_by_station};
pub use record::{DropReason, SecchiReading, SecchiRecord};
pub use table_reader::{COLUMNS, TableReader};
