use crate::core::observations::ObservationSet;
use crate::ingest::{StationFilter, TableReader, TimeWindow, group_by_station};
use crate::logging::{self, Component};
use crate::synthetic::CensoredStationGenerator;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{CsvTableParams, SourceChoice, SyntheticParams};
use std::collections::BTreeMap;

pub type Stations = BTreeMap<String, ObservationSet>;

/// Loads every station named by `choice`.
///
/// The window and filter apply to dated table rows only; synthetic
/// stations have no calendar and are used whole.
pub fn load_stations(
    choice: &SourceChoice,
    window: &TimeWindow,
    filter: &StationFilter,
) -> Result<Stations, BuildError> {
    match choice {
        SourceChoice::CsvTable(p) => load_table(p, window, filter),
        SourceChoice::Synthetic(p) => generate_stations(p),
    }
}

fn load_table(
    p: &CsvTableParams,
    window: &TimeWindow,
    filter: &StationFilter,
) -> Result<Stations, BuildError> {
    let records = TableReader::read_path(&p.path)?;
    logging::info(
        Component::Ingest,
        None,
        &format!("Read {} row(s) from {}", records.len(), p.path.display()),
    );
    Ok(group_by_station(&records, window, filter))
}

pub fn synthetic_station_id(index: usize) -> String {
    format!("SYN-{:02}", index + 1)
}

fn generate_stations(p: &SyntheticParams) -> Result<Stations, BuildError> {
    if p.stations == 0 || p.readings_per_station == 0 {
        return Err(BuildError::InvalidParameter(
            "synthetic source needs at least one station and one reading".into(),
        ));
    }
    let mut out = BTreeMap::new();
    for i in 0..p.stations {
        let seed = p.seed.wrapping_add(i as u64);
        let mut generator = CensoredStationGenerator::new(p.mu, p.sigma, p.floor, seed)?;
        out.insert(synthetic_station_id(i), generator.take(p.readings_per_station)?);
    }
    logging::debug(
        Component::Ingest,
        None,
        &format!(
            "Generated {} synthetic station(s) from N({}, {}²) with floor {}",
            p.stations, p.mu, p.sigma, p.floor
        ),
    );
    Ok(out)
}
