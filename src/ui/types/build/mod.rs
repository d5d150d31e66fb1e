//! Turns deserialized choices into runtime objects.

mod error;
mod settings;
mod sources;
mod survey;

pub use error::BuildError;
pub use settings::parse_log_level;
pub use sources::{Stations, load_stations, synthetic_station_id};
pub use survey::{LogSettings, SurveyPlan, build_survey};
