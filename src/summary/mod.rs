mod progress;
mod station_summary;
mod survey_report;

pub use progress::SurveyProgress;
pub use station_summary::{EstimateMethod, StationSummary};
pub use survey_report::{ReportFormat, SurveyReport};
