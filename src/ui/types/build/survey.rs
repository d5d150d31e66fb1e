use crate::core::estimators::{CensoredNormalEstimator, StartGuess};
use crate::ingest::{StationFilter, TimeWindow};
use crate::logging::LogLevel;
use crate::summary::ReportFormat;
use crate::tasks::StationSurvey;
use crate::ui::types::build::settings::parse_log_level;
use crate::ui::types::build::sources::{Stations, load_stations};
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{SurveyChoice, SurveyParams};
use std::path::PathBuf;

/// Everything a configured run needs, with inputs already loaded.
pub struct SurveyPlan {
    pub stations: Stations,
    pub survey: StationSurvey,
    pub format: ReportFormat,
    pub output: Option<PathBuf>,
}

/// Logging settings are split out so the logger can start before any
/// input is read.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub level: LogLevel,
    pub file: Option<PathBuf>,
}

impl TryFrom<&SurveyChoice> for LogSettings {
    type Error = BuildError;

    fn try_from(choice: &SurveyChoice) -> Result<Self, Self::Error> {
        let SurveyChoice::EstimateStations(p) = choice;
        Ok(LogSettings {
            level: parse_log_level(&p.log_level)?,
            file: p.log_file.clone(),
        })
    }
}

pub fn build_survey(choice: SurveyChoice) -> Result<SurveyPlan, BuildError> {
    match choice {
        SurveyChoice::EstimateStations(p) => SurveyPlan::try_from(p),
    }
}

impl TryFrom<SurveyParams> for SurveyPlan {
    type Error = BuildError;

    fn try_from(p: SurveyParams) -> Result<Self, Self::Error> {
        if p.estimator.max_iterations == 0 {
            return Err(BuildError::InvalidParameter(
                "max_iterations must be at least 1".into(),
            ));
        }
        let window = TimeWindow::try_from(p.window)?;
        let start_guess = StartGuess::try_from(p.start_guess)?;
        let filter = StationFilter {
            min_years: p.min_years,
        };

        let stations = load_stations(&p.source, &window, &filter)?;
        let survey = StationSurvey::new(CensoredNormalEstimator::new(p.estimator), start_guess);

        Ok(SurveyPlan {
            stations,
            survey,
            format: p.format.into(),
            output: p.output,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::types::choices::SourceChoice;
    use serde_json::json;

    fn config() -> SurveyChoice {
        serde_json::from_value(json!({
            "type": "estimate-stations",
            "params": {
                "source": {
                    "type": "synthetic",
                    "params": {
                        "stations": 2,
                        "readings_per_station": 60,
                        "mu": 3.0,
                        "sigma": 1.0,
                        "floor": 3.5,
                        "seed": 11
                    }
                },
                "format": { "type": "json", "params": {} }
            }
        }))
        .unwrap()
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let SurveyChoice::EstimateStations(p) = config();
        assert!(matches!(p.source, SourceChoice::Synthetic(_)));
        assert_eq!(p.min_years, 0);
        assert_eq!(p.log_level, "info");
        assert_eq!(p.estimator.max_iterations, 2000);
        assert_eq!(p.output, None);
    }

    #[test]
    fn plan_runs_end_to_end() {
        let plan = build_survey(config()).unwrap();
        assert_eq!(plan.format, ReportFormat::Json);
        assert_eq!(plan.stations.len(), 2);

        let report = plan.survey.run(&plan.stations).unwrap();
        assert_eq!(report.len(), 2);
        for entry in report.entries() {
            assert!(entry.converged, "{entry}");
            assert!(entry.n_censored > 0);
            assert!(entry.adjusted_mean > entry.naive_mean);
        }
    }

    #[test]
    fn log_settings_validate_level() {
        let mut choice = config();
        assert_eq!(
            LogSettings::try_from(&choice).unwrap(),
            LogSettings {
                level: LogLevel::Info,
                file: None
            }
        );
        let SurveyChoice::EstimateStations(p) = &mut choice;
        p.log_level = "chatty".into();
        assert!(LogSettings::try_from(&choice).is_err());
    }

    #[test]
    fn zero_iteration_cap_is_rejected() {
        let SurveyChoice::EstimateStations(mut p) = config();
        p.estimator.max_iterations = 0;
        assert!(matches!(
            SurveyPlan::try_from(p),
            Err(BuildError::InvalidParameter(_))
        ));
    }
}
