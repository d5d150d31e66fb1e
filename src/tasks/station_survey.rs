use crate::core::error::EstimationError;
use crate::core::estimators::{CensoredNormalEstimator, StartGuess};
use crate::core::observations::ObservationSet;
use crate::logging::{self, Component};
use crate::summary::{StationSummary, SurveyProgress, SurveyReport};
use crate::utils::stats::{mean, population_std_dev};
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

/// Runs the censored-normal fit for every station in a grouping.
///
/// Stations are estimated independently; a station whose fit does not
/// converge is reported with its naive statistics instead.
pub struct StationSurvey {
    estimator: CensoredNormalEstimator,
    start_guess: StartGuess,
    progress_tx: Option<Sender<SurveyProgress>>,
}

impl StationSurvey {
    pub fn new(estimator: CensoredNormalEstimator, start_guess: StartGuess) -> Self {
        Self {
            estimator,
            start_guess,
            progress_tx: None,
        }
    }

    pub fn with_progress(mut self, tx: Sender<SurveyProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn estimate_station(
        &self,
        station: &str,
        observations: &ObservationSet,
    ) -> Result<StationSummary, EstimationError> {
        let values = observations.values();
        let naive_mean = mean(&values).ok_or(EstimationError::EmptyInput)?;
        let naive_sd = population_std_dev(&values).ok_or(EstimationError::EmptyInput)?;

        let (mu0, sigma0) = self.start_guess.resolve(observations);
        let result = self.estimator.estimate(observations, mu0, sigma0)?;
        logging::log_estimation_outcome(station, &result);

        Ok(StationSummary::new(
            station,
            observations.len(),
            observations.censored_count(),
            naive_mean,
            naive_sd,
            &result,
        ))
    }

    pub fn run(
        &self,
        stations: &BTreeMap<String, ObservationSet>,
    ) -> Result<SurveyReport, EstimationError> {
        let total = stations.len();
        logging::info(
            Component::Survey,
            None,
            &format!("Estimating {total} station(s)"),
        );

        let mut report = SurveyReport::default();
        for (done, (station, observations)) in stations.iter().enumerate() {
            let summary = self.estimate_station(station, observations)?;
            if let Some(tx) = &self.progress_tx {
                let _ = tx.send(SurveyProgress {
                    station: station.clone(),
                    done: done + 1,
                    total,
                    converged: summary.converged,
                });
            }
            report.push(summary);
        }

        logging::log_survey_summary(report.len(), report.fallback_count());
        Ok(report)
    }
}
