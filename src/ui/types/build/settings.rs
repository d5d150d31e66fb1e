use crate::core::estimators::StartGuess;
use crate::ingest::TimeWindow;
use crate::logging::LogLevel;
use crate::summary::ReportFormat;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{ReportFormatChoice, StartGuessChoice, WindowChoice};
use std::str::FromStr;

impl TryFrom<WindowChoice> for TimeWindow {
    type Error = BuildError;

    fn try_from(choice: WindowChoice) -> Result<Self, Self::Error> {
        match choice {
            WindowChoice::All(_) => Ok(TimeWindow::All),
            WindowChoice::YearRange(p) if p.first > p.last => Err(BuildError::InvalidParameter(
                format!("year range {}..{} is empty", p.first, p.last),
            )),
            WindowChoice::YearRange(p) => Ok(TimeWindow::YearRange {
                first: p.first,
                last: p.last,
            }),
            WindowChoice::RecentFullYears(p) => {
                let span = i32::try_from(p.years)
                    .ok()
                    .filter(|span| *span >= 1)
                    .ok_or_else(|| {
                        BuildError::InvalidParameter(format!(
                            "window must span between 1 and {} years, got {}",
                            i32::MAX,
                            p.years
                        ))
                    })?;
                if let Some(last) = p.last_full_year {
                    last.checked_sub(span - 1).ok_or_else(|| {
                        BuildError::InvalidParameter(format!(
                            "{span} years ending in {last} start before the earliest representable year"
                        ))
                    })?;
                }
                Ok(TimeWindow::RecentFullYears {
                    years: p.years,
                    last_full_year: p.last_full_year,
                })
            }
        }
    }
}

impl TryFrom<StartGuessChoice> for StartGuess {
    type Error = BuildError;

    fn try_from(choice: StartGuessChoice) -> Result<Self, Self::Error> {
        match choice {
            StartGuessChoice::UncensoredMoments(_) => Ok(StartGuess::UncensoredMoments),
            StartGuessChoice::Fixed(p) if !(p.mu.is_finite() && p.sigma.is_finite() && p.sigma > 0.0) => {
                Err(BuildError::InvalidParameter(format!(
                    "starting point needs a finite mean and positive SD, got ({}, {})",
                    p.mu, p.sigma
                )))
            }
            StartGuessChoice::Fixed(p) => Ok(StartGuess::Fixed {
                mu: p.mu,
                sigma: p.sigma,
            }),
        }
    }
}

impl From<ReportFormatChoice> for ReportFormat {
    fn from(choice: ReportFormatChoice) -> Self {
        match choice {
            ReportFormatChoice::Csv(_) => ReportFormat::Csv,
            ReportFormatChoice::Tsv(_) => ReportFormat::Tsv,
            ReportFormatChoice::Json(_) => ReportFormat::Json,
        }
    }
}

pub fn parse_log_level(raw: &str) -> Result<LogLevel, BuildError> {
    LogLevel::from_str(raw.trim())
        .map_err(|_| BuildError::InvalidParameter(format!("unknown log level `{raw}`")))
}
