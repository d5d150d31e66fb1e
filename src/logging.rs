//! Structured logging for station surveys.
//!
//! Entries carry a UTC timestamp, a level, the component that emitted
//! them and, when relevant, the station identifier. Console output goes
//! to stderr; a log file, when configured, receives every entry
//! at or above the minimum level.

use crate::core::estimators::{EstimationResult, Termination};
use chrono::Utc;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use strum_macros::{Display, EnumString};

// ---------------------------------------------------------------------------
// Levels and components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[strum(to_string = "DEBUG")]
    Debug,
    #[strum(to_string = "INFO")]
    Info,
    #[strum(to_string = "WARN", serialize = "warning")]
    Warning,
    #[strum(to_string = "ERROR")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Component {
    #[strum(to_string = "INGEST")]
    Ingest,
    #[strum(to_string = "MLE")]
    Estimator,
    #[strum(to_string = "SURVEY")]
    Survey,
    #[strum(to_string = "CLI")]
    Cli,
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    min_level: LogLevel,
    log_file: Option<PathBuf>,
    /// Print full timestamped entries on the console instead of the terse form.
    console_timestamps: bool,
}

impl Logger {
    pub fn new(min_level: LogLevel, log_file: Option<PathBuf>, console_timestamps: bool) -> Self {
        Self {
            min_level,
            log_file,
            console_timestamps,
        }
    }

    pub fn log(&self, level: LogLevel, component: Component, station: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let entry = format_entry(
            &Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            level,
            component,
            station,
            message,
        );

        // stdout is reserved for report rows
        if self.console_timestamps {
            eprintln!("{entry}");
        } else {
            let station_part = station.map(|s| format!(" [{s}]")).unwrap_or_default();
            match level {
                LogLevel::Error => eprintln!("   ✗ {component}{station_part}: {message}"),
                LogLevel::Warning => eprintln!("   ⚠ {component}{station_part}: {message}"),
                LogLevel::Info => eprintln!("   {message}"),
                LogLevel::Debug => eprintln!("   · {component}{station_part}: {message}"),
            }
        }

        if let Some(path) = &self.log_file {
            if let Err(e) = append_to_file(path, &entry) {
                eprintln!("Failed to write to log file {}: {}", path.display(), e);
            }
        }
    }
}

pub fn format_entry(
    timestamp: &str,
    level: LogLevel,
    component: Component,
    station: Option<&str>,
    message: &str,
) -> String {
    let station_part = station.map(|s| format!(" [{s}]")).unwrap_or_default();
    format!("{timestamp} {level} {component}{station_part}: {message}")
}

fn append_to_file(path: &Path, entry: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{entry}")
}

// ---------------------------------------------------------------------------
// Global logging functions
// ---------------------------------------------------------------------------

pub fn init_logger(min_level: LogLevel, log_file: Option<&Path>, console_timestamps: bool) {
    let logger = Logger::new(min_level, log_file.map(Path::to_path_buf), console_timestamps);
    if let Ok(mut slot) = LOGGER.lock() {
        *slot = Some(logger);
    }
}

fn emit(level: LogLevel, component: Component, station: Option<&str>, message: &str) {
    if let Ok(slot) = LOGGER.lock() {
        if let Some(logger) = slot.as_ref() {
            logger.log(level, component, station, message);
        }
    }
}

pub fn debug(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Debug, component, station, message);
}

pub fn info(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Info, component, station, message);
}

pub fn warn(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Warning, component, station, message);
}

pub fn error(component: Component, station: Option<&str>, message: &str) {
    emit(LogLevel::Error, component, station, message);
}

// ---------------------------------------------------------------------------
// Estimation outcome logging
// ---------------------------------------------------------------------------

/// Severity for a finished fit: degenerate data is expected in the field
/// (a station that was bottom-visible all season), a blown iteration
/// budget is not.
pub fn classify_outcome(result: &EstimationResult) -> LogLevel {
    match result.termination {
        Termination::Converged => LogLevel::Debug,
        Termination::AllCensored | Termination::Collapsed => LogLevel::Warning,
        Termination::Diverged | Termination::IterationLimit => LogLevel::Error,
    }
}

pub fn log_estimation_outcome(station: &str, result: &EstimationResult) {
    let message = if result.converged {
        format!(
            "mu={:.4} sigma={:.4} logL={:.4} after {} iterations",
            result.mu, result.sigma, result.log_likelihood, result.iterations
        )
    } else {
        format!(
            "no MLE [{}] after {} iterations; using naive statistics",
            result.termination, result.iterations
        )
    };
    emit(classify_outcome(result), Component::Estimator, Some(station), &message);
}

pub fn log_survey_summary(total: usize, fallbacks: usize) {
    let message = format!(
        "Survey complete: {}/{} stations estimated by maximum likelihood, {} fell back",
        total - fallbacks,
        total,
        fallbacks
    );
    if fallbacks == 0 {
        info(Component::Survey, None, &message);
    } else {
        warn(Component::Survey, None, &message);
    }
}
