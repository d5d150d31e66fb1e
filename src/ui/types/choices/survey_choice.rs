use crate::core::estimators::EstimatorConfig;
use crate::ui::cli::drivers::PromptDriver;
use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{
    ReportFormatChoice, SourceChoice, StartGuessChoice, UIChoice, WindowChoice,
};
use anyhow::Result;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurveyParams {
    #[schemars(skip)]
    pub source: SourceChoice,
    #[serde(default)]
    #[schemars(skip)]
    pub window: WindowChoice,
    #[serde(default)]
    #[schemars(skip)]
    pub start_guess: StartGuessChoice,
    #[serde(default)]
    #[schemars(skip)]
    pub format: ReportFormatChoice,
    #[serde(default)]
    #[schemars(skip)]
    pub estimator: EstimatorConfig,

    #[serde(default)]
    #[schemars(
        title = "Minimum Years",
        description = "Skip stations with fewer distinct years of readings",
        range(min = 0)
    )]
    pub min_years: usize,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Output File",
        description = "Where to write the report (None = standard output)",
        extend(
            "x-file" = true,
            "x-must-exist" = false,
            "x-extensions" = ["csv", "tsv", "json"]
        )
    )]
    pub output: Option<PathBuf>,

    #[serde(default = "default_log_level")]
    #[schemars(
        title = "Log Level",
        description = "debug, info, warning or error",
        default = "default_log_level"
    )]
    pub log_level: String,

    #[serde(default)]
    #[schemars(
        with = "Option<String>",
        title = "Log File",
        description = "Also append log lines to this file (None = console only)"
    )]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(SurveyKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum SurveyChoice {
    #[strum_discriminants(strum(
        message = "Estimate stations",
        detailed_message = "Censoring-adjusted mean and SD for every station."
    ))]
    EstimateStations(SurveyParams),
}

impl UIChoice for SurveyChoice {
    type Kind = SurveyKind;

    fn schema() -> Schema {
        schema_for!(SurveyChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            SurveyKind::EstimateStations => json!({
                "min_years": 0,
                "output": null,
                "log_level": default_log_level(),
                "log_file": null,
            }),
        }
    }

    fn subprompts<D: PromptDriver>(driver: &D, kind: Self::Kind) -> Result<Option<Map<String, Value>>> {
        match kind {
            SurveyKind::EstimateStations => {
                let source = prompt_choice::<SourceChoice, _>(driver)?;
                let window = prompt_choice::<WindowChoice, _>(driver)?;
                let start = prompt_choice::<StartGuessChoice, _>(driver)?;
                let format = prompt_choice::<ReportFormatChoice, _>(driver)?;
                let estimator = prompt_estimator(driver)?;

                let mut m = Map::new();
                m.insert("source".into(), serde_json::to_value(source)?);
                m.insert("window".into(), serde_json::to_value(window)?);
                m.insert("start_guess".into(), serde_json::to_value(start)?);
                m.insert("format".into(), serde_json::to_value(format)?);
                m.insert("estimator".into(), serde_json::to_value(estimator)?);
                Ok(Some(m))
            }
        }
    }
}

fn prompt_estimator<D: PromptDriver>(driver: &D) -> Result<EstimatorConfig> {
    let mut config = EstimatorConfig::default();
    if !driver.ask_bool(
        "Tune the optimizer?",
        "Defaults suit Secchi depths in metres",
        false,
    )? {
        return Ok(config);
    }
    config.max_iterations = driver.ask_u64(
        "Max Iterations",
        "Optimizer iteration cap",
        config.max_iterations as u64,
        Some(1),
        None,
    )? as usize;
    config.x_tolerance = driver.ask_f64(
        "Parameter Tolerance",
        "Stop when the simplex is this small",
        config.x_tolerance,
        Some(0.0),
        None,
    )?;
    config.f_tolerance = driver.ask_f64(
        "Likelihood Tolerance",
        "Stop when log-likelihoods across the simplex agree to this",
        config.f_tolerance,
        Some(0.0),
        None,
    )?;
    Ok(config)
}
