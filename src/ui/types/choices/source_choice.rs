use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::path::PathBuf;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

const DEFAULT_SEED: u64 = 42;
fn default_seed() -> u64 {
    DEFAULT_SEED
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct CsvTableParams {
    #[schemars(
        with = "String",
        title = "CSV Path",
        description = "Table with station,date,secchi,depth columns",
        extend(
            "format" = "path",
            "x-file" = true,
            "x-must-exist" = true,
            "x-extensions" = ["csv"]
        )
    )]
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SyntheticParams {
    #[schemars(
        title = "Stations",
        description = "Number of simulated stations",
        range(min = 1)
    )]
    pub stations: usize,

    #[schemars(
        title = "Readings per Station",
        description = "Observations drawn for each station",
        range(min = 1)
    )]
    pub readings_per_station: usize,

    #[schemars(
        title = "True Mean",
        description = "Mean Secchi depth in metres (> 0)",
        range(min = 0.0)
    )]
    pub mu: f64,

    #[schemars(
        title = "True SD",
        description = "Standard deviation in metres",
        range(min = 0.0)
    )]
    pub sigma: f64,

    #[schemars(
        title = "Lake Floor",
        description = "Readings at or beyond this depth are recorded as bottom-visible",
        range(min = 0.0)
    )]
    pub floor: f64,

    #[serde(default = "default_seed")]
    #[schemars(title = "Seed", description = "PRNG seed", default = "default_seed")]
    pub seed: u64,
}

impl Default for SyntheticParams {
    fn default() -> Self {
        Self {
            stations: 5,
            readings_per_station: 40,
            mu: 3.0,
            sigma: 1.0,
            floor: 4.0,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(SourceKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum SourceChoice {
    #[strum_discriminants(strum(
        message = "CSV table",
        detailed_message = "Secchi readings exported as station,date,secchi,depth."
    ))]
    CsvTable(CsvTableParams),

    #[strum_discriminants(strum(
        message = "Synthetic stations",
        detailed_message = "Simulated normal readings censored at a lake floor."
    ))]
    Synthetic(SyntheticParams),
}

impl UIChoice for SourceChoice {
    type Kind = SourceKind;

    fn schema() -> Schema {
        schema_for!(SourceChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a data source:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            SourceKind::CsvTable => json!({ "path": "" }),
            SourceKind::Synthetic => json!(SyntheticParams::default()),
        }
    }
}
