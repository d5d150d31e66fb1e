use crate::core::estimators::{DEFAULT_START_MU, DEFAULT_START_SIGMA};
use crate::ui::types::choices::{NoParams, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_mu() -> f64 {
    DEFAULT_START_MU
}
fn default_sigma() -> f64 {
    DEFAULT_START_SIGMA
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FixedStartParams {
    #[serde(default = "default_mu")]
    #[schemars(title = "Start Mean", default = "default_mu")]
    pub mu: f64,

    #[serde(default = "default_sigma")]
    #[schemars(
        title = "Start SD",
        description = "Must be positive",
        range(min = 0.0),
        default = "default_sigma"
    )]
    pub sigma: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(StartGuessKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum StartGuessChoice {
    #[strum_discriminants(strum(
        message = "Uncensored moments",
        detailed_message = "Start from the mean and SD of the exact readings."
    ))]
    UncensoredMoments(NoParams),

    #[strum_discriminants(strum(
        message = "Fixed point",
        detailed_message = "Start every station from the same (mean, SD)."
    ))]
    Fixed(FixedStartParams),
}

impl Default for StartGuessChoice {
    fn default() -> Self {
        StartGuessChoice::UncensoredMoments(NoParams {})
    }
}

impl UIChoice for StartGuessChoice {
    type Kind = StartGuessKind;

    fn schema() -> Schema {
        schema_for!(StartGuessChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose the optimizer starting point:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            StartGuessKind::UncensoredMoments => json!({}),
            StartGuessKind::Fixed => json!({ "mu": default_mu(), "sigma": default_sigma() }),
        }
    }
}
