use crate::ui::types::choices::{NoParams, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(ReportFormatKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum ReportFormatChoice {
    #[strum_discriminants(strum(message = "CSV"))]
    Csv(NoParams),
    #[strum_discriminants(strum(message = "TSV"))]
    Tsv(NoParams),
    #[strum_discriminants(strum(message = "JSON", detailed_message = "Pretty-printed array."))]
    Json(NoParams),
}

impl Default for ReportFormatChoice {
    fn default() -> Self {
        ReportFormatChoice::Csv(NoParams {})
    }
}

impl UIChoice for ReportFormatChoice {
    type Kind = ReportFormatKind;

    fn schema() -> Schema {
        schema_for!(ReportFormatChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose the report format:"
    }

    fn default_params(_kind: Self::Kind) -> Value {
        json!({})
    }
}
