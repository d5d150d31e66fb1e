use crate::ui::types::choices::{NoParams, UIChoice};
use chrono::{Datelike, Local};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_years() -> u32 {
    5
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RecentYearsParams {
    #[serde(default = "default_years")]
    #[schemars(
        title = "Years",
        description = "How many recent complete years to keep",
        range(min = 1),
        default = "default_years"
    )]
    pub years: u32,

    #[serde(default)]
    #[schemars(
        title = "Last Full Year",
        description = "Most recent complete year (None = the year before the latest reading)"
    )]
    pub last_full_year: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct YearRangeParams {
    #[schemars(title = "First Year", description = "First calendar year, inclusive")]
    pub first: i32,
    #[schemars(title = "Last Year", description = "Last calendar year, inclusive")]
    pub last: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(WindowKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum WindowChoice {
    #[strum_discriminants(strum(
        message = "Recent full years",
        detailed_message = "The last N complete calendar years."
    ))]
    RecentFullYears(RecentYearsParams),

    #[strum_discriminants(strum(
        message = "Year range",
        detailed_message = "An explicit inclusive range of years."
    ))]
    YearRange(YearRangeParams),

    #[strum_discriminants(strum(message = "All years", detailed_message = "Use every reading."))]
    All(NoParams),
}

impl Default for WindowChoice {
    fn default() -> Self {
        WindowChoice::RecentFullYears(RecentYearsParams {
            years: default_years(),
            last_full_year: None,
        })
    }
}

impl UIChoice for WindowChoice {
    type Kind = WindowKind;

    fn schema() -> Schema {
        schema_for!(WindowChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a time window:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            WindowKind::RecentFullYears => json!({ "years": default_years(), "last_full_year": null }),
            WindowKind::YearRange => {
                let last = Local::now().year() - 1;
                json!({ "first": last - 4, "last": last })
            }
            WindowKind::All => json!({}),
        }
    }
}
