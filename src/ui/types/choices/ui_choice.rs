use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use schemars::{JsonSchema, Schema};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use strum::{EnumMessage, IntoEnumIterator};

/// A config enum the wizard can offer as a menu.
///
/// Implementors are adjacently tagged (`{"type": .., "params": ..}`) so a
/// kind plus a params object rebuilds the typed value.
pub trait UIChoice: Sized + Serialize + DeserializeOwned + JsonSchema {
    type Kind: Copy + Into<&'static str> + EnumMessage + IntoEnumIterator;

    fn schema() -> Schema;

    fn prompt_label() -> &'static str {
        "Choose an option:"
    }
    fn prompt_help() -> &'static str {
        "↑/↓ to navigate, ↵ to select"
    }

    /// Defaults offered for each field of the chosen kind's params.
    fn default_params(kind: Self::Kind) -> Value;

    /// Nested menus whose answers are merged into the params object.
    fn subprompts<D: PromptDriver>(_driver: &D, _kind: Self::Kind) -> Result<Option<Map<String, Value>>> {
        Ok(None)
    }

    fn from_parts(kind: Self::Kind, params: Value) -> Result<Self> {
        let key: &'static str = kind.into();
        Ok(serde_json::from_value(json!({ "type": key, "params": params }))?)
    }
}
