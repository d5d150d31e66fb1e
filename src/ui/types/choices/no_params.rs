use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Params payload for menu entries that take no settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct NoParams {}
