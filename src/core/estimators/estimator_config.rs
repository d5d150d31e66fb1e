use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_max_iterations() -> usize {
    2000
}
fn default_x_tolerance() -> f64 {
    1e-10
}
fn default_f_tolerance() -> f64 {
    1e-12
}
fn default_divergence_factor() -> f64 {
    100.0
}
fn default_collapse_ratio() -> f64 {
    1e-8
}

/// Tuning knobs for [`CensoredNormalEstimator`](super::CensoredNormalEstimator).
///
/// The sanity bounds scale with `1 + max |value|` of the observation set,
/// so they follow the units of the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EstimatorConfig {
    #[serde(default = "default_max_iterations")]
    #[schemars(
        title = "Max Iterations",
        description = "Optimizer iteration cap",
        range(min = 1),
        default = "default_max_iterations"
    )]
    pub max_iterations: usize,

    #[serde(default = "default_x_tolerance")]
    #[schemars(
        title = "Parameter Tolerance",
        description = "Stop when the simplex is this small, relative to 1 + |best point|",
        range(min = 0.0),
        default = "default_x_tolerance"
    )]
    pub x_tolerance: f64,

    #[serde(default = "default_f_tolerance")]
    #[schemars(
        title = "Likelihood Tolerance",
        description = "Stop when log-likelihoods across the simplex agree to this, relative to 1 + |best value|",
        range(min = 0.0),
        default = "default_f_tolerance"
    )]
    pub f_tolerance: f64,

    #[serde(default = "default_divergence_factor")]
    #[schemars(
        title = "Divergence Factor",
        description = "Reject estimates whose |mu| or sigma exceed this multiple of the data scale",
        range(min = 1.0),
        default = "default_divergence_factor"
    )]
    pub divergence_factor: f64,

    #[serde(default = "default_collapse_ratio")]
    #[schemars(
        title = "Collapse Ratio",
        description = "Reject estimates whose sigma falls below this fraction of the data scale",
        range(min = 0.0),
        default = "default_collapse_ratio"
    )]
    pub collapse_ratio: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            x_tolerance: default_x_tolerance(),
            f_tolerance: default_f_tolerance(),
            divergence_factor: default_divergence_factor(),
            collapse_ratio: default_collapse_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg: EstimatorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EstimatorConfig::default());
    }

    #[test]
    fn partial_json_overrides_only_given_fields() {
        let cfg: EstimatorConfig = serde_json::from_str(r#"{"max_iterations": 50}"#).unwrap();
        assert_eq!(cfg.max_iterations, 50);
        assert_eq!(cfg.x_tolerance, 1e-10);
        assert_eq!(cfg.divergence_factor, 100.0);
    }
}
