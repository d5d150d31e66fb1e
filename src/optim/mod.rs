mod nelder_mead;
mod optimizer;

pub use nelder_mead::NelderMead;
pub use optimizer::{OptimizationOutcome, Optimizer};
