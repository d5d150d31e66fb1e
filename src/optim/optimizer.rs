/// Result of a minimization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizationOutcome {
    /// Best point found.
    pub point: [f64; 2],
    /// Objective value at `point`.
    pub value: f64,
    pub iterations: usize,
    /// Whether the stopping tolerances were met before the iteration cap.
    pub converged: bool,
}

/// Minimizer over a two-dimensional continuous parameter space.
///
/// Implementations must be deterministic: identical objective and start
/// yield identical outcomes. The objective may return `+inf` (or NaN) to
/// mark a point as infeasible.
pub trait Optimizer {
    fn minimize<F>(&self, objective: F, start: [f64; 2]) -> OptimizationOutcome
    where
        F: Fn(&[f64; 2]) -> f64;
}
