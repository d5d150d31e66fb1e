use crate::optim::{OptimizationOutcome, Optimizer};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

const NONZERO_STEP: f64 = 0.05;
const ZERO_STEP: f64 = 0.00025;

/// Derivative-free downhill simplex search.
///
/// Stops once both the simplex diameter (largest coordinate distance from
/// the best vertex) is within `x_tolerance` and the spread of objective
/// values is within `f_tolerance`, or after `max_iterations` steps. Both
/// tolerances are relative: they scale with `1 + |best|` so the test stays
/// reachable when coordinates or values are far from unit size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMead {
    pub max_iterations: usize,
    pub x_tolerance: f64,
    pub f_tolerance: f64,
}

impl NelderMead {
    pub fn new(max_iterations: usize, x_tolerance: f64, f_tolerance: f64) -> Self {
        Self {
            max_iterations,
            x_tolerance,
            f_tolerance,
        }
    }

    fn initial_simplex(start: [f64; 2]) -> [[f64; 2]; 3] {
        let mut simplex = [start; 3];
        for axis in 0..2 {
            let x = start[axis];
            let step = if x != 0.0 { NONZERO_STEP * x.abs() } else { ZERO_STEP };
            simplex[axis + 1][axis] = x + step;
        }
        simplex
    }

    fn has_converged(&self, simplex: &[[f64; 2]; 3], values: &[f64; 3]) -> bool {
        if !values.iter().all(|f| f.is_finite()) {
            return false;
        }
        let best = simplex[0];
        let diameter = simplex[1..]
            .iter()
            .flat_map(|v| v.iter().zip(best.iter()).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);
        let spread = values[1..]
            .iter()
            .map(|f| (f - values[0]).abs())
            .fold(0.0, f64::max);
        let x_scale = 1.0 + best[0].abs().max(best[1].abs());
        let f_scale = 1.0 + values[0].abs();
        diameter <= self.x_tolerance * x_scale && spread <= self.f_tolerance * f_scale
    }
}

impl Default for NelderMead {
    fn default() -> Self {
        Self::new(2000, 1e-10, 1e-12)
    }
}

#[inline]
fn along(from: &[f64; 2], to: &[f64; 2], t: f64) -> [f64; 2] {
    [from[0] + t * (to[0] - from[0]), from[1] + t * (to[1] - from[1])]
}

#[inline]
fn sanitize(v: f64) -> f64 {
    if v.is_nan() { f64::INFINITY } else { v }
}

fn sort_simplex(simplex: &mut [[f64; 2]; 3], values: &mut [f64; 3]) {
    let mut order = [0usize, 1, 2];
    // Stable: ties keep the older vertex first.
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    let s = *simplex;
    let v = *values;
    for (slot, &i) in order.iter().enumerate() {
        simplex[slot] = s[i];
        values[slot] = v[i];
    }
}

impl Optimizer for NelderMead {
    fn minimize<F>(&self, objective: F, start: [f64; 2]) -> OptimizationOutcome
    where
        F: Fn(&[f64; 2]) -> f64,
    {
        let f = |p: &[f64; 2]| sanitize(objective(p));

        let mut simplex = Self::initial_simplex(start);
        let mut values = [f(&simplex[0]), f(&simplex[1]), f(&simplex[2])];
        let mut iterations = 0;

        loop {
            sort_simplex(&mut simplex, &mut values);
            if self.has_converged(&simplex, &values) {
                return OptimizationOutcome {
                    point: simplex[0],
                    value: values[0],
                    iterations,
                    converged: true,
                };
            }
            if iterations >= self.max_iterations {
                return OptimizationOutcome {
                    point: simplex[0],
                    value: values[0],
                    iterations,
                    converged: false,
                };
            }
            iterations += 1;

            let centroid = along(&simplex[0], &simplex[1], 0.5);
            let worst = simplex[2];

            let reflected = along(&centroid, &worst, -REFLECTION);
            let f_reflected = f(&reflected);

            if f_reflected < values[0] {
                let expanded = along(&centroid, &worst, -EXPANSION);
                let f_expanded = f(&expanded);
                if f_expanded < f_reflected {
                    simplex[2] = expanded;
                    values[2] = f_expanded;
                } else {
                    simplex[2] = reflected;
                    values[2] = f_reflected;
                }
                continue;
            }

            if f_reflected < values[1] {
                simplex[2] = reflected;
                values[2] = f_reflected;
                continue;
            }

            let (contracted, accept) = if f_reflected < values[2] {
                let outside = along(&centroid, &reflected, CONTRACTION);
                let f_outside = f(&outside);
                ((outside, f_outside), f_outside <= f_reflected)
            } else {
                let inside = along(&centroid, &worst, CONTRACTION);
                let f_inside = f(&inside);
                ((inside, f_inside), f_inside < values[2])
            };

            if accept {
                simplex[2] = contracted.0;
                values[2] = contracted.1;
            } else {
                let best = simplex[0];
                for i in 1..3 {
                    simplex[i] = along(&best, &simplex[i], SHRINK);
                    values[i] = f(&simplex[i]);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_minimum_of_quadratic_bowl() {
        let nm = NelderMead::default();
        let out = nm.minimize(
            |p| (p[0] - 1.5).powi(2) + 3.0 * (p[1] + 0.25).powi(2),
            [0.0, 0.0],
        );
        assert!(out.converged);
        assert!((out.point[0] - 1.5).abs() < 1e-6, "{:?}", out.point);
        assert!((out.point[1] + 0.25).abs() < 1e-6, "{:?}", out.point);
        assert!(out.value < 1e-10);
    }

    #[test]
    fn finds_minimum_of_rosenbrock() {
        let nm = NelderMead::new(5000, 1e-10, 1e-14);
        let out = nm.minimize(
            |p| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2),
            [-1.2, 1.0],
        );
        assert!(out.converged);
        assert!((out.point[0] - 1.0).abs() < 1e-4, "{:?}", out.point);
        assert!((out.point[1] - 1.0).abs() < 1e-4, "{:?}", out.point);
    }

    #[test]
    fn routes_around_infeasible_region() {
        // Minimum sits just above the infeasible half-plane y <= 0.
        let rejected = std::cell::Cell::new(0usize);
        let nm = NelderMead::default();
        let out = nm.minimize(
            |p| {
                if p[1] <= 0.0 {
                    rejected.set(rejected.get() + 1);
                    f64::INFINITY
                } else {
                    (p[0] - 2.0).powi(2) + (p[1] - 0.01).powi(2)
                }
            },
            [0.0, 3.0],
        );
        assert!(out.converged);
        assert!(rejected.get() > 0);
        assert!(out.point[1] > 0.0);
        assert!((out.point[0] - 2.0).abs() < 1e-6);
        assert!((out.point[1] - 0.01).abs() < 1e-6);
    }

    #[test]
    fn tolerances_scale_with_coordinates() {
        // f64 spacing near 1.2e9 is ~2.4e-7, coarser than the default tolerance
        let nm = NelderMead::default();
        let (cx, cy) = (1_234_567_891.7, 54_321.3);
        let out = nm.minimize(
            |p| ((p[0] - cx) / 1e7).powi(2) + ((p[1] - cy) / 1e6).powi(2),
            [0.9 * cx, 1.2 * cy],
        );
        assert!(out.converged, "{out:?}");
        assert!((out.point[0] - cx).abs() < 1.0, "{:?}", out.point);
        assert!((out.point[1] - cy).abs() < 1.0, "{:?}", out.point);
    }

    #[test]
    fn nan_is_treated_as_infeasible() {
        let nm = NelderMead::default();
        let out = nm.minimize(
            |p| if p[0] < 0.0 { f64::NAN } else { (p[0] - 1.0).powi(2) + p[1] * p[1] },
            [0.5, 0.5],
        );
        assert!(out.converged);
        assert!(out.value.is_finite());
        assert!((out.point[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn stops_at_iteration_cap() {
        let nm = NelderMead::new(3, 1e-12, 1e-12);
        let out = nm.minimize(|p| p[0] * p[0] + p[1] * p[1], [10.0, -7.0]);
        assert!(!out.converged);
        assert_eq!(out.iterations, 3);
    }

    #[test]
    fn zero_iterations_returns_best_initial_vertex() {
        let nm = NelderMead::new(0, 1e-12, 1e-12);
        let out = nm.minimize(|p| p[0] + p[1], [1.0, 1.0]);
        assert!(!out.converged);
        assert_eq!(out.iterations, 0);
        assert_eq!(out.point, [1.0, 1.0]);
    }

    #[test]
    fn deterministic_across_runs() {
        let nm = NelderMead::default();
        let obj = |p: &[f64; 2]| (p[0] - 0.3).powi(4) + (p[1] * p[0] - 1.0).powi(2);
        let a = nm.minimize(obj, [2.0, 2.0]);
        let b = nm.minimize(obj, [2.0, 2.0]);
        assert_eq!(a.point[0].to_bits(), b.point[0].to_bits());
        assert_eq!(a.point[1].to_bits(), b.point[1].to_bits());
        assert_eq!(a.iterations, b.iterations);
    }
}
