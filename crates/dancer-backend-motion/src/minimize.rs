//! Bounded derivative-free minimization in one dimension.
//!
//! A Nelder–Mead simplex (two vertices in 1-D) with every trial point clipped
//! into the bounds. It only compares objective values, so it tolerates the
//! flat steps and kinks that clamping puts into the calibration objectives.
//! The coefficients and stopping rule follow the common reference setup:
//! reflection 1, expansion 2, contraction 0.5, shrink 0.5, and convergence when
//! both the simplex width and the spread of its values fall below tolerance.

use serde::{Deserialize, Serialize};

/// Minimizer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizeConfig {
    /// Absolute tolerance on the simplex width.
    pub xatol: f64,
    /// Absolute tolerance on the spread of objective values.
    pub fatol: f64,
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Maximum number of objective evaluations.
    pub max_evals: usize,
}

impl Default for MinimizeConfig {
    fn default() -> Self {
        Self {
            xatol: 1e-4,
            fatol: 1e-4,
            max_iter: 200,
            max_evals: 200,
        }
    }
}

/// Outcome of a minimization run.
///
/// The run never fails: when the budget runs out the best point found so far
/// is returned with `converged == false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimizeReport {
    /// Best point found.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Objective evaluations performed.
    pub evaluations: usize,
    /// Whether the tolerances were met within budget.
    pub converged: bool,
}

const REFLECT: f64 = 1.0;
const EXPAND: f64 = 2.0;
const CONTRACT: f64 = 0.5;
const SHRINK: f64 = 0.5;
const NONZERO_STEP: f64 = 0.05;
const ZERO_STEP: f64 = 0.00025;

#[derive(Debug, Clone, Copy)]
struct Vertex {
    x: f64,
    f: f64,
}

struct Counted<F> {
    objective: F,
    lo: f64,
    hi: f64,
    evaluations: usize,
}

impl<F: FnMut(f64) -> f64> Counted<F> {
    fn eval(&mut self, x: f64) -> Vertex {
        let x = x.clamp(self.lo, self.hi);
        self.evaluations += 1;
        let f = (self.objective)(x);
        // NaN sorts last so it never becomes the best vertex.
        Vertex {
            x,
            f: if f.is_nan() { f64::INFINITY } else { f },
        }
    }
}

/// Minimizes `objective` over `[lo, hi]` starting from `x0`.
///
/// # Example
/// ```
/// use dancer_backend_motion::minimize::{minimize_bounded, MinimizeConfig};
///
/// let config = MinimizeConfig::default();
/// let report = minimize_bounded(|x| (x - 3.0).abs(), 10.0, (-20.0, 20.0), &config);
/// assert!(report.converged);
/// assert!((report.x - 3.0).abs() < 1e-3);
/// ```
pub fn minimize_bounded<F>(
    objective: F,
    x0: f64,
    bounds: (f64, f64),
    config: &MinimizeConfig,
) -> MinimizeReport
where
    F: FnMut(f64) -> f64,
{
    let (lo, hi) = if bounds.0 <= bounds.1 {
        bounds
    } else {
        (bounds.1, bounds.0)
    };
    let mut counted = Counted {
        objective,
        lo,
        hi,
        evaluations: 0,
    };

    let x0 = x0.clamp(lo, hi);
    let mut x1 = if x0 != 0.0 {
        (1.0 + NONZERO_STEP) * x0
    } else {
        ZERO_STEP
    };
    // Reflect the second vertex back inside rather than collapsing it onto x0.
    if x1 > hi {
        x1 = 2.0 * hi - x1;
    } else if x1 < lo {
        x1 = 2.0 * lo - x1;
    }

    let mut simplex = [counted.eval(x0), counted.eval(x1)];
    sort(&mut simplex);

    let mut iterations = 0;
    let mut converged = false;

    while counted.evaluations < config.max_evals && iterations < config.max_iter {
        let [best, worst] = simplex;
        if (worst.x - best.x).abs() <= config.xatol && (worst.f - best.f).abs() <= config.fatol {
            converged = true;
            break;
        }

        // In 1-D the centroid of all vertices but the worst is the best vertex.
        let centroid = best.x;
        let reflected = counted.eval((1.0 + REFLECT) * centroid - REFLECT * worst.x);

        if reflected.f < best.f {
            let expanded =
                counted.eval((1.0 + REFLECT * EXPAND) * centroid - REFLECT * EXPAND * worst.x);
            simplex[1] = if expanded.f < reflected.f {
                expanded
            } else {
                reflected
            };
        } else if reflected.f < worst.f {
            // Outside contraction.
            let contracted = counted
                .eval((1.0 + CONTRACT * REFLECT) * centroid - CONTRACT * REFLECT * worst.x);
            if contracted.f <= reflected.f {
                simplex[1] = contracted;
            } else {
                simplex[1] = shrink(&mut counted, best, worst);
            }
        } else {
            // Inside contraction.
            let contracted = counted.eval((1.0 - CONTRACT) * centroid + CONTRACT * worst.x);
            if contracted.f < worst.f {
                simplex[1] = contracted;
            } else {
                simplex[1] = shrink(&mut counted, best, worst);
            }
        }

        iterations += 1;
        sort(&mut simplex);
    }

    if !converged {
        let [best, worst] = simplex;
        converged =
            (worst.x - best.x).abs() <= config.xatol && (worst.f - best.f).abs() <= config.fatol;
    }

    let best = simplex[0];
    MinimizeReport {
        x: best.x,
        value: best.f,
        iterations,
        evaluations: counted.evaluations,
        converged,
    }
}

fn shrink<F>(counted: &mut Counted<F>, best: Vertex, worst: Vertex) -> Vertex
where
    F: FnMut(f64) -> f64,
{
    counted.eval(best.x + SHRINK * (worst.x - best.x))
}

fn sort(simplex: &mut [Vertex; 2]) {
    if simplex[1].f < simplex[0].f {
        simplex.swap(0, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_minimum() {
        let config = MinimizeConfig::default();
        let report = minimize_bounded(|x| (x - 42.0).powi(2), 100.0, (-200.0, 200.0), &config);
        assert!(report.converged);
        assert!((report.x - 42.0).abs() < 1e-2, "x = {}", report.x);
        assert!(report.evaluations <= 200);
    }

    #[test]
    fn test_minimum_outside_bounds_lands_on_bound() {
        let report = minimize_bounded(|x| x, 10.0, (0.0, 100.0), &MinimizeConfig::default());
        assert!(report.converged);
        assert_eq!(report.x, 0.0);
        assert_eq!(report.value, 0.0);
    }

    #[test]
    fn test_zero_start_uses_small_step() {
        let config = MinimizeConfig::default();
        let report = minimize_bounded(|x| (x - 1.0).abs(), 0.0, (-5.0, 5.0), &config);
        assert!((report.x - 1.0).abs() < 1e-3, "x = {}", report.x);
    }

    #[test]
    fn test_start_at_upper_bound_stays_inside() {
        let mut seen = Vec::new();
        let report = minimize_bounded(
            |x| {
                seen.push(x);
                (x - 50.0).abs()
            },
            100.0,
            (0.0, 100.0),
            &MinimizeConfig::default(),
        );
        assert!(seen.iter().all(|x| (0.0..=100.0).contains(x)));
        assert!((report.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_start_at_negative_lower_bound_moves() {
        let report = minimize_bounded(
            |x| (x + 50.0).abs(),
            -200.0,
            (-200.0, 200.0),
            &MinimizeConfig::default(),
        );
        assert!(report.converged);
        assert!((report.x + 50.0).abs() < 1e-3, "x = {}", report.x);
        assert!(report.evaluations > 2);
    }

    #[test]
    fn test_budget_exhausted_returns_best_so_far() {
        let config = MinimizeConfig {
            max_iter: 1,
            ..MinimizeConfig::default()
        };
        let report = minimize_bounded(|x| (x - 42.0).powi(2), 100.0, (-200.0, 200.0), &config);
        assert!(!report.converged);
        assert_eq!(report.iterations, 1);
        // Never worse than the starting point.
        assert!(report.value <= (100.0f64 - 42.0).powi(2));
    }

    #[test]
    fn test_nan_objective_never_best() {
        let report = minimize_bounded(
            |x| if x > 20.0 { f64::NAN } else { (x - 10.0).abs() },
            15.0,
            (0.0, 30.0),
            &MinimizeConfig::default(),
        );
        assert!(report.value.is_finite());
        assert!(report.x <= 20.0);
    }
}
