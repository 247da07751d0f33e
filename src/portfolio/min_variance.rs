//! Long-only minimum-variance portfolio
//!
//! # Problem
//!
//! ```text
//! minimize    wᵀ Σ w
//! subject to  Σᵢ wᵢ = 1
//!             0 ≤ wᵢ ≤ 1
//! ```
//!
//! The unconstrained minimizer `Σ⁻¹1 / 1ᵀΣ⁻¹1` generally shorts some asset,
//! so the bounds are enforced numerically with a primal active-set method.
//!
//! # Algorithm
//!
//! Start from the uniform portfolio `wᵢ = 1/N` with no bound active. Each
//! iteration solves the equality-constrained subproblem on the free assets F:
//! ```text
//! [ 2Σ_FF  1 ] [ p ]   [ -∇f_F ]
//! [ 1ᵀ     0 ] [ ν ] = [   0   ]
//! ```
//! - `p ≠ 0`: move along `p` as far as the first asset that hits zero
//!   (ratio test) and pin that asset at its bound.
//! - `p = 0`: the bound multipliers are `λⱼ = ∇fⱼ + ν`. If all are
//!   non-negative the KKT conditions hold and `w` is optimal; otherwise the
//!   asset with the most negative multiplier is released.
//!
//! The upper bound `wᵢ ≤ 1` never binds separately: it follows from the
//! budget constraint and the lower bounds.
//!
//! # Singular covariance
//!
//! Σ only has to be symmetric with a positive diagonal, so rank-deficient
//! matrices (pure factor models `BBᵀ`) are valid input. Their KKT systems are
//! singular along directions on which the objective is flat. Every step is
//! therefore the minimum-norm least-squares solution from an SVD with small
//! singular values truncated. After each step the weights are put back on
//! the budget simplex, and a released asset that is blocked again without
//! any progress is not released a second time until the iterate moves.

use super::covariance::CovarianceMatrix;
use crate::error::{validation::*, FinError, FinResult};
use nalgebra::{DMatrix, DVector};
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Singular values below this fraction of the largest are treated as zero
const SVD_RCOND: f64 = 1e-12;

/// Solver settings
#[derive(Clone, Debug)]
pub struct OptimizerConfig {
    /// Upper bound on active-set iterations before giving up
    pub max_iterations: usize,
    /// A step whose largest component is below this counts as zero
    pub step_tolerance: f64,
    /// Bound multipliers above `-multiplier_tolerance * max(diag Σ)` count as non-negative
    pub multiplier_tolerance: f64,
}

impl OptimizerConfig {
    /// Validate the solver configuration
    pub fn validate(&self) -> FinResult<()> {
        if self.max_iterations == 0 {
            return Err(FinError::validation(
                "max_iterations",
                "must be greater than 0",
            ));
        }
        validate_positive("step_tolerance", self.step_tolerance)?;
        validate_positive("multiplier_tolerance", self.multiplier_tolerance)?;
        Ok(())
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            max_iterations: 200,
            step_tolerance: 1e-10,
            multiplier_tolerance: 1e-10,
        }
    }
}

/// Optimal weights and the variance they attain
#[derive(Clone, Debug, PartialEq)]
pub struct MinVarianceSolution {
    pub weights: Vec<f64>,
    pub variance: f64,
    pub iterations: usize,
}

pub struct MinVarianceOptimizer {
    config: OptimizerConfig,
}

impl MinVarianceOptimizer {
    pub fn new(config: OptimizerConfig) -> FinResult<Self> {
        config.validate()?;
        Ok(MinVarianceOptimizer { config })
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Minimize `wᵀΣw` over long-only, fully invested portfolios.
    ///
    /// # Errors
    ///
    /// `FinError::Optimization` when the iteration limit is reached or an
    /// iterate becomes non-finite. For a singular Σ the returned minimizer is
    /// one of many.
    pub fn solve(&self, cov: &CovarianceMatrix) -> FinResult<MinVarianceSolution> {
        let n = cov.dim();
        let sigma = cov.as_dmatrix();
        let multiplier_tolerance = self.config.multiplier_tolerance * cov.max_variance();

        let mut w = DVector::from_element(n, 1.0 / n as f64);
        let mut at_bound = vec![false; n];
        // Assets whose last release was undone by a zero-length step
        let mut stalled = vec![false; n];
        let mut last_released: Option<usize> = None;

        for iteration in 1..=self.config.max_iterations {
            let gradient = (sigma * &w) * 2.0;
            let free: Vec<usize> = (0..n).filter(|&i| !at_bound[i]).collect();
            if free.is_empty() {
                return Err(FinError::Optimization {
                    reason: "every asset is pinned at its lower bound".to_string(),
                    iterations: iteration,
                });
            }

            let (step, nu) = solve_kkt(sigma, &gradient, &free, iteration)?;
            let step_norm = step.amax();
            debug!(iteration, free = free.len(), step_norm, "active-set iteration");

            if step_norm <= self.config.step_tolerance {
                let release = (0..n)
                    .filter(|&j| at_bound[j] && !stalled[j])
                    .map(|j| (j, gradient[j] + nu))
                    .filter(|&(_, lambda)| lambda < -multiplier_tolerance)
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

                match release {
                    Some((j, lambda)) => {
                        debug!(asset = j, lambda, "releasing lower bound");
                        at_bound[j] = false;
                        last_released = Some(j);
                        continue;
                    }
                    None => return finish(cov, w, iteration),
                }
            }

            // Ratio test: longest step keeping every free weight non-negative
            let mut alpha = 1.0;
            let mut blocking = None;
            for (k, &i) in free.iter().enumerate() {
                if step[k] < 0.0 {
                    let ratio = (-w[i] / step[k]).max(0.0);
                    if ratio < alpha {
                        alpha = ratio;
                        blocking = Some(i);
                    }
                }
            }

            for (k, &i) in free.iter().enumerate() {
                w[i] = (w[i] + alpha * step[k]).max(0.0);
            }
            if let Some(i) = blocking {
                debug!(asset = i, alpha, "lower bound became active");
                w[i] = 0.0;
                at_bound[i] = true;
            }

            let total: f64 = w.iter().sum();
            if !total.is_finite() || total <= 0.0 {
                warn!(iteration, total, "portfolio weights left the budget simplex");
                return Err(FinError::Optimization {
                    reason: "weights left the budget simplex".to_string(),
                    iterations: iteration,
                });
            }
            w /= total;

            if alpha * step_norm > self.config.step_tolerance {
                stalled.iter_mut().for_each(|s| *s = false);
            } else if let (Some(i), Some(j)) = (blocking, last_released) {
                if i == j {
                    debug!(asset = i, "release made no progress");
                    stalled[i] = true;
                }
            }
            last_released = None;
        }

        warn!(
            max_iterations = self.config.max_iterations,
            "minimum-variance solver did not converge"
        );
        Err(FinError::Optimization {
            reason: format!(
                "Iteration limit reached ({} iterations)",
                self.config.max_iterations
            ),
            iterations: self.config.max_iterations,
        })
    }
}

impl Default for MinVarianceOptimizer {
    fn default() -> Self {
        MinVarianceOptimizer {
            config: OptimizerConfig::default(),
        }
    }
}

/// Minimum-variance long-only weights for a covariance matrix given as rows
pub fn minimize_variance(cov_matrix: &[Vec<f64>]) -> FinResult<Vec<f64>> {
    let cov = CovarianceMatrix::from_rows(cov_matrix)?;
    let solution = MinVarianceOptimizer::default().solve(&cov)?;
    Ok(solution.weights)
}

/// Solve the equality-constrained step on the free assets.
///
/// Returns the step for the free weights (in `free` order) and the budget
/// multiplier ν. The minimum-norm solution is taken when the system is
/// singular.
fn solve_kkt(
    sigma: &DMatrix<f64>,
    gradient: &DVector<f64>,
    free: &[usize],
    iteration: usize,
) -> FinResult<(DVector<f64>, f64)> {
    let m = free.len();
    let mut kkt = DMatrix::<f64>::zeros(m + 1, m + 1);
    let mut rhs = DVector::<f64>::zeros(m + 1);

    for (a, &i) in free.iter().enumerate() {
        for (b, &j) in free.iter().enumerate() {
            kkt[(a, b)] = 2.0 * sigma[(i, j)];
        }
        kkt[(a, m)] = 1.0;
        kkt[(m, a)] = 1.0;
        rhs[a] = -gradient[i];
    }

    let svd = kkt.svd(true, true);
    let eps = SVD_RCOND * svd.singular_values.amax();
    let solution = svd.solve(&rhs, eps).map_err(|e| FinError::Optimization {
        reason: format!("KKT system could not be solved: {}", e),
        iterations: iteration,
    })?;
    if solution.iter().any(|v| !v.is_finite()) {
        return Err(FinError::Optimization {
            reason: "KKT step is not finite".to_string(),
            iterations: iteration,
        });
    }

    let step = DVector::from_iterator(m, solution.iter().take(m).cloned());
    Ok((step, solution[m]))
}

fn finish(
    cov: &CovarianceMatrix,
    mut w: DVector<f64>,
    iterations: usize,
) -> FinResult<MinVarianceSolution> {
    for x in w.iter_mut() {
        *x = x.clamp(0.0, 1.0);
    }

    let total: f64 = w.iter().sum();
    if (total - 1.0).abs() > 1e-9 {
        return Err(FinError::Optimization {
            reason: format!("weights sum to {} instead of 1", total),
            iterations,
        });
    }

    let variance = cov.portfolio_variance(&w);
    debug!(iterations, variance, "minimum-variance solve converged");
    Ok(MinVarianceSolution {
        weights: w.iter().cloned().collect(),
        variance,
        iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cov(rows: &[Vec<f64>]) -> CovarianceMatrix {
        CovarianceMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_two_asset_interior_solution() {
        let solution = MinVarianceOptimizer::default()
            .solve(&cov(&[vec![0.1, 0.02], vec![0.02, 0.08]]))
            .unwrap();
        // (σ₂² - σ₁₂) / (σ₁² + σ₂² - 2σ₁₂) = 0.06 / 0.14
        assert!((solution.weights[0] - 3.0 / 7.0).abs() < 1e-10);
        assert!((solution.weights[1] - 4.0 / 7.0).abs() < 1e-10);
        assert!(solution.variance < 0.055);
    }

    #[test]
    fn test_corner_solution_when_unconstrained_optimum_shorts() {
        // σ₁ = 0.1, σ₂ = 0.4, ρ = 0.75: the unconstrained optimum shorts asset 2
        let solution = MinVarianceOptimizer::default()
            .solve(&cov(&[vec![0.01, 0.03], vec![0.03, 0.16]]))
            .unwrap();
        assert!((solution.weights[0] - 1.0).abs() < 1e-12);
        assert_eq!(solution.weights[1], 0.0);
        assert!((solution.variance - 0.01).abs() < 1e-12);
        assert_eq!(solution.iterations, 2);
    }

    #[test]
    fn test_single_asset() {
        let solution = MinVarianceOptimizer::default()
            .solve(&cov(&[vec![0.04]]))
            .unwrap();
        assert_eq!(solution.weights, vec![1.0]);
    }

    #[test]
    fn test_diagonal_matrix_inverse_variance_weights() {
        let solution = MinVarianceOptimizer::default()
            .solve(&cov(&[
                vec![0.01, 0.0, 0.0],
                vec![0.0, 0.04, 0.0],
                vec![0.0, 0.0, 0.16],
            ]))
            .unwrap();
        // wᵢ ∝ 1/σᵢ²: 100, 25, 6.25
        let total = 131.25;
        let expected = [100.0 / total, 25.0 / total, 6.25 / total];
        for (w, e) in solution.weights.iter().zip(expected.iter()) {
            assert!((w - e).abs() < 1e-10, "{} vs {}", w, e);
        }
    }

    #[test]
    fn test_singular_matrix_returns_feasible_weights() {
        let solution = MinVarianceOptimizer::default()
            .solve(&cov(&[vec![1.0, 1.0], vec![1.0, 1.0]]))
            .unwrap();
        let total: f64 = solution.weights.iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
        assert!(solution.weights.iter().all(|&w| (0.0..=1.0).contains(&w)));
        assert!((solution.variance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_one_matrix_reaches_zero_variance() {
        // Σ = bbᵀ with b = (1, -1, 0.5): any w with bᵀw = 0 is riskless
        let b = [1.0, -1.0, 0.5];
        let rows: Vec<Vec<f64>> = b.iter().map(|x| b.iter().map(|y| x * y).collect()).collect();
        let solution = MinVarianceOptimizer::default().solve(&cov(&rows)).unwrap();

        let total: f64 = solution.weights.iter().sum();
        let exposure: f64 = b.iter().zip(&solution.weights).map(|(x, w)| x * w).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(exposure.abs() < 1e-10, "bᵀw = {}", exposure);
        assert!(solution.variance < 1e-18);
        assert!(solution.weights.iter().all(|&w| w >= 0.0));
    }

    #[test]
    fn test_iteration_limit_is_reported() {
        let optimizer = MinVarianceOptimizer::new(OptimizerConfig {
            max_iterations: 1,
            ..Default::default()
        })
        .unwrap();
        let err = optimizer
            .solve(&cov(&[vec![0.01, 0.03], vec![0.03, 0.16]]))
            .unwrap_err();
        match err {
            FinError::Optimization { reason, iterations } => {
                assert!(reason.contains("Iteration limit"));
                assert_eq!(iterations, 1);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(OptimizerConfig::default().validate().is_ok());
        assert!(MinVarianceOptimizer::new(OptimizerConfig {
            max_iterations: 0,
            ..Default::default()
        })
        .is_err());
        assert!(OptimizerConfig {
            step_tolerance: 0.0,
            ..Default::default()
        }
        .validate()
        .is_err());
    }

    #[test]
    fn test_minimize_variance_validates_rows() {
        assert!(minimize_variance(&[vec![0.1, 0.03], vec![0.02, 0.08]]).is_err());
        let weights = minimize_variance(&[vec![0.1, 0.02], vec![0.02, 0.08]]).unwrap();
        assert_eq!(weights.len(), 2);
    }
}
