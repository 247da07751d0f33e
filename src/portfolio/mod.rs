//! Minimum-variance portfolio construction

pub mod covariance;
pub mod min_variance;

pub use covariance::CovarianceMatrix;
pub use min_variance::{
    minimize_variance, MinVarianceOptimizer, MinVarianceSolution, OptimizerConfig,
};
