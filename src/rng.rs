//! Seeded random inputs for benchmarks and stress tests
//!
//! # Factor Covariance
//!
//! Random covariance matrices are drawn from a factor model
//! ```text
//! Σ = B Bᵀ / k + diag(d)
//! ```
//! with `B` an N×k matrix of standard normal loadings scaled by `vol`, and
//! `d` idiosyncratic variances. The result is symmetric positive definite
//! with a strictly positive diagonal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

pub fn seed_rng_from_u64(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn get_normal_draw<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    StandardNormal.sample(rng)
}

/// Random N×N covariance matrix as rows, from `factors` common factors
pub fn random_covariance<R: Rng + ?Sized>(
    n: usize,
    factors: usize,
    vol: f64,
    rng: &mut R,
) -> Vec<Vec<f64>> {
    let k = factors.max(1);
    let loadings: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..k).map(|_| vol * get_normal_draw(rng)).collect())
        .collect();

    let mut cov = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let c: f64 = loadings[i]
                .iter()
                .zip(&loadings[j])
                .map(|(a, b)| a * b)
                .sum::<f64>()
                / k as f64;
            cov[i][j] = c;
            cov[j][i] = c;
        }
        let idiosyncratic = vol * vol * rng.gen_range(0.05..0.5);
        cov[i][i] += idiosyncratic;
    }
    cov
}
