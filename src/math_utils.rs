// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::SQRT_2;

/// Standard normal cumulative distribution function Φ(x)
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

/// Standard normal quantile function Φ⁻¹(p).
///
/// ```text
/// Φ⁻¹(p) = -√2 * erfc⁻¹(2p)
/// ```
///
/// Returns `-∞` at `p = 0`, `+∞` at `p = 1` and NaN outside `[0, 1]`.
pub fn norm_inv_cdf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }
    -SQRT_2 * erf::erfc_inv(2.0 * p)
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Timer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_cdf_reference_points() {
        assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((norm_cdf(1.96) - 0.975_002_104_851_780).abs() < 1e-9);
        assert!((norm_cdf(-1.0) - 0.158_655_253_931_457).abs() < 1e-9);
    }

    #[test]
    fn test_norm_inv_cdf_reference_points() {
        assert!(norm_inv_cdf(0.5).abs() < 1e-12);
        assert!((norm_inv_cdf(0.05) + 1.644_853_626_951_472).abs() < 1e-9);
        assert!((norm_inv_cdf(0.975) - 1.959_963_984_540_054).abs() < 1e-9);
    }

    #[test]
    fn test_norm_inv_cdf_inverts_cdf() {
        for &x in &[-3.0, -1.5, -0.2, 0.0, 0.7, 2.4] {
            let round_trip = norm_inv_cdf(norm_cdf(x));
            assert!(
                (round_trip - x).abs() < 1e-7,
                "Φ⁻¹(Φ({})) = {}",
                x,
                round_trip
            );
        }
    }

    #[test]
    fn test_norm_inv_cdf_edges() {
        assert_eq!(norm_inv_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(norm_inv_cdf(1.0), f64::INFINITY);
        assert!(norm_inv_cdf(1.5).is_nan());
        assert!(norm_inv_cdf(-0.1).is_nan());
    }
}
