// demos/error_handling_demo.rs
use fin_calc::analytics::{black_scholes_call, calculate_capm, calculate_sharpe_ratio, calculate_var};
use fin_calc::portfolio::{minimize_variance, CovarianceMatrix, MinVarianceOptimizer, OptimizerConfig};
use fin_calc::FinError;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Error Handling Demo for fin-calc");
    println!("================================\n");

    // Test 1: Market return below the risk-free rate
    println!("1. Testing CAPM with a negative equity premium...");
    match calculate_capm(1.0, 5.0, 3.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 2: Beta out of range
    println!("\n2. Testing CAPM with beta = 10...");
    match calculate_capm(10.0, 3.0, 8.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 3: Zero volatility
    println!("\n3. Testing Sharpe ratio with zero standard deviation...");
    match calculate_sharpe_ratio(12.0, 3.0, 0.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 4: Confidence level written as a percentage
    println!("\n4. Testing VaR with confidence level 95 instead of 0.95...");
    match calculate_var(5.0, 10.0, 95.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 5: Ambiguous percentage input that is accepted
    println!("\n5. Testing Black-Scholes with sigma = 1.5 (read as 1.5%)...");
    match black_scholes_call(100.0, 100.0, 1.0, 5.0, 1.5) {
        Ok(price) => println!("   ✓ Accepted: Price = {:.4} (sigma normalized to 0.015)", price),
        Err(e) => println!("   Error: {}", e),
    }

    // Test 6: Asymmetric covariance matrix
    println!("\n6. Testing portfolio optimization with an asymmetric matrix...");
    match minimize_variance(&[vec![0.1, 0.03], vec![0.02, 0.08]]) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(e) => println!("   ✓ Caught error: {}", e),
    }

    // Test 7: Solver stopped early
    println!("\n7. Testing the optimizer with a one-iteration budget...");
    let optimizer = MinVarianceOptimizer::new(OptimizerConfig {
        max_iterations: 1,
        ..Default::default()
    })
    .expect("Valid configuration");
    let cov = CovarianceMatrix::from_rows(&[vec![0.01, 0.03], vec![0.03, 0.16]])
        .expect("Valid matrix");
    match optimizer.solve(&cov) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(FinError::Optimization { reason, iterations }) => {
            println!("   ✓ Caught Optimization after {} iteration(s): {}", iterations, reason);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    // Test 8: Valid inputs should work
    println!("\n8. Testing valid inputs...");
    match minimize_variance(&[vec![0.1, 0.02], vec![0.02, 0.08]]) {
        Ok(weights) => println!("   ✓ Success: Weights = {:?}", weights),
        Err(e) => println!("   Unexpected error: {}", e),
    }

    // Test 9: Error type matching
    println!("\n9. Testing error type matching...");
    match black_scholes_call(-100.0, 100.0, 1.0, 5.0, 20.0) {
        Ok(_) => println!("   Unexpected: Should have failed!"),
        Err(FinError::Validation { field, constraint }) => {
            println!("   ✓ Caught Validation: {} ({})", field, constraint);
        }
        Err(other) => println!("   Unexpected error type: {}", other),
    }

    println!("\n✓ Error handling demo complete!");
    println!("All error cases were properly caught and handled.");
}
