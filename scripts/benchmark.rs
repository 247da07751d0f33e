// scripts/benchmark.rs
use fin_calc::analytics::{black_scholes_call, calculate_capm, calculate_var};
use fin_calc::math_utils::Timer;
use fin_calc::portfolio::{CovarianceMatrix, MinVarianceOptimizer};
use fin_calc::rng::{random_covariance, seed_rng_from_u64};
use fin_calc::tools::{evaluate_batch, ToolCall};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use tracing::{info, warn};

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rust_version: Command::new("rustc")
                .arg("--version")
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown Rust version".to_string()),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    size: usize,
    calls: usize,
    time_ms: f64,
    calls_per_sec: f64,
    value: f64,
}

impl BenchmarkResult {
    fn new(name: String, size: usize, calls: usize, time_ms: f64, value: f64) -> Self {
        Self {
            name,
            size,
            calls,
            time_ms,
            calls_per_sec: calls as f64 / (time_ms / 1000.0).max(f64::EPSILON),
            value,
        }
    }
}

fn run_formula_benchmarks() -> Vec<BenchmarkResult> {
    let calls = 1_000_000;
    let mut results = Vec::new();

    let mut timer = Timer::new();
    timer.start();
    let mut checksum = 0.0;
    for i in 0..calls {
        let spot = 80.0 + (i % 400) as f64 * 0.1;
        checksum += black_scholes_call(spot, 100.0, 1.0, 5.0, 20.0).unwrap_or(0.0);
    }
    results.push(BenchmarkResult::new(
        "Black-Scholes call".to_string(),
        1,
        calls,
        timer.elapsed_ms(),
        checksum / calls as f64,
    ));

    timer.start();
    let mut checksum = 0.0;
    for i in 0..calls {
        let confidence = 0.90 + (i % 90) as f64 * 0.001;
        checksum += calculate_var(5.0, 10.0, confidence).unwrap_or(0.0);
    }
    results.push(BenchmarkResult::new(
        "Parametric VaR".to_string(),
        1,
        calls,
        timer.elapsed_ms(),
        checksum / calls as f64,
    ));

    timer.start();
    let mut checksum = 0.0;
    for i in 0..calls {
        let beta = (i % 300) as f64 * 0.01;
        checksum += calculate_capm(beta, 3.0, 8.0).unwrap_or(0.0);
    }
    results.push(BenchmarkResult::new(
        "CAPM".to_string(),
        1,
        calls,
        timer.elapsed_ms(),
        checksum / calls as f64,
    ));

    results
}

fn run_optimizer_benchmarks() -> Vec<BenchmarkResult> {
    let optimizer = MinVarianceOptimizer::default();
    let mut results = Vec::new();

    for &n in &[5, 20, 50, 100] {
        println!("Running minimum-variance benchmark with {} assets...", n);
        let repetitions = 20;
        let matrices: Vec<CovarianceMatrix> = (0..repetitions)
            .filter_map(|seed| {
                let rows = random_covariance(n, 4, 0.25, &mut seed_rng_from_u64(seed as u64));
                CovarianceMatrix::from_rows(&rows).ok()
            })
            .collect();

        let mut timer = Timer::new();
        timer.start();
        let mut total_variance = 0.0;
        let mut solved = 0;
        for cov in &matrices {
            match optimizer.solve(cov) {
                Ok(solution) => {
                    total_variance += solution.variance;
                    solved += 1;
                }
                Err(e) => warn!(assets = n, error = %e, "benchmark solve failed"),
            }
        }
        let time_ms = timer.elapsed_ms();

        results.push(BenchmarkResult::new(
            "Minimum variance".to_string(),
            n,
            solved,
            time_ms,
            total_variance / solved.max(1) as f64,
        ));
    }

    results
}

fn run_batch_benchmark() -> BenchmarkResult {
    let calls: Vec<ToolCall> = (0..10_000)
        .map(|seed| ToolCall::PortfolioOptimization {
            cov_matrix: random_covariance(10, 3, 0.25, &mut seed_rng_from_u64(seed)),
        })
        .collect();

    let mut timer = Timer::new();
    timer.start();
    let results = evaluate_batch(&calls);
    let time_ms = timer.elapsed_ms();

    let ok = results.iter().filter(|r| r.is_ok()).count();
    BenchmarkResult::new(
        "Parallel tool batch".to_string(),
        10,
        calls.len(),
        time_ms,
        ok as f64 / calls.len() as f64,
    )
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(file, "Benchmark,Size,Calls,Time_ms,Calls_per_sec,Value")?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.2},{:.0},{:.8}",
            result.name,
            result.size,
            result.calls,
            result.time_ms,
            result.calls_per_sec,
            result.value
        )?;
    }

    info!(filename, "benchmark results written");
    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("fin-calc Benchmark Suite");
    println!("========================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    println!("Running formula benchmarks...");
    let mut all_results = run_formula_benchmarks();

    println!("\nRunning optimizer benchmarks...");
    all_results.extend(run_optimizer_benchmarks());

    println!("\nRunning parallel batch benchmark...");
    all_results.push(run_batch_benchmark());

    println!("\n{:=<80}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<80}", "");
    println!(
        "{:<25} {:>6} {:>10} {:>12} {:>15} {:>12}",
        "Benchmark", "Size", "Calls", "Time (ms)", "Calls/sec", "Value"
    );
    println!("{:-<80}", "");
    for result in &all_results {
        println!(
            "{:<25} {:>6} {:>10} {:>12.2} {:>15.0} {:>12.6}",
            result.name,
            result.size,
            result.calls,
            result.time_ms,
            result.calls_per_sec,
            result.value
        );
    }
    println!("{:=<80}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    write_results_to_csv(&all_results, &system_info, &filename)?;

    println!("\nBenchmark complete!");
    println!("Results saved to: {}", filename);
    println!("\nTo reproduce: cargo run --bin benchmark --release");
    Ok(())
}
