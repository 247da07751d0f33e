// demos/tool_calls.rs
use fin_calc::tools::{catalog, handle_json};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "--catalog" {
        match serde_json::to_string_pretty(&catalog()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not encode catalog: {}", e),
        }
        return;
    }

    let calls = [
        r#"{"name": "capm", "arguments": {"beta": 1.2, "risk_free_rate": 3, "market_return": 8}}"#,
        r#"{"name": "sharpe", "arguments": {"portfolio_return": 12, "risk_free_rate": 3, "std_dev": 15}}"#,
        r#"{"name": "var_tool", "arguments": {"mean_return": 5, "std_dev": 10, "confidence_level": 0.95}}"#,
        r#"{"name": "black_scholes", "arguments": {"S": 100, "K": 100, "T": 1, "r": 5, "sigma": 20}}"#,
        r#"{"name": "altman_z", "arguments": {"working_capital": 500, "retained_earnings": 1000, "ebit": 300, "market_value_equity": 2000, "total_assets": 5000, "total_liabilities": 3000, "sales": 4000}}"#,
        r#"{"name": "portfolio_optimization", "arguments": {"cov_matrix": [[0.1, 0.02], [0.02, 0.08]]}}"#,
        r#"{"name": "capm", "arguments": {"beta": 10, "risk_free_rate": 3, "market_return": 8}}"#,
        r#"{"name": "capm", "arguments": {"beta": 1.2}}"#,
    ];

    println!("fin-calc tool calls");
    println!("===================\n");
    for call in calls.iter() {
        println!("-> {}", call);
        println!("<- {}\n", handle_json(call));
    }
}
