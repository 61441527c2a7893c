// Lift Benchmark Runner v0.1.0 - Dispatch Chain Validation
// Monte Carlo (N=30), Poisson arrivals, seedable PRNG, per-tick audit trail
//
// Usage:
//   cargo run --release --bin bench                     # Run all scenarios (30 runs each)
//   cargo run --release --bin bench -- --runs 5         # Quick mode (5 runs each)
//   cargo run --release --bin bench -- LOBBY            # Filter by name, label or category
//   cargo run --release --bin bench -- --time-series    # Enable JSONL output
//   cargo run --release --bin bench -- --seed 42        # Custom base seed
//   cargo run --release --bin bench -- --ticks 500      # Override ticks per run
//   cargo run --release --bin bench -- --config b.json  # Run every scenario in one building
//
// Set RUST_LOG=lift_engine=debug to trace boarding and dispatch decisions.

mod report;
mod scenarios;
mod monte_carlo;
mod metrics;
mod time_series;

use lift_engine::BuildingConfig;
use report::*;
use scenarios::*;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seed: u64,
    ticks: Option<u64>,
    config: Option<String>,
    time_series: bool,
    filter: Option<String>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 30,
        seed: 0,
        ticks: None,
        config: None,
        time_series: false,
        filter: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(30);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--ticks" => {
                i += 1;
                if i < args.len() {
                    cli.ticks = args[i].parse().ok();
                }
            }
            "--config" => {
                i += 1;
                if i < args.len() {
                    cli.config = Some(args[i].clone());
                }
            }
            "--time-series" => {
                cli.time_series = true;
            }
            arg if !arg.starts_with('-') => {
                cli.filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn load_config(path: &str) -> Result<BuildingConfig, String> {
    let json = std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let config = BuildingConfig::from_json(&json).map_err(|e| format!("{}: {}", path, e))?;
    Ok(config)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let cli = parse_args();
    let all_scenarios = scenarios();

    let config_override = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("Invalid building config {}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let to_run: Vec<&Scenario> = match &cli.filter {
        Some(f) => {
            let f_lower = f.to_lowercase();
            all_scenarios.iter()
                .filter(|s| s.name.to_lowercase().contains(&f_lower)
                          || s.label.to_lowercase().contains(&f_lower)
                          || s.category.to_lowercase().contains(&f_lower))
                .collect()
        }
        None => all_scenarios.iter().collect(),
    };

    if to_run.is_empty() {
        eprintln!("No scenarios match filter: {:?}", cli.filter);
        std::process::exit(1);
    }

    let ts_dir = if cli.time_series {
        Some(std::path::Path::new("benchmark-results/time-series").to_path_buf())
    } else {
        None
    };

    println!("\n  Lift Benchmark Runner v0.1.0");
    println!("  PRNG: ChaCha8Rng | Runs/scenario: {} | Base seed: {}", cli.runs, cli.seed);
    println!("  Running {} scenario(s)...\n", to_run.len());
    println!("  {:<30} {:>5} {:>12} {:>12} {:>10} {:>6} {:>8}",
        "Scenario", "Pass%", "Delivered%", "Wait(ticks)", "Trip", "Load", "Time");
    println!("  {}", "-".repeat(92));

    let suite_start = Instant::now();
    let mut mc_reports = Vec::new();

    for scenario in &to_run {
        let building = match &config_override {
            Some(config) => config.clone(),
            None => (scenario.building)(),
        };
        let ticks = cli.ticks.unwrap_or(scenario.ticks);

        let report = match monte_carlo::run_monte_carlo(
            scenario,
            &building,
            ticks,
            cli.runs,
            cli.seed,
            ts_dir.as_deref(),
        ) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("  {}: building rejected: {}", scenario.name, e);
                std::process::exit(1);
            }
        };

        let pass_pct = report.pass_rate * 100.0;
        let status = if pass_pct >= 93.3 { "PASS" } else { "FAIL" };

        println!("  {:<30} {:>4}% {:>6.1}±{:<4.1} {:>6.1}±{:<4.1} {:>10.1} {:>5.0}% {:>6.0}ms  {}",
            report.label,
            pass_pct as u32,
            report.delivery_rate.mean, report.delivery_rate.margin(),
            report.avg_wait_ticks.mean, report.avg_wait_ticks.margin(),
            report.avg_trip_ticks.mean,
            report.peak_load_factor.mean * 100.0,
            report.elapsed_ms.mean,
            status,
        );

        mc_reports.push(report);
    }

    let suite_elapsed = suite_start.elapsed();

    // ─── Summary ────────────────────────────────────────────────────────

    let total = mc_reports.len();
    let passed = mc_reports.iter().filter(|r| r.pass_rate >= 0.933).count();
    let failed = total - passed;

    println!("  {}", "-".repeat(92));
    println!("  Total: {}  Passed: {}  Failed: {}  Suite time: {:.1}s\n",
        total, passed, failed, suite_elapsed.as_secs_f64());

    // ─── Write JSON Report ──────────────────────────────────────────────

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let timestamp = format!("{}", ts);

    let report = BenchReport {
        timestamp: timestamp.clone(),
        version: env!("CARGO_PKG_VERSION"),
        prng: "ChaCha8Rng",
        n_runs_per_scenario: cli.runs,
        summary: Summary {
            total,
            passed,
            failed,
            pass_rate: passed as f64 / total as f64,
        },
        scenarios: mc_reports,
    };

    let dir = std::path::Path::new("benchmark-results");
    if let Err(e) = std::fs::create_dir_all(dir) {
        eprintln!("  Failed to create {}: {}", dir.display(), e);
        std::process::exit(1);
    }
    let path = dir.join(format!("bench-{}.json", timestamp));
    let written = serde_json::to_string_pretty(&report)
        .map_err(|e| e.to_string())
        .and_then(|json| std::fs::write(&path, json).map_err(|e| e.to_string()));
    match written {
        Ok(()) => println!("  Results saved to: {}\n", path.display()),
        Err(e) => {
            eprintln!("  Failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
