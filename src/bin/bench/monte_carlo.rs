// Monte Carlo Infrastructure - N runs per scenario with statistical aggregation
// Each scenario runs N times with seeds base..base+N, computing mean ± 95% CI

use lift_engine::*;

use crate::report::*;
use crate::scenarios::Scenario;
use crate::metrics::{ActionHistogram, LoadTracker};
use crate::time_series::TimeSeriesRecorder;

use std::time::Instant;

/// Run a single scenario iteration with a specific seed.
pub fn run_single(
    scenario: &Scenario,
    building: &BuildingConfig,
    ticks: u64,
    seed: u64,
    time_series_dir: Option<&std::path::Path>,
) -> Result<BenchResult, ConfigError> {
    let start = Instant::now();
    let mut sim = Building::from_config(building.clone(), seed)?;

    if let Some(setup) = &scenario.setup {
        setup(&mut sim);
    }

    let mut actions = ActionHistogram::new();
    let mut load = LoadTracker::new();
    let mut time_series = time_series_dir.map(|_| TimeSeriesRecorder::new());
    let mut ledger_balanced = true;
    let mut last_stats = sim.stats();

    for tick in 0..ticks {
        let rate = scenario.rate_at(tick);
        let result = sim.tick(rate);

        actions.record_tick(&result.actions);
        load.record_tick(&result);
        if let Some(ref mut ts) = time_series {
            ts.record(&result, rate);
        }
        ledger_balanced &= result.stats.ledger_balanced;
        last_stats = result.stats;
    }

    if let (Some(ts), Some(dir)) = (&time_series, time_series_dir) {
        let path = dir.join(format!("seed-{}.jsonl", seed));
        if let Err(e) = ts.write_jsonl(&path) {
            eprintln!("  Warning: failed to write time series: {}", e);
        }
    }

    let elapsed = start.elapsed();
    let elapsed_secs = elapsed.as_secs_f64().max(0.001);

    let stats = &last_stats;
    let delivery_rate = if stats.spawned > 0 {
        stats.delivered as f64 / stats.spawned as f64 * 100.0
    } else {
        100.0
    };

    // Evaluate pass/fail
    let criteria = &scenario.criteria;
    let mut pass = true;
    if criteria.require_ledger_balanced && !ledger_balanced {
        pass = false;
    }
    if criteria.require_capacity_respected && !load.capacity_respected {
        pass = false;
    }
    if let Some(min_rate) = criteria.min_delivery_rate {
        if delivery_rate < min_rate {
            pass = false;
        }
    }
    if let Some(max_wait) = criteria.max_avg_wait_ticks {
        if stats.avg_wait_ticks > max_wait {
            pass = false;
        }
    }
    if let Some(max_spawned) = criteria.max_spawned {
        if stats.spawned > max_spawned {
            pass = false;
        }
    }
    if criteria.require_drained && (stats.waiting > 0 || stats.riding > 0) {
        pass = false;
    }

    Ok(BenchResult {
        scenario: scenario.label.to_string(),
        name: scenario.name.to_string(),
        category: scenario.category.to_string(),
        seed,
        pass,
        ticks,
        spawned: stats.spawned,
        boarded: stats.boarded,
        delivered: stats.delivered,
        waiting_at_end: stats.waiting,
        riding_at_end: stats.riding,
        delivery_rate,
        avg_wait_ticks: stats.avg_wait_ticks,
        avg_trip_ticks: stats.avg_trip_ticks,
        peak_waiting: load.peak_waiting,
        peak_load_factor: load.peak_load_factor,
        ledger_balanced,
        capacity_respected: load.capacity_respected,
        action_share: actions.shares(),
        elapsed_ms: elapsed.as_millis(),
        ticks_per_sec: ticks as f64 / elapsed_secs,
    })
}

/// Run Monte Carlo: N runs of a scenario, aggregate stats.
pub fn run_monte_carlo(
    scenario: &Scenario,
    building: &BuildingConfig,
    ticks: u64,
    n_runs: usize,
    base_seed: u64,
    time_series_base: Option<&std::path::Path>,
) -> Result<MonteCarloReport, ConfigError> {
    let ts_dir = time_series_base.map(|base| base.join(scenario.name.to_lowercase()));

    let mut results = Vec::with_capacity(n_runs);
    for i in 0..n_runs {
        let seed = base_seed + i as u64;
        results.push(run_single(scenario, building, ticks, seed, ts_dir.as_deref())?);
    }

    Ok(aggregate(scenario, results))
}

/// Aggregate individual runs into a MonteCarloReport.
fn aggregate(scenario: &Scenario, results: Vec<BenchResult>) -> MonteCarloReport {
    let n = results.len();
    let passed = results.iter().filter(|r| r.pass).count();
    let pass_rate = if n > 0 { passed as f64 / n as f64 } else { 0.0 };

    let collect = |f: fn(&BenchResult) -> f64| {
        Stats::from_samples(&results.iter().map(f).collect::<Vec<_>>())
    };

    MonteCarloReport {
        scenario_name: scenario.name.to_string(),
        label: scenario.label.to_string(),
        category: scenario.category.to_string(),
        n_runs: n,
        pass_rate,
        delivery_rate: collect(|r| r.delivery_rate),
        avg_wait_ticks: collect(|r| r.avg_wait_ticks),
        avg_trip_ticks: collect(|r| r.avg_trip_ticks),
        peak_waiting: collect(|r| r.peak_waiting as f64),
        peak_load_factor: collect(|r| r.peak_load_factor),
        elapsed_ms: collect(|r| r.elapsed_ms as f64),
        ticks_per_sec: collect(|r| r.ticks_per_sec),
        individual_runs: results,
    }
}
