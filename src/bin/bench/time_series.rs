// Per-Tick JSONL Time Series Recorder
// Outputs one JSON line per tick for independent analysis

use serde::Serialize;
use lift_engine::{DoorState, TickResult};
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub arrival_rate: f64,
    pub arrivals: u32,
    pub waiting: u64,
    pub riding: u64,
    pub delivered_cumulative: u64,
    pub avg_wait_ticks: f64,
    pub positions: Vec<i32>,
    pub doors_open: usize,
    pub actions: Vec<&'static str>,
    pub ledger_balanced: bool,
}

impl TickSnapshot {
    pub fn from_result(result: &TickResult, arrival_rate: f64) -> Self {
        Self {
            tick: result.tick,
            arrival_rate,
            arrivals: result.arrivals,
            waiting: result.stats.waiting,
            riding: result.stats.riding,
            delivered_cumulative: result.stats.delivered,
            avg_wait_ticks: result.stats.avg_wait_ticks,
            positions: result.elevators.iter().map(|e| e.position).collect(),
            doors_open: result.elevators.iter()
                .filter(|e| matches!(e.door, DoorState::Open { .. }))
                .count(),
            actions: result.actions.iter().map(|a| a.label()).collect(),
            ledger_balanced: result.stats.ledger_balanced,
        }
    }
}

/// Time series recorder that accumulates snapshots and writes JSONL
pub struct TimeSeriesRecorder {
    snapshots: Vec<TickSnapshot>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { snapshots: Vec::new() }
    }

    pub fn record(&mut self, result: &TickResult, arrival_rate: f64) {
        self.snapshots.push(TickSnapshot::from_result(result, arrival_rate));
    }

    /// Write all snapshots to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for snapshot in &self.snapshots {
            let line = serde_json::to_string(snapshot)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
