// Per-Tick Metric Trackers - chain step mix, queue depth, car load

use lift_engine::*;

// ─── Action Histogram ───────────────────────────────────────────────────────

/// Counts which dispatch step fired, across every elevator and tick.
pub struct ActionHistogram {
    counts: [u64; ElevatorAction::COUNT],
    total: u64,
}

impl ActionHistogram {
    pub fn new() -> Self {
        Self { counts: [0; ElevatorAction::COUNT], total: 0 }
    }

    pub fn record_tick(&mut self, actions: &[ElevatorAction]) {
        for &action in actions {
            self.counts[action as usize] += 1;
            self.total += 1;
        }
    }

    /// Fraction of elevator-ticks per action, in discriminant order.
    pub fn shares(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; ElevatorAction::COUNT];
        }
        self.counts.iter().map(|&c| c as f64 / self.total as f64).collect()
    }
}

// ─── Load Tracker ───────────────────────────────────────────────────────────

/// Tracks the deepest floor queues and fullest car seen, and whether any car
/// ever exceeded its capacity.
pub struct LoadTracker {
    pub peak_waiting: u64,
    pub peak_load_factor: f64,
    pub capacity_respected: bool,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self { peak_waiting: 0, peak_load_factor: 0.0, capacity_respected: true }
    }

    pub fn record_tick(&mut self, result: &TickResult) {
        self.peak_waiting = self.peak_waiting.max(result.stats.waiting);
        for car in &result.elevators {
            if car.riders.len() > car.capacity {
                self.capacity_respected = false;
            }
            let load = car.riders.len() as f64 / car.capacity.max(1) as f64;
            self.peak_load_factor = self.peak_load_factor.max(load);
        }
    }
}
