// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Rider Ledger

//! Rider conservation audit.
//!
//! Every rider lives in exactly one place from arrival until it steps out:
//!
//! ```text
//! spawned = waiting + riding + delivered
//! ```
//!
//! The building audits this after every tick. The first imbalance latches the
//! ledger so a single violation stays visible for the rest of the run.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("rider imbalance: spawned {spawned}, accounted {accounted} (waiting {waiting}, riding {riding}, delivered {delivered})")]
    Imbalance { spawned: u64, accounted: u64, waiting: u64, riding: u64, delivered: u64 },

    #[error("elevator {elevator} carries {riders} riders over capacity {capacity}")]
    OverCapacity { elevator: usize, riders: usize, capacity: usize },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiderLedger {
    spawned: u64,
    boarded: u64,
    delivered: u64,
    total_wait_ticks: u64,
    total_trip_ticks: u64,
    violated: bool,
}

impl RiderLedger {
    pub fn record_spawn(&mut self) {
        self.spawned += 1;
    }

    pub fn record_board(&mut self, waited: u64) {
        self.boarded += 1;
        self.total_wait_ticks += waited;
    }

    pub fn record_delivery(&mut self, trip: u64) {
        self.delivered += 1;
        self.total_trip_ticks += trip;
    }

    pub fn spawned(&self) -> u64 { self.spawned }
    pub fn boarded(&self) -> u64 { self.boarded }
    pub fn delivered(&self) -> u64 { self.delivered }
    pub fn is_violated(&self) -> bool { self.violated }

    pub fn avg_wait_ticks(&self) -> f64 {
        if self.boarded == 0 { 0.0 } else { self.total_wait_ticks as f64 / self.boarded as f64 }
    }

    pub fn avg_trip_ticks(&self) -> f64 {
        if self.delivered == 0 { 0.0 } else { self.total_trip_ticks as f64 / self.delivered as f64 }
    }

    /// Check conservation against the riders currently observed in floor
    /// queues and cars. `cars` yields (elevator, riders, capacity).
    pub fn audit<I>(&mut self, waiting: u64, cars: I) -> Result<(), LedgerError>
    where
        I: IntoIterator<Item = (usize, usize, usize)>,
    {
        let mut riding = 0u64;
        for (elevator, riders, capacity) in cars {
            if riders > capacity {
                self.violated = true;
                return Err(LedgerError::OverCapacity { elevator, riders, capacity });
            }
            riding += riders as u64;
        }

        let accounted = waiting + riding + self.delivered;
        if accounted != self.spawned {
            self.violated = true;
            return Err(LedgerError::Imbalance {
                spawned: self.spawned,
                accounted,
                waiting,
                riding,
                delivered: self.delivered,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_ledger_passes() {
        let mut ledger = RiderLedger::default();
        for _ in 0..5 {
            ledger.record_spawn();
        }
        ledger.record_board(4);
        ledger.record_board(2);
        ledger.record_delivery(10);
        assert!(ledger.audit(3, [(0, 1, 12)]).is_ok());
        assert!(!ledger.is_violated());
        assert_eq!(ledger.avg_wait_ticks(), 3.0);
        assert_eq!(ledger.avg_trip_ticks(), 10.0);
    }

    #[test]
    fn lost_rider_latches_violation() {
        let mut ledger = RiderLedger::default();
        ledger.record_spawn();
        ledger.record_spawn();
        let err = ledger.audit(1, [(0, 0, 12)]).expect_err("test: one rider missing");
        assert!(
            matches!(err, LedgerError::Imbalance { spawned: 2, accounted: 1, .. }),
            "expected Imbalance, got: {err}"
        );
        assert!(ledger.is_violated());

        // Stays latched even once the books balance again.
        ledger.record_spawn();
        assert!(ledger.audit(3, [(0, 0, 12)]).is_ok());
        assert!(ledger.is_violated());
    }

    #[test]
    fn over_capacity_is_reported() {
        let mut ledger = RiderLedger::default();
        let err = ledger.audit(0, [(0, 0, 2), (1, 3, 2)]).expect_err("test: car 1 overfull");
        assert_eq!(err, LedgerError::OverCapacity { elevator: 1, riders: 3, capacity: 2 });
    }

    #[test]
    fn empty_ledger_averages_are_zero() {
        let ledger = RiderLedger::default();
        assert_eq!(ledger.avg_wait_ticks(), 0.0);
        assert_eq!(ledger.avg_trip_ticks(), 0.0);
    }
}
