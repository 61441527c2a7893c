// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Rider Requests

use serde::{Deserialize, Serialize};

use crate::types::CallDirection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiderError {
    #[error("origin and destination are both floor {0}")]
    SameFloor(usize),

    #[error("floor index {index} out of range ({floors} floors)")]
    UnknownFloor { index: usize, floors: usize },
}

/// A single rider's trip, immutable from arrival until disembarking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiderRequest {
    id: u64,
    origin: usize,
    destination: usize,
    arrival_tick: u64,
}

impl RiderRequest {
    pub fn new(
        id: u64,
        origin: usize,
        destination: usize,
        arrival_tick: u64,
    ) -> Result<Self, RiderError> {
        if origin == destination {
            return Err(RiderError::SameFloor(origin));
        }
        Ok(Self { id, origin, destination, arrival_tick })
    }

    pub fn id(&self) -> u64 { self.id }
    pub fn origin(&self) -> usize { self.origin }
    pub fn destination(&self) -> usize { self.destination }
    pub fn arrival_tick(&self) -> u64 { self.arrival_tick }

    pub fn direction(&self) -> CallDirection {
        if self.destination > self.origin {
            CallDirection::Up
        } else {
            CallDirection::Down
        }
    }
}
