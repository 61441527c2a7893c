// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Elevator State Machine

use std::collections::BTreeSet;

use crate::rider::RiderRequest;
use crate::types::{Direction, DoorState, ElevatorSnapshot};

/// Default number of ticks a door lingers open for more boarders.
pub const DEFAULT_DWELL_TICKS: u32 = 3;

// ─── DestinationPanel ────────────────────────────────────────────────────────

/// Cab buttons, keyed by floor index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationPanel {
    lit: BTreeSet<usize>,
}

impl DestinationPanel {
    pub fn press(&mut self, floor: usize) {
        self.lit.insert(floor);
    }

    pub fn clear(&mut self, floor: usize) {
        self.lit.remove(&floor);
    }

    pub fn is_lit(&self, floor: usize) -> bool {
        self.lit.contains(&floor)
    }

    pub fn lit_floors(&self) -> impl Iterator<Item = usize> + '_ {
        self.lit.iter().copied()
    }
}

// ─── Elevator ────────────────────────────────────────────────────────────────

/// One car. Position is in elevation units; a shaft is bounded by the lowest
/// and highest floor elevations of the building.
#[derive(Debug, Clone)]
pub struct Elevator {
    id: usize,
    position: i32,
    direction: Direction,
    door: DoorState,
    door_timer: u32,
    dwell_ticks: u32,
    capacity: usize,
    speed: i32,
    shaft_bottom: i32,
    shaft_top: i32,
    riders: Vec<RiderRequest>,
    panel: DestinationPanel,
}

impl Elevator {
    pub fn new(
        id: usize,
        capacity: usize,
        speed: i32,
        position: i32,
        shaft: (i32, i32),
        dwell_ticks: u32,
    ) -> Self {
        Self {
            id,
            position,
            direction: Direction::Idle,
            door: DoorState::Closed,
            door_timer: 0,
            dwell_ticks,
            capacity,
            speed,
            shaft_bottom: shaft.0,
            shaft_top: shaft.1,
            riders: Vec::with_capacity(capacity),
            panel: DestinationPanel::default(),
        }
    }

    pub fn id(&self) -> usize { self.id }
    pub fn position(&self) -> i32 { self.position }
    pub fn direction(&self) -> Direction { self.direction }
    pub fn door(&self) -> DoorState { self.door }
    pub fn door_timer(&self) -> u32 { self.door_timer }
    pub fn capacity(&self) -> usize { self.capacity }
    pub fn speed(&self) -> i32 { self.speed }
    pub fn riders(&self) -> &[RiderRequest] { &self.riders }
    pub fn rider_count(&self) -> usize { self.riders.len() }
    pub fn panel(&self) -> &DestinationPanel { &self.panel }

    pub fn is_open(&self) -> bool { self.door.is_open() }
    pub fn floor_index(&self) -> Option<usize> { self.door.floor() }
    pub fn is_full(&self) -> bool { self.riders.len() >= self.capacity }
    pub fn is_idle(&self) -> bool { self.direction == Direction::Idle }
    pub fn going_up(&self) -> bool { self.direction == Direction::Up }
    pub fn going_down(&self) -> bool { self.direction == Direction::Down }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    // Door timer

    pub fn reset_timer(&mut self) { self.door_timer = self.dwell_ticks; }
    pub fn tick_timer(&mut self) { self.door_timer = self.door_timer.saturating_sub(1); }
    pub fn timed_out(&self) -> bool { self.door_timer == 0 }

    /// Open the door onto `floor`. The caller has already matched the floor's
    /// elevation against `position`. Returns false if the door was open.
    pub fn open_door_to(&mut self, floor: usize) -> bool {
        if self.is_open() {
            return false;
        }
        self.door = DoorState::Open { floor };
        self.panel.clear(floor);
        self.reset_timer();
        true
    }

    pub fn close_door(&mut self) -> bool {
        let was_open = self.is_open();
        self.door = DoorState::Closed;
        was_open
    }

    /// Take a rider aboard and light its destination. A closed door or full
    /// car hands the rider straight back.
    pub fn board(&mut self, rider: RiderRequest) -> Result<(), RiderRequest> {
        if !self.is_open() || self.is_full() {
            return Err(rider);
        }
        self.panel.press(rider.destination());
        self.riders.push(rider);
        Ok(())
    }

    pub fn has_rider_for_floor(&self) -> bool {
        match self.floor_index() {
            Some(floor) => self.riders.iter().any(|r| r.destination() == floor),
            None => false,
        }
    }

    /// Let off the earliest-boarded rider bound for the open-door floor.
    pub fn remove_rider(&mut self) -> Option<RiderRequest> {
        let floor = self.floor_index()?;
        let idx = self.riders.iter().position(|r| r.destination() == floor)?;
        Some(self.riders.remove(idx))
    }

    /// Advance one step of `speed` in the current direction. Refuses with the
    /// door open, while idle, or past either end of the shaft.
    pub fn move_once(&mut self) -> bool {
        if self.is_open() || self.is_idle() {
            return false;
        }
        let next = self.direction.sign()
            .checked_mul(self.speed)
            .and_then(|step| self.position.checked_add(step));
        match next {
            Some(next) if next >= self.shaft_bottom && next <= self.shaft_top => {
                self.position = next;
                true
            }
            _ => false,
        }
    }

    pub fn go_idle(&mut self) {
        self.direction = Direction::Idle;
        self.close_door();
    }

    pub fn snapshot(&self) -> ElevatorSnapshot {
        ElevatorSnapshot {
            id: self.id,
            position: self.position,
            direction: self.direction,
            door: self.door,
            door_timer: self.door_timer,
            capacity: self.capacity,
            speed: self.speed,
            riders: self.riders.clone(),
            destinations: self.panel.lit_floors().collect(),
        }
    }
}
