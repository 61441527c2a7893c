// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Type Definitions

use serde::{Deserialize, Serialize};

use crate::rider::RiderRequest;

// ─── Call Direction ──────────────────────────────────────────────────────────

/// Direction a rider wants to travel, and the two lights on a floor call panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CallDirection {
    Up = 0,
    Down = 1,
}

// ─── Elevator Direction ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Idle = 0,
    Up = 1,
    Down = 2,
}

impl Direction {
    /// Signed unit step: +1 up, -1 down, 0 idle.
    pub fn sign(&self) -> i32 {
        match self {
            Self::Idle => 0,
            Self::Up => 1,
            Self::Down => -1,
        }
    }

    /// Hall call this direction answers; None while idle.
    pub fn call(&self) -> Option<CallDirection> {
        match self {
            Self::Idle => None,
            Self::Up => Some(CallDirection::Up),
            Self::Down => Some(CallDirection::Down),
        }
    }
}

impl From<CallDirection> for Direction {
    fn from(call: CallDirection) -> Self {
        match call {
            CallDirection::Up => Direction::Up,
            CallDirection::Down => Direction::Down,
        }
    }
}

// ─── Door State ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DoorState {
    #[default]
    Closed,
    Open { floor: usize },
}

impl DoorState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn floor(&self) -> Option<usize> {
        match self {
            Self::Open { floor } => Some(*floor),
            Self::Closed => None,
        }
    }
}

// ─── Elevator Action (one per elevator per tick) ─────────────────────────────

/// The step of the dispatch chain that fired for an elevator this tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ElevatorAction {
    OpenToDisembark = 0,
    Disembark = 1,
    Board = 2,
    Wait = 3,
    DoneWaiting = 4,
    ContinueMoving = 5,
    IdleDispatch = 6,
    IdleReposition = 7,
    Idle = 8,
}

impl ElevatorAction {
    pub const COUNT: usize = 9;

    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenToDisembark => "open-to-disembark",
            Self::Disembark => "disembark",
            Self::Board => "board",
            Self::Wait => "wait",
            Self::DoneWaiting => "done-waiting",
            Self::ContinueMoving => "continue-moving",
            Self::IdleDispatch => "idle-dispatch",
            Self::IdleReposition => "idle-reposition",
            Self::Idle => "idle",
        }
    }
}

// ─── ElevatorSnapshot ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElevatorSnapshot {
    pub id: usize,
    pub position: i32,
    pub direction: Direction,
    pub door: DoorState,
    pub door_timer: u32,
    pub capacity: usize,
    pub speed: i32,
    pub riders: Vec<RiderRequest>,
    /// Floor indices lit on the cab panel, ascending.
    pub destinations: Vec<usize>,
}

// ─── FloorSnapshot ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub index: usize,
    pub elevation: i32,
    pub label: String,
    pub name: String,
    pub up_queue: Vec<RiderRequest>,
    pub down_queue: Vec<RiderRequest>,
    pub up_lit: bool,
    pub down_lit: bool,
}

// ─── SimStats ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimStats {
    pub current_tick: u64,
    pub spawned: u64,
    pub boarded: u64,
    pub delivered: u64,
    pub waiting: u64,
    pub riding: u64,
    /// Mean ticks between arrival and boarding.
    pub avg_wait_ticks: f64,
    /// Mean ticks between arrival and disembarking.
    pub avg_trip_ticks: f64,
    pub ledger_balanced: bool,
}

// ─── TickResult ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    pub tick: u64,
    pub arrivals: u32,
    /// Indexed by elevator.
    pub actions: Vec<ElevatorAction>,
    pub elevators: Vec<ElevatorSnapshot>,
    pub floors: Vec<FloorSnapshot>,
    pub stats: SimStats,
}
