// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Building Orchestrator

use std::cmp::Ordering;

use log::{debug, error, trace, warn};
use wasm_bindgen::prelude::*;

use crate::arrivals::ArrivalGenerator;
use crate::config::{BuildingConfig, ConfigError};
use crate::elevator::Elevator;
use crate::floor::Floor;
use crate::ledger::RiderLedger;
use crate::rider::{RiderError, RiderRequest};
use crate::types::*;

// ─── Building struct ─────────────────────────────────────────────────────────

/// Owns every floor and car for the run. Neither collection is resized after
/// construction; both are indexed in configuration order.
#[wasm_bindgen]
pub struct Building {
    pub(crate) config: BuildingConfig,
    pub(crate) seed: u64,
    pub(crate) floors: Vec<Floor>,
    pub(crate) elevators: Vec<Elevator>,
    pub(crate) arrivals: ArrivalGenerator,
    pub(crate) ledger: RiderLedger,
    pub(crate) current_tick: u64,
    pub(crate) next_rider_id: u64,
}

/// Where `floor` sits relative to `elevator`: `Equal` when the car is level
/// with it, `Greater` when the floor is above the car.
pub fn compare_elevation(floor: &Floor, elevator: &Elevator) -> Ordering {
    floor.elevation().cmp(&elevator.position())
}

// ─── Construction and accessors ──────────────────────────────────────────────

impl Building {
    pub fn from_config(config: BuildingConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Assumes `config` already validated.
    pub(crate) fn build(config: BuildingConfig, seed: u64) -> Self {
        let shaft = config.shaft();
        let floors = config.floors.iter()
            .map(|f| Floor::new(f.elevation, f.label.clone(), f.name.clone()))
            .collect();
        let elevators = config.elevators.iter().enumerate()
            .map(|(id, car)| {
                let start = config.floors[car.start_floor].elevation;
                Elevator::new(id, car.capacity, car.speed, start, shaft, config.door_dwell_ticks)
            })
            .collect();

        Self {
            floors,
            elevators,
            arrivals: ArrivalGenerator::from_seed(seed),
            ledger: RiderLedger::default(),
            current_tick: 0,
            next_rider_id: 0,
            config,
            seed,
        }
    }

    pub fn config(&self) -> &BuildingConfig { &self.config }
    pub fn seed(&self) -> u64 { self.seed }
    pub fn current_tick(&self) -> u64 { self.current_tick }
    pub fn floors(&self) -> &[Floor] { &self.floors }
    pub fn elevators(&self) -> &[Elevator] { &self.elevators }
    pub fn floor(&self, index: usize) -> Option<&Floor> { self.floors.get(index) }
    pub fn elevator(&self, index: usize) -> Option<&Elevator> { self.elevators.get(index) }
    pub fn ledger(&self) -> &RiderLedger { &self.ledger }

    pub fn elevator_snapshots(&self) -> Vec<ElevatorSnapshot> {
        self.elevators.iter().map(Elevator::snapshot).collect()
    }

    pub fn floor_snapshots(&self) -> Vec<FloorSnapshot> {
        self.floors.iter().enumerate().map(|(i, f)| f.snapshot(i)).collect()
    }

    pub fn waiting_count(&self) -> u64 {
        self.floors.iter().map(|f| f.waiting_count() as u64).sum()
    }

    pub fn riding_count(&self) -> u64 {
        self.elevators.iter().map(|e| e.rider_count() as u64).sum()
    }

    pub fn stats(&self) -> SimStats {
        SimStats {
            current_tick: self.current_tick,
            spawned: self.ledger.spawned(),
            boarded: self.ledger.boarded(),
            delivered: self.ledger.delivered(),
            waiting: self.waiting_count(),
            riding: self.riding_count(),
            avg_wait_ticks: self.ledger.avg_wait_ticks(),
            avg_trip_ticks: self.ledger.avg_trip_ticks(),
            ledger_balanced: !self.ledger.is_violated(),
        }
    }
}

// ─── Tick ────────────────────────────────────────────────────────────────────

impl Building {
    /// Advance one tick: inject arrivals, then give each car, in index order,
    /// exactly one action.
    pub fn tick(&mut self, arrival_rate: f64) -> TickResult {
        let (arrivals, actions) = self.step(arrival_rate);
        TickResult {
            tick: self.current_tick,
            arrivals,
            actions,
            elevators: self.elevator_snapshots(),
            floors: self.floor_snapshots(),
            stats: self.stats(),
        }
    }

    /// Tick without building snapshots.
    pub(crate) fn step(&mut self, arrival_rate: f64) -> (u32, Vec<ElevatorAction>) {
        self.current_tick += 1;
        let arrivals = self.place_new_riders(arrival_rate);
        let actions: Vec<ElevatorAction> = (0..self.elevators.len())
            .map(|e| self.run_chain(e))
            .collect();
        self.audit_ledger();
        (arrivals, actions)
    }

    /// Draw this tick's Poisson arrivals and queue them on their origin floors.
    pub fn place_new_riders(&mut self, arrival_rate: f64) -> u32 {
        let pairs = self.arrivals.generate_tick(arrival_rate, self.floors.len());
        let mut placed = 0;
        for (origin, destination) in pairs {
            match self.place_rider(origin, destination) {
                Ok(_) => placed += 1,
                Err(e) => warn!("tick {}: dropped generated rider: {}", self.current_tick, e),
            }
        }
        if placed > 0 {
            debug!("tick {}: {} new riders", self.current_tick, placed);
        }
        placed
    }

    /// Queue one rider at `origin` bound for `destination` and light its call.
    /// Returns the new rider's id.
    pub fn place_rider(&mut self, origin: usize, destination: usize) -> Result<u64, RiderError> {
        let floors = self.floors.len();
        for index in [origin, destination] {
            if index >= floors {
                return Err(RiderError::UnknownFloor { index, floors });
            }
        }
        let rider = RiderRequest::new(self.next_rider_id, origin, destination, self.current_tick)?;
        let id = rider.id();
        self.next_rider_id += 1;
        self.ledger.record_spawn();
        self.floors[origin].add_rider(rider);
        Ok(id)
    }

    fn audit_ledger(&mut self) {
        let waiting = self.waiting_count();
        let cars = self.elevators.iter().map(|e| (e.id(), e.rider_count(), e.capacity()));
        if let Err(e) = self.ledger.audit(waiting, cars) {
            error!("tick {}: {}", self.current_tick, e);
        }
    }
}

// ─── Dispatch chain ──────────────────────────────────────────────────────────

impl Building {
    /// Run the priority chain for car `e`; the first step that applies fires
    /// and the rest are skipped.
    pub(crate) fn run_chain(&mut self, e: usize) -> ElevatorAction {
        let action = if self.open_door_to_disembark(e) {
            ElevatorAction::OpenToDisembark
        } else if self.disembark_rider(e) {
            ElevatorAction::Disembark
        } else if self.board_rider(e) {
            ElevatorAction::Board
        } else if self.wait_for_more_riders(e) {
            ElevatorAction::Wait
        } else if self.done_waiting_move(e) {
            ElevatorAction::DoneWaiting
        } else if self.continue_moving(e) {
            ElevatorAction::ContinueMoving
        } else if self.dispatch_idle_elevator(e) {
            ElevatorAction::IdleDispatch
        } else if self.send_idle_elevator_to_call(e) {
            ElevatorAction::IdleReposition
        } else {
            self.elevators[e].go_idle();
            ElevatorAction::Idle
        };
        trace!(
            "tick {}: elevator {} {} at {}",
            self.current_tick, e, action.label(), self.elevators[e].position()
        );
        action
    }

    /// Index of the floor the car is level with, if any. Elevations are
    /// strictly ascending so at most one floor matches.
    fn floor_at(&self, e: usize) -> Option<usize> {
        let elevator = &self.elevators[e];
        self.floors.iter()
            .position(|f| compare_elevation(f, elevator) == Ordering::Equal)
    }

    /// 1. Door closed, level with a floor whose cab button is lit: open up.
    fn open_door_to_disembark(&mut self, e: usize) -> bool {
        if self.elevators[e].is_open() {
            return false;
        }
        match self.floor_at(e) {
            Some(f) if self.elevators[e].panel().is_lit(f) => {
                self.elevators[e].open_door_to(f)
            }
            _ => false,
        }
    }

    /// 2. Let one rider off at the open-door floor.
    fn disembark_rider(&mut self, e: usize) -> bool {
        let tick = self.current_tick;
        let elevator = &mut self.elevators[e];
        if !elevator.is_open() || !elevator.has_rider_for_floor() {
            return false;
        }
        match elevator.remove_rider() {
            Some(rider) => {
                self.ledger.record_delivery(tick.saturating_sub(rider.arrival_tick()));
                debug!(
                    "tick {}: elevator {} delivered rider {} to floor {}",
                    tick, e, rider.id(), rider.destination()
                );
                true
            }
            None => false,
        }
    }

    /// 3. Take one rider queued in the car's travel direction.
    fn board_rider(&mut self, e: usize) -> bool {
        let tick = self.current_tick;
        let elevator = &mut self.elevators[e];
        if !elevator.is_open() || elevator.is_full() {
            return false;
        }
        let (Some(call), Some(f)) = (elevator.direction().call(), elevator.floor_index()) else {
            return false;
        };
        let Some(floor) = self.floors.get_mut(f) else {
            return false;
        };
        let Some(rider) = floor.remove_rider(call) else {
            return false;
        };
        let waited = tick.saturating_sub(rider.arrival_tick());
        let id = rider.id();
        match elevator.board(rider) {
            Ok(()) => {
                self.ledger.record_board(waited);
                debug!("tick {}: elevator {} boarded rider {} at floor {}", tick, e, id, f);
                true
            }
            Err(rider) => {
                floor.requeue_front(rider);
                false
            }
        }
    }

    /// 4. Hold the door while the dwell timer runs.
    fn wait_for_more_riders(&mut self, e: usize) -> bool {
        let elevator = &mut self.elevators[e];
        if elevator.is_open() && !elevator.is_idle() && !elevator.timed_out() {
            elevator.tick_timer();
            return true;
        }
        false
    }

    /// 5. Dwell over: close up and try to depart.
    fn done_waiting_move(&mut self, e: usize) -> bool {
        let elevator = &mut self.elevators[e];
        if !elevator.is_open() || elevator.is_idle() || !elevator.timed_out() {
            return false;
        }
        elevator.close_door();
        elevator.move_once();
        true
    }

    /// 6. Travelling with the door shut and something still ahead: keep going.
    fn continue_moving(&mut self, e: usize) -> bool {
        let elevator = &self.elevators[e];
        if elevator.is_open() || elevator.is_idle() || !self.has_demand_ahead(e) {
            return false;
        }
        self.elevators[e].move_once()
    }

    /// A lit cab button or hall call strictly beyond the car in its direction.
    fn has_demand_ahead(&self, e: usize) -> bool {
        let elevator = &self.elevators[e];
        let ahead = match elevator.direction() {
            Direction::Up => Ordering::Greater,
            Direction::Down => Ordering::Less,
            Direction::Idle => return false,
        };
        self.floors.iter().enumerate().any(|(i, floor)| {
            compare_elevation(floor, elevator) == ahead
                && (elevator.panel().is_lit(i) || floor.panel().any_lit())
        })
    }

    /// 7. Idle and level with a calling floor: open there, up preferred.
    fn dispatch_idle_elevator(&mut self, e: usize) -> bool {
        if !self.elevators[e].is_idle() {
            return false;
        }
        let Some(f) = self.floor_at(e) else {
            return false;
        };
        let Some(call) = self.floors[f].panel().first_lit() else {
            return false;
        };
        let elevator = &mut self.elevators[e];
        elevator.open_door_to(f);
        elevator.set_direction(call.into());
        debug!("tick {}: elevator {} answering {:?} call at floor {}", self.current_tick, e, call, f);
        true
    }

    /// 8. Idle with a call elsewhere: head for the first calling floor in
    /// index order and take one step.
    fn send_idle_elevator_to_call(&mut self, e: usize) -> bool {
        let elevator = &self.elevators[e];
        if !elevator.is_idle() {
            return false;
        }
        let target = self.floors.iter()
            .map(|f| (f.panel().any_lit(), compare_elevation(f, elevator)))
            .find(|&(lit, ordering)| lit && ordering != Ordering::Equal);
        let Some((_, ordering)) = target else {
            return false;
        };
        let direction = if ordering == Ordering::Greater { Direction::Up } else { Direction::Down };
        let elevator = &mut self.elevators[e];
        elevator.set_direction(direction);
        elevator.move_once();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(elevators: usize, capacity: usize) -> Building {
        let config = BuildingConfig::default().with_elevators(elevators, capacity, 5);
        Building::from_config(config, 1).expect("test: valid config")
    }

    /// Step car 0 to `floor` with the door shut, as if it had just arrived.
    fn park(b: &mut Building, e: usize, floor: usize) {
        let elevation = b.floors[floor].elevation();
        let car = &mut b.elevators[e];
        car.go_idle();
        while car.position() != elevation {
            car.set_direction(if car.position() < elevation { Direction::Up } else { Direction::Down });
            assert!(car.move_once(), "test: parking move");
        }
        car.go_idle();
    }

    #[test]
    fn idle_car_opens_to_lit_call_at_its_floor() {
        let mut b = building(1, 12);
        b.place_rider(0, 2).expect("test: place");

        let result = b.tick(0.0);
        assert_eq!(result.actions, vec![ElevatorAction::IdleDispatch]);
        let car = &b.elevators[0];
        assert_eq!(car.door(), DoorState::Open { floor: 0 });
        assert_eq!(car.direction(), Direction::Up);
    }

    #[test]
    fn unlit_rider_leaves_car_idle_until_call_pressed() {
        let mut b = building(1, 12);
        b.place_rider(0, 2).expect("test: place");
        b.floors[0].panel_mut().clear(CallDirection::Up);

        let result = b.tick(0.0);
        assert_eq!(result.actions, vec![ElevatorAction::Idle]);
        assert!(b.elevators[0].is_idle());
        assert!(!b.elevators[0].is_open());

        b.floors[0].panel_mut().press(CallDirection::Up);
        let result = b.tick(0.0);
        assert_eq!(result.actions, vec![ElevatorAction::IdleDispatch]);
        assert_eq!(b.elevators[0].door(), DoorState::Open { floor: 0 });
        assert_eq!(b.elevators[0].direction(), Direction::Up);
    }

    #[test]
    fn down_call_sets_direction_down() {
        let mut b = building(1, 12);
        park(&mut b, 0, 3);
        b.place_rider(3, 1).expect("test: place");
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::IdleDispatch]);
        assert_eq!(b.elevators[0].direction(), Direction::Down);
    }

    #[test]
    fn disembark_takes_priority_over_board() {
        let mut b = building(1, 12);
        // Rider 0 rides 0 -> 2; rider 1 waits at 2 heading up.
        b.place_rider(0, 2).expect("test: place");
        b.tick(0.0); // idle-dispatch at floor 0
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Board]);
        b.place_rider(2, 4).expect("test: place");
        park(&mut b, 0, 2);
        b.elevators[0].set_direction(Direction::Up);

        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::OpenToDisembark]);
        let before = b.elevators[0].rider_count();
        let result = b.tick(0.0);
        assert_eq!(result.actions, vec![ElevatorAction::Disembark]);
        assert_eq!(b.elevators[0].rider_count(), before - 1);
        assert_eq!(b.floors[2].queue(CallDirection::Up).len(), 1, "board must not fire");

        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Board]);
        assert_eq!(b.floors[2].waiting_count(), 0);
    }

    #[test]
    fn wait_then_done_waiting_moves_off() {
        let mut b = building(1, 12);
        b.place_rider(0, 1).expect("test: place");
        b.tick(0.0); // dispatch
        b.tick(0.0); // board
        while b.elevators[0].door_timer() > 1 {
            b.elevators[0].tick_timer();
        }

        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Wait]);
        assert_eq!(b.elevators[0].door_timer(), 0);

        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::DoneWaiting]);
        assert!(!b.elevators[0].is_open());
        assert_eq!(b.elevators[0].position(), 5);
    }

    #[test]
    fn idle_checks_do_not_touch_busy_car() {
        let mut b = building(1, 12);
        b.place_rider(0, 3).expect("test: place");
        b.place_rider(4, 0).expect("test: place");
        b.tick(0.0); // car 0 now open and heading up
        assert!(!b.elevators[0].is_idle());

        let cars = b.elevator_snapshots();
        let floors = b.floor_snapshots();
        assert!(!b.dispatch_idle_elevator(0));
        assert!(!b.send_idle_elevator_to_call(0));
        assert_eq!(b.elevator_snapshots(), cars);
        assert_eq!(b.floor_snapshots(), floors);
    }

    #[test]
    fn idle_car_heads_for_first_calling_floor() {
        let mut b = building(1, 12);
        park(&mut b, 0, 2);
        b.place_rider(4, 0).expect("test: place");
        b.place_rider(0, 1).expect("test: place");

        // Floor 0 comes first in index order, so the car goes down.
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::IdleReposition]);
        assert_eq!(b.elevators[0].direction(), Direction::Down);
        assert_eq!(b.elevators[0].position(), 195);

        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::ContinueMoving]);
        assert_eq!(b.elevators[0].position(), 190);
    }

    #[test]
    fn car_with_nothing_ahead_falls_idle() {
        let mut b = building(1, 12);
        b.elevators[0].set_direction(Direction::Up);
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Idle]);
        assert!(b.elevators[0].is_idle());
    }

    #[test]
    fn first_elevator_wins_shared_call() {
        let mut b = building(2, 1);
        b.place_rider(0, 3).expect("test: place");

        let result = b.tick(0.0);
        assert_eq!(result.actions, vec![ElevatorAction::IdleDispatch, ElevatorAction::IdleDispatch]);
        let result = b.tick(0.0);
        assert_eq!(result.actions[0], ElevatorAction::Board);
        assert_ne!(result.actions[1], ElevatorAction::Board);
        assert_eq!(b.elevators[0].rider_count(), 1);
        assert_eq!(b.elevators[1].rider_count(), 0);
    }

    #[test]
    fn full_car_leaves_riders_queued() {
        let mut b = building(1, 1);
        b.place_rider(0, 2).expect("test: place");
        b.place_rider(0, 3).expect("test: place");
        b.tick(0.0);
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Board]);
        assert_eq!(b.tick(0.0).actions, vec![ElevatorAction::Wait]);
        assert_eq!(b.floors[0].queue(CallDirection::Up).len(), 1);
        assert!(b.floors[0].panel().is_lit(CallDirection::Up));
    }

    #[test]
    fn rider_travels_end_to_end() {
        let mut b = building(1, 12);
        b.place_rider(0, 1).expect("test: place");
        let mut delivered_at = None;
        for _ in 0..100 {
            let result = b.tick(0.0);
            if result.actions[0] == ElevatorAction::Disembark {
                delivered_at = Some(result.tick);
                break;
            }
        }
        // dispatch, board, 3 waits, 20 steps to elevation 100, open, disembark
        assert_eq!(delivered_at, Some(27));
        assert_eq!(b.stats().delivered, 1);
        assert_eq!(b.stats().avg_trip_ticks, 27.0);
        assert!(b.stats().ledger_balanced);
    }

    #[test]
    fn place_rider_rejects_bad_floors() {
        let mut b = building(1, 12);
        assert_eq!(b.place_rider(2, 2), Err(RiderError::SameFloor(2)));
        assert_eq!(b.place_rider(0, 5), Err(RiderError::UnknownFloor { index: 5, floors: 5 }));
        assert_eq!(b.stats().spawned, 0);
    }
}
