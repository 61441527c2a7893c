// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Floors and Call Panels

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::rider::RiderRequest;
use crate::types::{CallDirection, FloorSnapshot};

// ─── CallPanel ───────────────────────────────────────────────────────────────

/// Hall call lights on one floor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPanel {
    up: bool,
    down: bool,
}

impl CallPanel {
    pub fn press(&mut self, direction: CallDirection) {
        match direction {
            CallDirection::Up => self.up = true,
            CallDirection::Down => self.down = true,
        }
    }

    pub fn clear(&mut self, direction: CallDirection) {
        match direction {
            CallDirection::Up => self.up = false,
            CallDirection::Down => self.down = false,
        }
    }

    pub fn is_lit(&self, direction: CallDirection) -> bool {
        match direction {
            CallDirection::Up => self.up,
            CallDirection::Down => self.down,
        }
    }

    pub fn any_lit(&self) -> bool {
        self.up || self.down
    }

    /// Up wins when both are lit.
    pub fn first_lit(&self) -> Option<CallDirection> {
        if self.up {
            Some(CallDirection::Up)
        } else if self.down {
            Some(CallDirection::Down)
        } else {
            None
        }
    }
}

// ─── Floor ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Floor {
    elevation: i32,
    label: String,
    name: String,
    up_queue: VecDeque<RiderRequest>,
    down_queue: VecDeque<RiderRequest>,
    panel: CallPanel,
}

impl Floor {
    pub fn new(elevation: i32, label: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            elevation,
            label: label.into(),
            name: name.into(),
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
            panel: CallPanel::default(),
        }
    }

    pub fn elevation(&self) -> i32 { self.elevation }
    pub fn label(&self) -> &str { &self.label }
    pub fn name(&self) -> &str { &self.name }
    pub fn panel(&self) -> &CallPanel { &self.panel }

    pub(crate) fn panel_mut(&mut self) -> &mut CallPanel { &mut self.panel }

    /// Queue a rider by its direction and light the matching call.
    pub fn add_rider(&mut self, rider: RiderRequest) {
        let direction = rider.direction();
        self.queue_mut(direction).push_back(rider);
        self.panel.press(direction);
    }

    /// Put a dequeued rider back at the head of its queue.
    pub(crate) fn requeue_front(&mut self, rider: RiderRequest) {
        let direction = rider.direction();
        self.queue_mut(direction).push_front(rider);
        self.panel.press(direction);
    }

    pub fn has_rider(&self, direction: CallDirection) -> bool {
        !self.queue(direction).is_empty()
    }

    pub fn has_up_rider(&self) -> bool { self.has_rider(CallDirection::Up) }
    pub fn has_down_rider(&self) -> bool { self.has_rider(CallDirection::Down) }

    /// Dequeue the longest-waiting rider headed `direction`. The call light goes
    /// out once that queue is empty.
    pub fn remove_rider(&mut self, direction: CallDirection) -> Option<RiderRequest> {
        let queue = self.queue_mut(direction);
        let rider = queue.pop_front();
        if queue.is_empty() {
            self.panel.clear(direction);
        }
        rider
    }

    pub fn remove_up_rider(&mut self) -> Option<RiderRequest> {
        self.remove_rider(CallDirection::Up)
    }

    pub fn remove_down_rider(&mut self) -> Option<RiderRequest> {
        self.remove_rider(CallDirection::Down)
    }

    pub fn queue(&self, direction: CallDirection) -> &VecDeque<RiderRequest> {
        match direction {
            CallDirection::Up => &self.up_queue,
            CallDirection::Down => &self.down_queue,
        }
    }

    fn queue_mut(&mut self, direction: CallDirection) -> &mut VecDeque<RiderRequest> {
        match direction {
            CallDirection::Up => &mut self.up_queue,
            CallDirection::Down => &mut self.down_queue,
        }
    }

    pub fn waiting_count(&self) -> usize {
        self.up_queue.len() + self.down_queue.len()
    }

    pub fn snapshot(&self, index: usize) -> FloorSnapshot {
        FloorSnapshot {
            index,
            elevation: self.elevation,
            label: self.label.clone(),
            name: self.name.clone(),
            up_queue: self.up_queue.iter().cloned().collect(),
            down_queue: self.down_queue.iter().cloned().collect(),
            up_lit: self.panel.is_lit(CallDirection::Up),
            down_lit: self.panel.is_lit(CallDirection::Down),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rider(id: u64, from: usize, to: usize) -> RiderRequest {
        RiderRequest::new(id, from, to, 0).expect("test: valid rider")
    }

    #[test]
    fn first_lit_prefers_up() {
        let mut panel = CallPanel::default();
        assert_eq!(panel.first_lit(), None);
        panel.press(CallDirection::Down);
        assert_eq!(panel.first_lit(), Some(CallDirection::Down));
        panel.press(CallDirection::Up);
        assert_eq!(panel.first_lit(), Some(CallDirection::Up));
    }

    #[test]
    fn riders_land_in_queue_matching_direction() {
        let mut floor = Floor::new(100, "2", "Second Floor");
        floor.add_rider(rider(1, 1, 3));
        floor.add_rider(rider(2, 1, 0));
        floor.add_rider(rider(3, 1, 4));

        assert_eq!(floor.queue(CallDirection::Up).len(), 2);
        assert_eq!(floor.queue(CallDirection::Down).len(), 1);
        assert!(floor.panel().is_lit(CallDirection::Up));
        assert!(floor.panel().is_lit(CallDirection::Down));

        assert_eq!(floor.remove_down_rider().map(|r| r.id()), Some(2));
        assert!(!floor.has_down_rider());
        assert!(!floor.panel().is_lit(CallDirection::Down));
        assert!(floor.has_up_rider());
        assert_eq!(floor.waiting_count(), 2);
    }

    #[test]
    fn call_light_clears_when_queue_drains() {
        let mut floor = Floor::new(0, "G", "Ground Floor");
        floor.add_rider(rider(1, 0, 2));
        floor.add_rider(rider(2, 0, 3));

        assert_eq!(floor.remove_up_rider().map(|r| r.id()), Some(1));
        assert!(floor.panel().is_lit(CallDirection::Up), "one rider still waiting");
        assert_eq!(floor.remove_up_rider().map(|r| r.id()), Some(2));
        assert!(!floor.panel().any_lit());
        assert_eq!(floor.remove_up_rider(), None);
    }
}
