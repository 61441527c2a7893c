// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite - Building Configuration

//! Static building layout: floors, cars and door dwell. Supplied once before
//! the simulation starts and never changed afterwards.

use serde::{Deserialize, Serialize};

use crate::elevator::DEFAULT_DWELL_TICKS;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least two floors are required, got {0}")]
    TooFewFloors(usize),

    #[error("at least one elevator is required")]
    NoElevators,

    #[error("elevator {0} has zero capacity")]
    ZeroCapacity(usize),

    #[error("elevator {index} has non-positive speed {speed}")]
    InvalidSpeed { index: usize, speed: i32 },

    #[error("elevator {index} starts at floor {floor}, but only {floors} floors exist")]
    StartFloorOutOfRange { index: usize, floor: usize, floors: usize },

    #[error("floor {index} elevation {elevation} is not above the floor below it")]
    ElevationsNotAscending { index: usize, elevation: i32 },

    #[error("elevator {elevator} (speed {speed}) can never stop at floor {floor} (elevation {elevation})")]
    UnreachableFloor { elevator: usize, speed: i32, floor: usize, elevation: i32 },

    #[error("door dwell must be at least one tick")]
    ZeroDwell,

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorConfig {
    pub elevation: i32,
    pub label: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElevatorConfig {
    pub capacity: usize,
    /// Elevation units travelled per tick.
    pub speed: i32,
    #[serde(default)]
    pub start_floor: usize,
}

fn default_dwell_ticks() -> u32 {
    DEFAULT_DWELL_TICKS
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub floors: Vec<FloorConfig>,
    pub elevators: Vec<ElevatorConfig>,
    #[serde(default = "default_dwell_ticks")]
    pub door_dwell_ticks: u32,
}

impl Default for BuildingConfig {
    /// Five floors with uneven upper spacing, three cars of twelve.
    fn default() -> Self {
        let floor = |elevation: i32, label: &str, name: &str| FloorConfig {
            elevation,
            label: label.to_string(),
            name: name.to_string(),
        };
        let car = |start_floor: usize| ElevatorConfig { capacity: 12, speed: 5, start_floor };
        Self {
            floors: vec![
                floor(0, "G", "Ground Floor"),
                floor(100, "2", "Second Floor"),
                floor(200, "3", "Third Floor"),
                floor(305, "4", "Fourth Floor"),
                floor(410, "5", "Fifth Floor"),
            ],
            elevators: vec![car(0), car(1), car(2)],
            door_dwell_ticks: DEFAULT_DWELL_TICKS,
        }
    }
}

impl BuildingConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Same layout with `count` identical cars, all starting on the ground floor.
    pub fn with_elevators(mut self, count: usize, capacity: usize, speed: i32) -> Self {
        self.elevators = (0..count)
            .map(|_| ElevatorConfig { capacity, speed, start_floor: 0 })
            .collect();
        self
    }

    /// Evenly spaced floors `spacing` apart, labelled "G", "2", "3", ...
    pub fn tower(floors: usize, spacing: i32, elevators: usize, capacity: usize, speed: i32) -> Self {
        let floors = (0..floors)
            .map(|i| FloorConfig {
                elevation: i as i32 * spacing,
                label: if i == 0 { "G".to_string() } else { (i + 1).to_string() },
                name: format!("Floor {}", i + 1),
            })
            .collect();
        Self { floors, ..Self::default() }.with_elevators(elevators, capacity, speed)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.floors.len() < 2 {
            return Err(ConfigError::TooFewFloors(self.floors.len()));
        }
        if self.elevators.is_empty() {
            return Err(ConfigError::NoElevators);
        }
        if self.door_dwell_ticks == 0 {
            return Err(ConfigError::ZeroDwell);
        }
        for (index, pair) in self.floors.windows(2).enumerate() {
            if pair[1].elevation <= pair[0].elevation {
                return Err(ConfigError::ElevationsNotAscending {
                    index: index + 1,
                    elevation: pair[1].elevation,
                });
            }
        }
        for (index, car) in self.elevators.iter().enumerate() {
            if car.capacity == 0 {
                return Err(ConfigError::ZeroCapacity(index));
            }
            if car.speed <= 0 {
                return Err(ConfigError::InvalidSpeed { index, speed: car.speed });
            }
            let start = self.floors.get(car.start_floor).ok_or(ConfigError::StartFloorOutOfRange {
                index,
                floor: car.start_floor,
                floors: self.floors.len(),
            })?;
            // Floors are matched by exact elevation, so every stop must be a
            // whole number of steps from where the car starts. Widened so the
            // span between any two i32 elevations fits.
            for (floor, f) in self.floors.iter().enumerate() {
                let offset = i64::from(f.elevation) - i64::from(start.elevation);
                if offset % i64::from(car.speed) != 0 {
                    return Err(ConfigError::UnreachableFloor {
                        elevator: index,
                        speed: car.speed,
                        floor,
                        elevation: f.elevation,
                    });
                }
            }
        }
        Ok(())
    }

    /// Lowest and highest floor elevations.
    pub fn shaft(&self) -> (i32, i32) {
        let bottom = self.floors.first().map(|f| f.elevation).unwrap_or(0);
        let top = self.floors.last().map(|f| f.elevation).unwrap_or(0);
        (bottom, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_building_is_valid() {
        let config = BuildingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.floors.len(), 5);
        assert_eq!(config.elevators.len(), 3);
        assert_eq!(config.shaft(), (0, 410));
    }

    #[test]
    fn single_floor_is_rejected() {
        let mut config = BuildingConfig::default();
        config.floors.truncate(1);
        assert!(matches!(config.validate(), Err(ConfigError::TooFewFloors(1))));
    }

    #[test]
    fn unreachable_floor_is_rejected() {
        let config = BuildingConfig::default().with_elevators(1, 8, 10);
        let err = config.validate().expect_err("test: 305 is not a multiple of 10");
        assert!(
            matches!(err, ConfigError::UnreachableFloor { floor: 3, .. }),
            "expected UnreachableFloor, got: {err}"
        );
    }

    #[test]
    fn extreme_elevations_are_checked_without_overflow() {
        let floors = vec![
            FloorConfig { elevation: -2_000_000_000, label: "B".into(), name: String::new() },
            FloorConfig { elevation: 2_000_000_000, label: "T".into(), name: String::new() },
        ];
        let config = BuildingConfig { floors, ..BuildingConfig::default() }
            .with_elevators(1, 4, 7);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnreachableFloor { floor: 1, speed: 7, .. })
        ));

        let reachable = config.with_elevators(1, 4, 1_000_000_000);
        assert!(reachable.validate().is_ok());
    }

    #[test]
    fn descending_elevations_are_rejected() {
        let mut config = BuildingConfig::default();
        config.floors.swap(1, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ElevationsNotAscending { index: 2, elevation: 100 })
        ));
    }

    #[test]
    fn start_floor_must_exist() {
        let mut config = BuildingConfig::default();
        config.elevators[2].start_floor = 9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartFloorOutOfRange { index: 2, floor: 9, floors: 5 })
        ));
    }

    #[test]
    fn json_round_trip_with_defaults() {
        let json = r#"{
            "floors": [
                {"elevation": 0, "label": "G"},
                {"elevation": 30, "label": "1"}
            ],
            "elevators": [{"capacity": 4, "speed": 3}]
        }"#;
        let config = BuildingConfig::from_json(json).expect("test: valid config");
        assert_eq!(config.door_dwell_ticks, DEFAULT_DWELL_TICKS);
        assert_eq!(config.elevators[0].start_floor, 0);
        assert!(config.floors[1].name.is_empty());

        assert!(matches!(
            BuildingConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn tower_spaces_floors_evenly() {
        let config = BuildingConfig::tower(10, 40, 2, 8, 4);
        assert!(config.validate().is_ok());
        assert_eq!(config.shaft(), (0, 360));
        assert_eq!(config.floors[0].label, "G");
        assert_eq!(config.floors[9].label, "10");
    }
}
