// Scenario Definitions - traffic levels, building layouts, scripted crowds
// Zero engine changes: all scenario logic is in rate curves and setup closures

use lift_engine::{Building, BuildingConfig};

// ─── Scenario Configuration ─────────────────────────────────────────────────

pub struct Scenario {
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub building: fn() -> BuildingConfig,
    pub ticks: u64,
    /// Expected arrivals per tick when no curve is set.
    pub rate: f64,
    pub rate_curve: Option<fn(u64) -> f64>,
    pub criteria: PassCriteria,
    /// Pre-run setup (e.g., a crowd already waiting in the lobby)
    pub setup: Option<Box<dyn Fn(&mut Building) + Send + Sync>>,
}

pub struct PassCriteria {
    pub require_ledger_balanced: bool,
    pub require_capacity_respected: bool,
    /// Percentage of spawned riders delivered by the last tick.
    pub min_delivery_rate: Option<f64>,
    pub max_avg_wait_ticks: Option<f64>,
    pub max_spawned: Option<u64>,
    /// Nobody left waiting or riding at the end.
    pub require_drained: bool,
}

impl Default for PassCriteria {
    fn default() -> Self {
        Self {
            require_ledger_balanced: true,
            require_capacity_respected: true,
            min_delivery_rate: None,
            max_avg_wait_ticks: None,
            max_spawned: None,
            require_drained: false,
        }
    }
}

// ─── Rate Curves ────────────────────────────────────────────────────────────

/// Quiet morning, a sharp lunch peak around tick 1000, quiet again.
fn lunch_rush_rate(tick: u64) -> f64 {
    let t = tick as f64;
    let peak = (-((t - 1000.0) / 200.0).powi(2)).exp();
    0.03 + 0.35 * peak
}

/// Slow sinusoidal swell between 0.02 and 0.22.
fn daily_cycle_rate(tick: u64) -> f64 {
    0.12 + 0.10 * (tick as f64 / 300.0).sin()
}

// ─── Building Layouts ───────────────────────────────────────────────────────

fn reference_building() -> BuildingConfig {
    BuildingConfig::default()
}

fn single_car() -> BuildingConfig {
    BuildingConfig::default().with_elevators(1, 12, 5)
}

fn tall_tower() -> BuildingConfig {
    BuildingConfig::tower(20, 50, 4, 16, 5)
}

fn small_cars() -> BuildingConfig {
    BuildingConfig::default().with_elevators(3, 2, 5)
}

// ─── Scenario Table ─────────────────────────────────────────────────────────

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "ZERO_ARRIVALS",
            label: "Zero arrivals",
            category: "baseline",
            building: reference_building,
            ticks: 500,
            rate: 0.0,
            rate_curve: None,
            criteria: PassCriteria { max_spawned: Some(0), require_drained: true, ..Default::default() },
            setup: None,
        },
        Scenario {
            name: "QUIET_BUILDING",
            label: "Quiet building",
            category: "baseline",
            building: reference_building,
            ticks: 2000,
            rate: 0.02,
            rate_curve: None,
            criteria: PassCriteria { min_delivery_rate: Some(80.0), ..Default::default() },
            setup: None,
        },
        Scenario {
            name: "STEADY_TRAFFIC",
            label: "Steady traffic",
            category: "load",
            building: reference_building,
            ticks: 2000,
            rate: 0.1,
            rate_curve: None,
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "LUNCH_RUSH",
            label: "Lunch rush peak",
            category: "load",
            building: reference_building,
            ticks: 2000,
            rate: 0.03,
            rate_curve: Some(lunch_rush_rate),
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "DAILY_CYCLE",
            label: "Daily demand cycle",
            category: "load",
            building: reference_building,
            ticks: 3000,
            rate: 0.12,
            rate_curve: Some(daily_cycle_rate),
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "OVERLOAD",
            label: "Sustained overload",
            category: "stress",
            building: reference_building,
            ticks: 1500,
            rate: 1.0,
            rate_curve: None,
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "SMALL_CARS",
            label: "Two-seat cars under load",
            category: "stress",
            building: small_cars,
            ticks: 1500,
            rate: 0.3,
            rate_curve: None,
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "SINGLE_CAR",
            label: "Single car",
            category: "layout",
            building: single_car,
            ticks: 2000,
            rate: 0.05,
            rate_curve: None,
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "TALL_TOWER",
            label: "Twenty-floor tower",
            category: "layout",
            building: tall_tower,
            ticks: 3000,
            rate: 0.15,
            rate_curve: None,
            criteria: PassCriteria::default(),
            setup: None,
        },
        Scenario {
            name: "LOBBY_CROWD",
            label: "Lobby crowd drains",
            category: "scripted",
            building: reference_building,
            ticks: 3000,
            rate: 0.0,
            rate_curve: None,
            criteria: PassCriteria {
                min_delivery_rate: Some(100.0),
                require_drained: true,
                ..Default::default()
            },
            setup: Some(Box::new(|building: &mut Building| {
                let floors = building.floors().len();
                for i in 0..30 {
                    let destination = 1 + i % (floors - 1);
                    if let Err(e) = building.place_rider(0, destination) {
                        eprintln!("  Warning: lobby crowd rider rejected: {}", e);
                    }
                }
            })),
        },
    ]
}

impl Scenario {
    pub fn rate_at(&self, tick: u64) -> f64 {
        match self.rate_curve {
            Some(curve) => curve(tick),
            None => self.rate,
        }
    }
}
