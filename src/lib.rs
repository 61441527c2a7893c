// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Lift Dispatch Simulation Suite

pub mod types;
pub mod rider;
pub mod floor;
pub mod elevator;
pub mod arrivals;
pub mod config;
pub mod ledger;
pub mod building;

pub use types::*;
pub use building::{compare_elevation, Building};
pub use config::{BuildingConfig, ConfigError, ElevatorConfig, FloorConfig};
pub use rider::{RiderError, RiderRequest};

use wasm_bindgen::prelude::*;

// ─── WASM Interface ──────────────────────────────────────────────────────────

#[wasm_bindgen]
impl Building {
    /// Reference five-floor, three-car building.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<Building, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        Building::from_config(BuildingConfig::default(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = fromConfig)]
    pub fn from_config_json(json: &str, seed: u64) -> Result<Building, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        BuildingConfig::from_json(json)
            .and_then(|config| Building::from_config(config, seed))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = tick)]
    pub fn tick_js(&mut self, arrival_rate: f64) -> JsValue {
        let result = self.tick(arrival_rate);
        serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
    }

    #[wasm_bindgen(js_name = placeRider)]
    pub fn place_rider_js(&mut self, origin: usize, destination: usize) -> Result<u64, JsValue> {
        self.place_rider(origin, destination)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn get_elevators(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.elevator_snapshots()).unwrap_or(JsValue::NULL)
    }

    pub fn get_floors(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.floor_snapshots()).unwrap_or(JsValue::NULL)
    }

    pub fn get_stats(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.stats()).unwrap_or(JsValue::NULL)
    }

    /// Run N ticks without returning results (fast batch mode for benchmarking)
    pub fn run_batch(&mut self, ticks: u32, arrival_rate: f64) {
        for _ in 0..ticks {
            self.step(arrival_rate);
        }
    }

    /// Rebuild from the construction config and seed
    pub fn reset(&mut self) {
        *self = Building::build(self.config.clone(), self.seed);
    }
}
