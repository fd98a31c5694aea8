//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use energy_mix::mix::assumptions::Assumptions;
use energy_mix::mix::baseline::Baseline;
use energy_mix::mix::engine::Engine;
use energy_mix::mix::levers::ScenarioInputs;
use energy_mix::mix::types::{Category, ScenarioResult};

/// Absolute tolerance for sums of reallocated GWh.
pub const GWH_TOLERANCE: f64 = 1e-6;

/// Engine over the reference year with default assumptions.
pub fn reference_engine() -> Engine {
    Engine::reference()
}

/// Engine over the reference year without the second wind reduction.
pub fn single_pass_wind_engine() -> Engine {
    Engine::new(Assumptions {
        duplicate_wind_reduction: false,
        ..Assumptions::default()
    })
}

/// The reference year in output units.
pub fn reference_result() -> ScenarioResult {
    ScenarioResult::from_baseline(Baseline::reference())
}

/// Inputs with a single lever set.
pub fn only(lever: &str, value: f64) -> ScenarioInputs {
    let mut inputs = ScenarioInputs::default();
    inputs
        .set_from_str(lever, &value.to_string())
        .expect("fixture lever should be valid");
    inputs
}

/// Reference production share of `category`.
pub fn reference_share(category: Category) -> f64 {
    let production = Baseline::reference().production;
    production.value(category) / production.total()
}

pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
