//! Property-based tests for the scenario engine.
//!
//! Generates lever inputs across their domains and checks the structural
//! properties every projection must hold.

use energy_mix::mix::assumptions::Assumptions;
use energy_mix::mix::baseline::Baseline;
use energy_mix::mix::engine::Engine;
use energy_mix::mix::levers::{Lever, LeverPolicy, ScenarioInputs};
use energy_mix::mix::reallocate::reallocate;
use energy_mix::mix::types::{Category, GenerationDelta, ScenarioResult};
use energy_mix::run;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

fn arb_percent() -> impl Strategy<Value = f64> {
    0.0..=100.0f64
}

/// Inputs inside every lever's domain.
fn arb_inputs() -> impl Strategy<Value = ScenarioInputs> {
    (
        arb_percent(),
        arb_percent(),
        arb_percent(),
        0.0..1_000_000.0f64,
        0.0..20.0f64,
    )
        .prop_map(|(car, bicycle, solar, home, windfarm)| ScenarioInputs {
            car,
            bicycle,
            solar,
            home,
            windfarm,
        })
}

fn road(result: &ScenarioResult) -> f64 {
    result.fleet_emissions.value(Category::Road)
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every in-domain input projects to finite tables.
    #[test]
    fn valid_inputs_always_project(inputs in arb_inputs()) {
        let result = run(&inputs);
        prop_assert!(result.is_ok(), "run failed: {:?}", result.err());
    }

    /// Same inputs, same result, regardless of what ran in between.
    #[test]
    fn runs_are_deterministic(a in arb_inputs(), b in arb_inputs()) {
        let engine = Engine::reference();
        let first = engine.run(&a).unwrap();
        let _ = engine.run(&b).unwrap();
        prop_assert_eq!(first, engine.run(&a).unwrap());
    }

    /// Road emissions never rise as car or bicycle adoption rises.
    #[test]
    fn road_emissions_fall_with_adoption(
        inputs in arb_inputs(),
        extra in 0.0..=100.0f64,
    ) {
        for lever in [Lever::Car, Lever::Bicycle] {
            let raised = (inputs.get(lever) + extra).min(100.0);
            let before = run(&inputs).unwrap();
            let after = run(&inputs.with(lever, raised)).unwrap();
            prop_assert!(road(&after) <= road(&before));
        }
    }

    /// Capital cost of solar, wind and insulation is exactly linear in its lever.
    #[test]
    fn capital_cost_is_linear(inputs in arb_inputs()) {
        let a = Assumptions::default();
        let result = run(&inputs).unwrap();
        let capital = &result.capital_cost;
        prop_assert_eq!(capital.value(Category::Solar), inputs.solar * a.solar_unit_cost / 1e9);
        prop_assert_eq!(capital.value(Category::Wind), inputs.windfarm * a.windfarm_unit_cost / 1e9);
        prop_assert_eq!(capital.value(Category::Insulation), inputs.home * a.insulation_unit_cost / 1e9);
    }

    /// Solar output is never displaced by later stages.
    #[test]
    fn solar_output_is_kept_whole(inputs in arb_inputs()) {
        let a = Assumptions::default();
        let result = run(&inputs).unwrap();
        prop_assert_eq!(
            result.production.value(Category::Solar),
            inputs.solar * a.solar_kwh_per_house / 1e6
        );
    }

    /// Bicycles alone change road emissions and nothing else.
    #[test]
    fn bicycles_leave_generation_untouched(bicycle in arb_percent()) {
        let result = run(&ScenarioInputs::default().with(Lever::Bicycle, bicycle)).unwrap();
        prop_assert_eq!(result.production, Baseline::reference().production);
        prop_assert_eq!(result.emissions, Baseline::reference().emissions);
    }

    /// Clamping maps any finite value onto an in-domain run.
    #[test]
    fn clamp_matches_in_domain_run(car in -500.0..500.0f64) {
        let engine = Engine::reference().with_policy(LeverPolicy::Clamp);
        let clamped = engine.run(&ScenarioInputs::default().with(Lever::Car, car)).unwrap();
        let expected = run(&ScenarioInputs::default().with(Lever::Car, car.clamp(0.0, 100.0))).unwrap();
        prop_assert_eq!(clamped, expected);
    }

    /// A reallocation moves exactly the requested amount when the exempt
    /// sources carry no production.
    #[test]
    fn reallocation_is_conserved(amount in -10_000.0..10_000.0f64) {
        let production = Baseline::reference().production;
        let delta = reallocate(GenerationDelta::new(), &production, amount, &[Category::Solar]).unwrap();
        let moved: f64 = delta.iter().map(|(_, v)| v.abs()).sum();
        prop_assert!((moved - amount.abs()).abs() < 1e-6, "moved {} for {}", moved, amount);
        prop_assert!(delta.get(Category::Solar).is_none());
    }
}
