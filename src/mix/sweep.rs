//! Runs one lever across its slider range, holding the others fixed.

use tracing::debug;

use super::baseline::BaselineProvider;
use super::engine::Engine;
use super::levers::{Lever, PERCENT_MAX, ScenarioInputs};
use super::summary::MixSummary;
use super::types::ScenarioResult;
use crate::error::Result;

/// One run of a sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepPoint {
    /// Value of the swept lever.
    pub value: f64,
    pub result: ScenarioResult,
    /// Totals against the engine's baseline.
    pub summary: MixSummary,
}

/// Value of the swept lever at position `i` of `steps`.
pub fn sweep_value(i: usize, steps: usize) -> f64 {
    PERCENT_MAX * i as f64 / steps as f64
}

/// Runs `engine` for `steps + 1` evenly spaced values of `lever` in `[0, 100]`.
///
/// This is the slider range for every lever, the count levers included:
/// `windfarm` goes up to 100 farms, `home` up to only 100 homes, which
/// barely moves the mix. Other levers keep their values from `base`. A
/// `steps` of zero is treated as one, giving the two end points.
///
/// # Errors
///
/// Returns the first error of [`Engine::run`], e.g. when a lever in `base`
/// is out of range under the reject policy.
pub fn sweep<P: BaselineProvider>(
    engine: &Engine<P>,
    base: &ScenarioInputs,
    lever: Lever,
    steps: usize,
) -> Result<Vec<SweepPoint>> {
    let steps = steps.max(1);
    let reference = ScenarioResult::from_baseline(engine.baseline());
    debug!(%lever, steps, "sweep starting");

    (0..=steps)
        .map(|i| {
            let value = sweep_value(i, steps);
            let result = engine.run(&base.with(lever, value))?;
            let summary = MixSummary::from_result(&result, &reference);
            Ok(SweepPoint {
                value,
                result,
                summary,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::types::Category;

    #[test]
    fn sweep_covers_the_slider_range() {
        let engine = Engine::reference();
        let points = sweep(&engine, &ScenarioInputs::default(), Lever::Car, 4).unwrap();
        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(points[0].summary.emissions_change_kt, 0.0);
    }

    #[test]
    fn zero_steps_gives_end_points() {
        let engine = Engine::reference();
        let points = sweep(&engine, &ScenarioInputs::default(), Lever::Solar, 0).unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].result.production.value(Category::Solar), 0.526);
    }

    #[test]
    fn road_emissions_fall_along_a_bicycle_sweep() {
        let engine = Engine::reference();
        let base = ScenarioInputs::default().with(Lever::Car, 30.0);
        let points = sweep(&engine, &base, Lever::Bicycle, 10).unwrap();
        for pair in points.windows(2) {
            let before = pair[0].result.fleet_emissions.value(Category::Road);
            let after = pair[1].result.fleet_emissions.value(Category::Road);
            assert!(after <= before);
        }
    }

    #[test]
    fn count_levers_use_the_slider_range() {
        let engine = Engine::reference();
        let points = sweep(&engine, &ScenarioInputs::default(), Lever::Home, 2).unwrap();
        let last = points.last().expect("sweep has end points");
        assert_eq!(last.value, 100.0);
        assert_eq!(
            last.result.capital_cost.value(Category::Insulation),
            100.0 * 7630.0 / 1e9
        );
        assert!(last.summary.production_change_gwh > -1.0);
    }
}
