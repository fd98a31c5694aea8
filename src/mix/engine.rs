//! Scenario engine: validates inputs, runs the stage pipeline, folds and normalizes.

use tracing::{debug, trace};

use super::assumptions::Assumptions;
use super::baseline::{Baseline, BaselineProvider, ReferenceBaseline};
use super::fold::{fold_production, fold_table, normalize};
use super::levers::{LeverPolicy, ScenarioInputs};
use super::stages::{self, StageOutput};
use super::types::{Category, GenerationDelta, GenerationMix, ScenarioResult};
use crate::error::{Error, Result};

/// Signature shared by every generation-side stage.
pub type StageFn =
    fn(&GenerationMix, GenerationDelta, &ScenarioInputs, &Assumptions) -> Result<StageOutput>;

/// Generation-side stages in execution order.
pub const PIPELINE: [(&str, StageFn); 4] = [
    ("transport", stages::transport),
    ("solar", stages::solar),
    ("wind", stages::wind),
    ("insulation", stages::insulation),
];

/// Outcome of [`project`]: the normalized result and the delta that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    /// Accumulated generation change (GWh) after all stages.
    pub delta: GenerationDelta,
    pub result: ScenarioResult,
}

impl ScenarioResult {
    /// The baseline in output units, equal to the all-zero lever projection.
    pub fn from_baseline(baseline: Baseline) -> Self {
        let Baseline {
            production,
            emissions,
            mut cost,
            mut capital_cost,
            fleet_emissions,
        } = baseline;
        normalize(&mut cost, &mut capital_cost);
        Self {
            production,
            emissions,
            cost,
            capital_cost,
            fleet_emissions,
        }
    }
}

/// Projects `baseline` under `inputs`.
///
/// Runs the stages of [`PIPELINE`] against the baseline production, folds
/// the accumulated delta into production, emissions and cost, then converts
/// cost to millions and capital cost to billions. Inputs are used as given;
/// validation belongs to the caller (see [`Engine::run`]).
///
/// # Errors
///
/// Returns [`Error::DegenerateBaseline`] if the baseline production sums to
/// zero, and [`Error::NonFinite`] if any projected value is NaN or infinite.
pub fn project(baseline: Baseline, inputs: &ScenarioInputs, a: &Assumptions) -> Result<Projection> {
    let Baseline {
        mut production,
        mut emissions,
        mut cost,
        mut capital_cost,
        mut fleet_emissions,
    } = baseline;

    fleet_emissions.scale(Category::Road, stages::fleet_reduction(inputs));

    let mut delta = GenerationDelta::new();
    for (name, stage) in PIPELINE {
        let StageOutput {
            delta: next,
            capital: (category, amount),
        } = stage(&production, delta, inputs, a)?;
        trace!(stage = name, %category, amount, "capital cost booked");
        capital_cost.set(category, amount);
        delta = next;
    }

    fold_production(&mut production, &delta);
    fold_table(&mut emissions, &delta, &production);
    fold_table(&mut cost, &delta, &production);
    normalize(&mut cost, &mut capital_cost);

    let result = ScenarioResult {
        production,
        emissions,
        cost,
        capital_cost,
        fleet_emissions,
    };
    for (table, mix) in result.tables() {
        if let Some(category) = mix.first_non_finite() {
            return Err(Error::NonFinite { table, category });
        }
    }

    Ok(Projection { delta, result })
}

/// Runs scenarios against a baseline provider.
///
/// The engine holds configuration only; every [`Engine::run`] takes a fresh
/// baseline snapshot and shares nothing with other runs.
///
/// # Examples
///
/// ```
/// use energy_mix::mix::engine::Engine;
/// use energy_mix::mix::levers::ScenarioInputs;
/// use energy_mix::mix::types::Category;
///
/// let engine = Engine::reference();
/// let inputs = ScenarioInputs { solar: 100.0, ..ScenarioInputs::default() };
/// let result = engine.run(&inputs).unwrap();
/// assert_eq!(result.production.value(Category::Solar), 0.526);
/// ```
#[derive(Debug, Clone)]
pub struct Engine<P: BaselineProvider = ReferenceBaseline> {
    provider: P,
    assumptions: Assumptions,
    policy: LeverPolicy,
    debug: bool,
}

impl Engine<ReferenceBaseline> {
    /// Creates an engine over the reference-year baseline.
    pub fn new(assumptions: Assumptions) -> Self {
        Self::with_provider(ReferenceBaseline, assumptions)
    }

    /// Reference-year baseline with default assumptions.
    pub fn reference() -> Self {
        Self::new(Assumptions::default())
    }
}

impl Default for Engine<ReferenceBaseline> {
    fn default() -> Self {
        Self::reference()
    }
}

impl<P: BaselineProvider> Engine<P> {
    /// Creates an engine over a custom baseline provider.
    pub fn with_provider(provider: P, assumptions: Assumptions) -> Self {
        Self {
            provider,
            assumptions,
            policy: LeverPolicy::Reject,
            debug: false,
        }
    }

    /// Sets how out-of-range lever values are handled.
    pub fn with_policy(mut self, policy: LeverPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Emits inputs, delta and result as `debug` events on every run.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Returns the model assumptions.
    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Returns a fresh snapshot of the baseline.
    pub fn baseline(&self) -> Baseline {
        self.provider.baseline()
    }

    /// Validates `inputs` and projects them against a fresh baseline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLever`] for inputs outside their domain (under
    /// the reject policy) or non-finite inputs, and any error of [`project`].
    pub fn run(&self, inputs: &ScenarioInputs) -> Result<ScenarioResult> {
        let inputs = inputs.validated(self.policy)?;
        if self.debug {
            debug!(%inputs, "scenario inputs");
        }

        let Projection { delta, result } =
            project(self.provider.baseline(), &inputs, &self.assumptions)?;

        if self.debug {
            debug!(?delta, "generation delta");
            debug!(?result, "scenario result");
        }
        Ok(result)
    }
}

/// Projects `inputs` against the reference baseline with default assumptions.
///
/// # Errors
///
/// See [`Engine::run`].
pub fn run(inputs: &ScenarioInputs) -> Result<ScenarioResult> {
    Engine::reference().run(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::levers::Lever;

    #[test]
    fn zero_levers_reproduce_baseline() {
        let baseline = Baseline::reference();
        let result = run(&ScenarioInputs::default()).unwrap();

        assert_eq!(result.production, baseline.production);
        assert_eq!(result.emissions, baseline.emissions);
        assert_eq!(result.fleet_emissions, baseline.fleet_emissions);
        for (source, raw) in baseline.cost.iter() {
            assert_eq!(result.cost.get(source), Some(raw / 1e6));
        }
        assert_eq!(result.capital_cost.len(), 8);
        assert!(result.capital_cost.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn out_of_range_input_is_rejected() {
        let inputs = ScenarioInputs::default().with(Lever::Bicycle, 101.0);
        let err = run(&inputs).unwrap_err();
        assert!(matches!(err, Error::InvalidLever { lever: Lever::Bicycle, .. }));
    }

    #[test]
    fn clamp_policy_runs_clamped_values() {
        let engine = Engine::reference().with_policy(LeverPolicy::Clamp);
        let clamped = engine
            .run(&ScenarioInputs::default().with(Lever::Car, 250.0))
            .unwrap();
        let full = engine
            .run(&ScenarioInputs::default().with(Lever::Car, 100.0))
            .unwrap();
        assert_eq!(clamped, full);
    }

    #[test]
    fn degenerate_custom_baseline_is_reported() {
        let mut baseline = Baseline::reference();
        for source in Category::ALL {
            if baseline.production.contains(source) {
                baseline.production.set(source, 0.0);
            }
        }
        let engine = Engine::with_provider(baseline, Assumptions::default());
        let err = engine.run(&ScenarioInputs::default()).unwrap_err();
        assert!(matches!(err, Error::DegenerateBaseline { .. }));
    }

    #[test]
    fn delta_reflects_every_stage() {
        let inputs = ScenarioInputs {
            car: 20.0,
            solar: 50.0,
            home: 100.0,
            windfarm: 1.0,
            ..ScenarioInputs::default()
        };
        let projection =
            project(Baseline::reference(), &inputs, &Assumptions::default()).unwrap();
        assert_eq!(projection.delta.len(), 6);
        assert!(projection.delta.value(Category::Wind) > 0.0);
        assert!(projection.delta.value(Category::Coal) < 0.0);
        assert_eq!(
            projection.result.capital_cost.value(Category::Wind),
            521_344_918.0 / 1e9
        );
    }

    #[test]
    fn production_can_go_negative() {
        let inputs = ScenarioInputs::default().with(Lever::Windfarm, 60.0);
        let result = run(&inputs).unwrap();
        assert!(result.production.value(Category::Coal) < 0.0);
    }

    #[test]
    fn engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
        assert_send_sync::<Engine<Baseline>>();
    }
}
