//! The four generation-side stages of a projection.
//!
//! Each stage takes the baseline production and the delta accumulated so
//! far, and returns the updated delta together with the capital outlay of
//! its lever. Stages must run in the order transport, solar, wind,
//! insulation; bicycles have no stage of their own and only act through
//! transport.

use tracing::trace;

use super::assumptions::Assumptions;
use super::levers::{PERCENT_MAX, ScenarioInputs};
use super::reallocate::{reallocate, total_generation};
use super::types::{Category, GenerationDelta, GenerationMix};
use crate::error::Result;

/// kWh in one GWh.
pub const KWH_PER_GWH: f64 = 1_000_000.0;

/// Updated delta plus the capital outlay booked by one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    pub delta: GenerationDelta,
    /// Capital category and raw-currency amount.
    pub capital: (Category, f64),
}

/// Factor applied to road fleet emissions.
///
/// Bicycles come off the top first; electric cars then replace a share of
/// whatever fleet remains.
pub fn fleet_reduction(inputs: &ScenarioInputs) -> f64 {
    (1.0 - inputs.bicycle / PERCENT_MAX) * (1.0 - inputs.car / PERCENT_MAX)
}

/// Share of the whole fleet that becomes electric.
pub fn electric_share(inputs: &ScenarioInputs) -> f64 {
    (inputs.car / PERCENT_MAX) * (1.0 - inputs.bicycle / PERCENT_MAX)
}

/// Annual electricity needed to charge the electric share of the fleet (GWh).
pub fn ev_demand_gwh(electric_share: f64, a: &Assumptions) -> f64 {
    a.ev_km_per_year * a.ev_kwh_per_km * a.fleet_size * electric_share / KWH_PER_GWH
}

/// Electric vehicle charging demand, met proportionally by every source.
///
/// # Errors
///
/// Returns `DegenerateBaseline` if `production` sums to zero.
pub fn transport(
    production: &GenerationMix,
    delta: GenerationDelta,
    inputs: &ScenarioInputs,
    a: &Assumptions,
) -> Result<StageOutput> {
    let share = electric_share(inputs);
    let demand_gwh = ev_demand_gwh(share, a);
    trace!(share, demand_gwh, "transport stage");

    // New demand is a negative offset.
    let delta = reallocate(delta, production, -demand_gwh, &[])?;
    Ok(StageOutput {
        delta,
        capital: (Category::Road, share * a.fleet_size * a.ev_unit_cost),
    })
}

/// Rooftop solar: new output attributed to `Solar`, displacing every other source.
///
/// # Errors
///
/// Returns `DegenerateBaseline` if `production` sums to zero.
pub fn solar(
    production: &GenerationMix,
    mut delta: GenerationDelta,
    inputs: &ScenarioInputs,
    a: &Assumptions,
) -> Result<StageOutput> {
    let solar_gwh = inputs.solar * a.solar_kwh_per_house / KWH_PER_GWH;
    trace!(solar_gwh, "solar stage");

    delta.set(Category::Solar, solar_gwh);
    let delta = reallocate(delta, production, solar_gwh, &[Category::Solar])?;
    Ok(StageOutput {
        delta,
        capital: (Category::Solar, inputs.solar * a.solar_unit_cost),
    })
}

/// New wind farms: output attributed to `Wind`, displacing everything but solar.
///
/// When [`Assumptions::duplicate_wind_reduction`] is set, the displacement
/// is followed by [`repeat_wind_reduction`].
///
/// # Errors
///
/// Returns `DegenerateBaseline` if `production` sums to zero.
pub fn wind(
    production: &GenerationMix,
    mut delta: GenerationDelta,
    inputs: &ScenarioInputs,
    a: &Assumptions,
) -> Result<StageOutput> {
    delta.set(Category::Wind, inputs.windfarm * a.windfarm_gwh);
    let wind_gwh = delta.value(Category::Wind);
    trace!(wind_gwh, "wind stage");

    let mut delta = reallocate(
        delta,
        production,
        wind_gwh,
        &[Category::Solar, Category::Wind],
    )?;
    if a.duplicate_wind_reduction {
        delta = repeat_wind_reduction(delta, production)?;
    }
    Ok(StageOutput {
        delta,
        capital: (Category::Wind, inputs.windfarm * a.windfarm_unit_cost),
    })
}

/// Second proportional reduction of the wind stage.
///
/// Subtracts `production[source] * delta[Wind] / total` from every source
/// except `Wind`. Solar is not exempt here, though its zero baseline means
/// it loses nothing.
///
/// # Errors
///
/// Returns `DegenerateBaseline` if `production` sums to zero.
pub fn repeat_wind_reduction(
    mut delta: GenerationDelta,
    production: &GenerationMix,
) -> Result<GenerationDelta> {
    let decrease = delta.value(Category::Wind) / total_generation(production)?;
    for (source, gwh) in production.iter() {
        if source != Category::Wind {
            delta.subtract(source, gwh * decrease);
        }
    }
    Ok(delta)
}

/// Home insulation: lower demand, shed proportionally by every source.
///
/// # Errors
///
/// Returns `DegenerateBaseline` if `production` sums to zero.
pub fn insulation(
    production: &GenerationMix,
    delta: GenerationDelta,
    inputs: &ScenarioInputs,
    a: &Assumptions,
) -> Result<StageOutput> {
    let savings_gwh = inputs.home * a.insulation_kwh_per_home / KWH_PER_GWH;
    trace!(savings_gwh, "insulation stage");

    let delta = reallocate(delta, production, savings_gwh, &[])?;
    Ok(StageOutput {
        delta,
        capital: (Category::Insulation, inputs.home * a.insulation_unit_cost),
    })
}
