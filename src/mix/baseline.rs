//! Reference-year (2013/2014) dataset the scenarios are projected from.

use super::types::{
    CapitalCostMix, Category, CostMix, EmissionsMix, FleetEmissions, GenerationMix,
};

/// Annual vehicle fleet emissions in the reference year (kt CO2-e).
pub const ROAD_FLEET_EMISSIONS_KT: f64 = 12688.0;

/// A complete set of reference tables.
///
/// Costs are in raw currency; the engine converts them on output.
#[derive(Debug, Clone, PartialEq)]
pub struct Baseline {
    /// Annual generation (GWh).
    pub production: GenerationMix,
    /// Annual generation emissions (kt CO2-e).
    pub emissions: EmissionsMix,
    /// Annual operating cost ($).
    pub cost: CostMix,
    /// Capital outlay ($), zero for every category in the reference year.
    pub capital_cost: CapitalCostMix,
    /// Vehicle fleet emissions (kt CO2-e).
    pub fleet_emissions: FleetEmissions,
}

impl Baseline {
    /// Builds the reference-year dataset.
    ///
    /// Every call allocates fresh tables, so callers may mutate the result
    /// without affecting later calls.
    pub fn reference() -> Self {
        use Category::*;

        Self {
            production: GenerationMix::from([
                (Hydro, 24095.0),
                (Geothermal, 6487.0),
                (Wind, 2187.0),
                (Coal, 1832.0),
                (Gas, 6626.0),
                (Solar, 0.0),
            ]),
            emissions: EmissionsMix::from([
                (Hydro, 0.0),
                (Geothermal, 847.32),
                (Wind, 0.0),
                (Coal, 1222.2),
                (Gas, 3405.51),
            ]),
            cost: CostMix::from([
                (Hydro, 53_872_180.0),
                (Geothermal, 59_535_000.0),
                (Wind, 43_484_000.0),
                (Coal, 34_177_200.0),
                (Gas, 161_044_192.0),
            ]),
            capital_cost: CapitalCostMix::from([
                (Hydro, 0.0),
                (Geothermal, 0.0),
                (Wind, 0.0),
                (Coal, 0.0),
                (Insulation, 0.0),
                (Gas, 0.0),
                (Solar, 0.0),
                (Road, 0.0),
            ]),
            fleet_emissions: FleetEmissions::from([(Road, ROAD_FLEET_EMISSIONS_KT)]),
        }
    }
}

/// Source of the baseline snapshot an engine run starts from.
///
/// Implementations must return an independent snapshot on every call.
pub trait BaselineProvider {
    fn baseline(&self) -> Baseline;
}

/// The fixed reference-year dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceBaseline;

impl BaselineProvider for ReferenceBaseline {
    fn baseline(&self) -> Baseline {
        Baseline::reference()
    }
}

/// A caller-supplied dataset, cloned for every run.
impl BaselineProvider for Baseline {
    fn baseline(&self) -> Baseline {
        self.clone()
    }
}
