//! Per-unit model assumptions behind each lever.

use serde::Deserialize;

/// Physical and cost constants used by the engine stages.
///
/// Defaults are the reference-year figures. Every field can be overridden
/// from the `[assumptions]` table of a scenario file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    /// Average distance driven per vehicle per year (km).
    pub ev_km_per_year: f64,
    /// Electric vehicle consumption (kWh per km).
    pub ev_kwh_per_km: f64,
    /// Number of vehicles in the national fleet.
    pub fleet_size: f64,
    /// Purchase cost of one electric vehicle ($).
    pub ev_unit_cost: f64,
    /// Installation cost of one rooftop solar system ($).
    pub solar_unit_cost: f64,
    /// Annual output of one rooftop solar system (kWh).
    pub solar_kwh_per_house: f64,
    /// Annual output of one new wind farm (GWh).
    pub windfarm_gwh: f64,
    /// Capital cost of one new wind farm ($).
    pub windfarm_unit_cost: f64,
    /// Cost of insulating one home ($).
    pub insulation_unit_cost: f64,
    /// Annual electricity saved by one insulated home (kWh).
    pub insulation_kwh_per_home: f64,
    /// Apply the second proportional reduction in the wind stage.
    ///
    /// The wind stage reallocates the new wind output once with the usual
    /// exemptions, then subtracts the same share again from every non-wind
    /// source. Published projections include both adjustments.
    pub duplicate_wind_reduction: bool,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            ev_km_per_year: 12032.0,
            ev_kwh_per_km: 0.2,
            fleet_size: 3_341_013.0,
            ev_unit_cost: 40_000.0,
            solar_unit_cost: 12_495.0,
            solar_kwh_per_house: 5260.0,
            windfarm_gwh: 702.0,
            windfarm_unit_cost: 521_344_918.0,
            insulation_unit_cost: 7630.0,
            insulation_kwh_per_home: 3571.0,
            duplicate_wind_reduction: true,
        }
    }
}

impl Assumptions {
    /// Returns `(field, value)` for every numeric assumption, for validation.
    pub fn numeric_fields(&self) -> [(&'static str, f64); 10] {
        [
            ("ev_km_per_year", self.ev_km_per_year),
            ("ev_kwh_per_km", self.ev_kwh_per_km),
            ("fleet_size", self.fleet_size),
            ("ev_unit_cost", self.ev_unit_cost),
            ("solar_unit_cost", self.solar_unit_cost),
            ("solar_kwh_per_house", self.solar_kwh_per_house),
            ("windfarm_gwh", self.windfarm_gwh),
            ("windfarm_unit_cost", self.windfarm_unit_cost),
            ("insulation_unit_cost", self.insulation_unit_cost),
            ("insulation_kwh_per_home", self.insulation_kwh_per_home),
        ]
    }
}
