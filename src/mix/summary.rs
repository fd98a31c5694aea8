//! Headline totals of a projection and the chart groupings consumers display.

use std::fmt;

use super::types::{Category, Mix, ScenarioResult};

/// The four charts a front end draws from a [`ScenarioResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartView {
    /// Generation emissions of the emitting sources plus road fleet emissions.
    Emissions,
    /// Full generation mix.
    Production,
    /// Operating cost per source.
    Cost,
    /// Capital outlay per category.
    Investment,
}

impl ChartView {
    pub const ALL: [ChartView; 4] = [
        ChartView::Emissions,
        ChartView::Production,
        ChartView::Cost,
        ChartView::Investment,
    ];

    /// Sources shown in the emissions chart, besides `Road`.
    pub const EMITTERS: [Category; 3] = [Category::Geothermal, Category::Coal, Category::Gas];

    pub fn title(self) -> &'static str {
        match self {
            ChartView::Emissions => "CO2 emissions",
            ChartView::Production => "Generation",
            ChartView::Cost => "Operating cost",
            ChartView::Investment => "Investment",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            ChartView::Emissions => "kt CO2-e",
            ChartView::Production => "GWh",
            ChartView::Cost => "$M",
            ChartView::Investment => "$B",
        }
    }

    /// Extracts the series this chart plots from `result`.
    pub fn series(self, result: &ScenarioResult) -> Mix {
        match self {
            ChartView::Emissions => Self::EMITTERS
                .into_iter()
                .map(|c| (c, result.emissions.value(c)))
                .chain([(Category::Road, result.fleet_emissions.value(Category::Road))])
                .collect(),
            ChartView::Production => result.production.clone(),
            ChartView::Cost => result.cost.clone(),
            ChartView::Investment => result.capital_cost.clone(),
        }
    }

    /// Sum of the chart's series.
    pub fn total(self, result: &ScenarioResult) -> f64 {
        self.series(result).total()
    }
}

/// Headline totals of a projection and their change against a reference.
///
/// The reference is normally the normalized baseline, i.e. the all-zero
/// lever projection.
#[derive(Debug, Clone, PartialEq)]
pub struct MixSummary {
    /// Total of the emissions chart (kt CO2-e).
    pub emissions_kt: f64,
    /// Total generation (GWh).
    pub production_gwh: f64,
    /// Total operating cost ($M).
    pub cost_millions: f64,
    /// Total capital outlay ($B).
    pub investment_billions: f64,
    /// Emissions change against the reference (kt CO2-e).
    pub emissions_change_kt: f64,
    /// Generation change against the reference (GWh).
    pub production_change_gwh: f64,
    /// Operating cost change against the reference ($M).
    pub cost_change_millions: f64,
}

impl MixSummary {
    /// Computes totals of `result` and their change against `reference`.
    pub fn from_result(result: &ScenarioResult, reference: &ScenarioResult) -> Self {
        let emissions_kt = ChartView::Emissions.total(result);
        let production_gwh = ChartView::Production.total(result);
        let cost_millions = ChartView::Cost.total(result);

        Self {
            emissions_kt,
            production_gwh,
            cost_millions,
            investment_billions: ChartView::Investment.total(result),
            emissions_change_kt: emissions_kt - ChartView::Emissions.total(reference),
            production_change_gwh: production_gwh - ChartView::Production.total(reference),
            cost_change_millions: cost_millions - ChartView::Cost.total(reference),
        }
    }
}

impl fmt::Display for MixSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Scenario Summary ---")?;
        writeln!(
            f,
            "Emissions:    {:.1} kt CO2-e ({:+.1})",
            self.emissions_kt, self.emissions_change_kt
        )?;
        writeln!(
            f,
            "Generation:   {:.1} GWh ({:+.1})",
            self.production_gwh, self.production_change_gwh
        )?;
        writeln!(
            f,
            "Running cost: {:.2} $M ({:+.2})",
            self.cost_millions, self.cost_change_millions
        )?;
        write!(f, "Investment:   {:.3} $B", self.investment_billions)
    }
}
