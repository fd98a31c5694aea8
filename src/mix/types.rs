//! Core mix types: categories, keyed value tables, and the projection result.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Key of every table the engine works with.
///
/// The first six variants are electricity generation sources. `Road` and
/// `Insulation` are synthetic categories that only appear in the fleet
/// emissions and capital cost tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Category {
    Hydro,
    Geothermal,
    Wind,
    Coal,
    Gas,
    Solar,
    Road,
    Insulation,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; 8] = [
        Category::Hydro,
        Category::Geothermal,
        Category::Wind,
        Category::Coal,
        Category::Gas,
        Category::Solar,
        Category::Road,
        Category::Insulation,
    ];

    /// Display name, identical to the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Category::Hydro => "Hydro",
            Category::Geothermal => "Geothermal",
            Category::Wind => "Wind",
            Category::Coal => "Coal",
            Category::Gas => "Gas",
            Category::Solar => "Solar",
            Category::Road => "Road",
            Category::Insulation => "Insulation",
        }
    }

    /// Returns `true` for electricity generation sources.
    pub fn is_generation(self) -> bool {
        !matches!(self, Category::Road | Category::Insulation)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown category \"{s}\""))
    }
}

/// A table of values keyed by [`Category`].
///
/// Iteration follows [`Category`] declaration order, so two mixes with the
/// same contents always print and serialize identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mix(BTreeMap<Category, f64>);

/// Annual generation per source (GWh).
pub type GenerationMix = Mix;
/// Annual generation emissions per source (kt CO2-e).
pub type EmissionsMix = Mix;
/// Annual operating cost per source (raw currency, millions after normalization).
pub type CostMix = Mix;
/// One-off capital outlay per category (raw currency, billions after normalization).
pub type CapitalCostMix = Mix;
/// Vehicle fleet emissions, keyed by `Road` (kt CO2-e).
pub type FleetEmissions = Mix;
/// Signed GWh change per source, accumulated across engine stages.
pub type GenerationDelta = Mix;

impl Mix {
    /// Creates an empty mix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value for `category`, or `None` when absent.
    pub fn get(&self, category: Category) -> Option<f64> {
        self.0.get(&category).copied()
    }

    /// Returns the value for `category`, treating an absent entry as zero.
    pub fn value(&self, category: Category) -> f64 {
        self.get(category).unwrap_or(0.0)
    }

    /// Returns `true` if the mix has an entry for `category`.
    pub fn contains(&self, category: Category) -> bool {
        self.0.contains_key(&category)
    }

    /// Sets the entry for `category`, replacing any previous value.
    pub fn set(&mut self, category: Category, value: f64) {
        self.0.insert(category, value);
    }

    /// Adds `amount` to the entry for `category`, creating it at `amount` if absent.
    pub fn add(&mut self, category: Category, amount: f64) {
        *self.0.entry(category).or_insert(0.0) += amount;
    }

    /// Subtracts `amount` from the entry for `category`, creating it at `-amount` if absent.
    pub fn subtract(&mut self, category: Category, amount: f64) {
        match self.0.get_mut(&category) {
            Some(v) => *v -= amount,
            None => {
                self.0.insert(category, 0.0 - amount);
            }
        }
    }

    /// Multiplies the entry for `category` by `factor`, if present.
    pub fn scale(&mut self, category: Category, factor: f64) {
        if let Some(v) = self.0.get_mut(&category) {
            *v *= factor;
        }
    }

    /// Divides every value by `divisor`.
    pub fn divide_all(&mut self, divisor: f64) {
        for v in self.0.values_mut() {
            *v /= divisor;
        }
    }

    /// Sum of all values.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Iterates over `(category, value)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.0.iter().map(|(&c, &v)| (c, v))
    }

    /// Iterates over the categories present in the mix.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.0.keys().copied()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the mix has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the first category whose value is NaN or infinite.
    pub fn first_non_finite(&self) -> Option<Category> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(c, _)| c)
    }
}

impl FromIterator<(Category, f64)> for Mix {
    fn from_iter<I: IntoIterator<Item = (Category, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(Category, f64); N]> for Mix {
    fn from(pairs: [(Category, f64); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Projected energy mix for one set of lever inputs.
///
/// Costs are in millions and capital costs in billions once the engine
/// returns. Field names serialize as `gen_production`, `gen_emissions`,
/// `gen_cost`, `gen_capital_cost` and `fleet_emissions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    /// Annual generation per source (GWh).
    #[serde(rename = "gen_production")]
    pub production: GenerationMix,
    /// Annual generation emissions per source (kt CO2-e).
    #[serde(rename = "gen_emissions")]
    pub emissions: EmissionsMix,
    /// Annual operating cost per source (millions).
    #[serde(rename = "gen_cost")]
    pub cost: CostMix,
    /// Capital outlay per category (billions).
    #[serde(rename = "gen_capital_cost")]
    pub capital_cost: CapitalCostMix,
    /// Vehicle fleet emissions (kt CO2-e).
    pub fleet_emissions: FleetEmissions,
}

impl ScenarioResult {
    /// Iterates over `(table name, mix)` pairs in output order.
    pub fn tables(&self) -> [(&'static str, &Mix); 5] {
        [
            ("gen_production", &self.production),
            ("gen_emissions", &self.emissions),
            ("gen_cost", &self.cost),
            ("gen_capital_cost", &self.capital_cost),
            ("fleet_emissions", &self.fleet_emissions),
        ]
    }
}

impl fmt::Display for ScenarioResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = ["GWh", "kt CO2-e", "$M", "$B", "kt CO2-e"];
        for (i, ((name, mix), unit)) in self.tables().iter().zip(units).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{name} ({unit})")?;
            for (category, value) in mix.iter() {
                writeln!(f, "  {:<11} {:>14.3}", category.name(), value)?;
            }
        }
        Ok(())
    }
}
