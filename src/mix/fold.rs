//! Folding an accumulated delta into the baseline tables, and unit normalization.
//!
//! The order matters: [`fold_production`] runs first, then the per-unit
//! rates are taken from the already-updated production by
//! [`derive_rates`]. Rates are therefore diluted by the delta being
//! applied, and projections depend on that.

use super::types::{CapitalCostMix, CostMix, GenerationDelta, GenerationMix, Mix};

/// Raw currency units in one million.
pub const DOLLARS_PER_MILLION: f64 = 1e6;
/// Raw currency units in one billion.
pub const DOLLARS_PER_BILLION: f64 = 1e9;

/// Adds every delta entry into `production`, creating entries the baseline lacks.
pub fn fold_production(production: &mut GenerationMix, delta: &GenerationDelta) {
    for (source, gwh) in delta.iter() {
        production.add(source, gwh);
    }
}

/// Per-GWh rate of every entry in `table`, taken against `production`.
///
/// Entries that are not positive get a rate of zero.
pub fn derive_rates(table: &Mix, production: &GenerationMix) -> Mix {
    table
        .iter()
        .map(|(source, value)| {
            let rate = if value > 0.0 {
                value / production.value(source)
            } else {
                0.0
            };
            (source, rate)
        })
        .collect()
}

/// Adds `delta[source] * rates[source]` to every entry of `table`.
///
/// A source missing from `delta` contributes nothing.
pub fn apply_rates(table: &mut Mix, delta: &GenerationDelta, rates: &Mix) {
    for (source, rate) in rates.iter() {
        table.add(source, delta.value(source) * rate);
    }
}

/// Folds `delta` into a per-source table using rates derived from `production`.
pub fn fold_table(table: &mut Mix, delta: &GenerationDelta, production: &GenerationMix) {
    let rates = derive_rates(table, production);
    apply_rates(table, delta, &rates);
}

/// Converts operating cost to millions and capital cost to billions.
pub fn normalize(cost: &mut CostMix, capital_cost: &mut CapitalCostMix) {
    cost.divide_all(DOLLARS_PER_MILLION);
    capital_cost.divide_all(DOLLARS_PER_BILLION);
}
