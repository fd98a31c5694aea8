//! Proportional demand reallocation across generation sources.

use tracing::trace;

use super::types::{Category, GenerationDelta, GenerationMix};
use crate::error::{Error, Result};

/// Returns the total generation of `production`.
///
/// # Errors
///
/// Returns [`Error::DegenerateBaseline`] if the total is zero or not finite,
/// since every proportional share would then be NaN or infinite.
pub fn total_generation(production: &GenerationMix) -> Result<f64> {
    let total = production.total();
    if total == 0.0 || !total.is_finite() {
        return Err(Error::DegenerateBaseline { total });
    }
    Ok(total)
}

/// Spreads a demand change across every non-exempt source of `production`.
///
/// Each source gives up `production[source] * amount / total`, where `total`
/// is the sum of `production`. A positive `amount` offsets demand (existing
/// generation shrinks); a negative `amount` is new demand (generation
/// grows). Entries missing from `delta` are created.
///
/// `production` is the apportionment basis and must be the baseline mix,
/// not a mix already adjusted by earlier stages.
///
/// # Errors
///
/// Returns [`Error::DegenerateBaseline`] when `production` sums to zero.
pub fn reallocate(
    mut delta: GenerationDelta,
    production: &GenerationMix,
    amount: f64,
    exempt: &[Category],
) -> Result<GenerationDelta> {
    let share = amount / total_generation(production)?;
    for (source, gwh) in production.iter() {
        if exempt.contains(&source) {
            continue;
        }
        delta.subtract(source, gwh * share);
    }
    trace!(amount, share, ?exempt, "reallocated demand");
    Ok(delta)
}
