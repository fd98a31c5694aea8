//! Crate-wide error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::mix::levers::Lever;
use crate::mix::types::Category;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the engine, its input boundary, and the export layer.
#[derive(Debug, Error)]
pub enum Error {
    /// A lever value is outside its domain or could not be parsed.
    #[error("invalid lever {lever}: {reason}")]
    InvalidLever { lever: Lever, reason: String },

    /// An input name does not match any lever.
    #[error("unknown lever \"{name}\", expected one of: {expected}")]
    UnknownLever { name: String, expected: String },

    /// The production mix used as reallocation basis sums to zero or a non-finite value.
    #[error("degenerate baseline: total generation is {total} GWh")]
    DegenerateBaseline { total: f64 },

    /// A projected value ended up NaN or infinite.
    #[error("non-finite value in {table} for {category}")]
    NonFinite {
        table: &'static str,
        category: Category,
    },

    /// Scenario configuration failed to load or validate.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
