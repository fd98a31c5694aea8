//! National energy-mix "what-if" calculator.
//!
//! Projects electricity generation, emissions, operating cost and capital
//! cost under five policy levers, starting from a fixed reference year.

pub mod config;
pub mod error;
pub mod io;
pub mod mix;

pub use error::{Error, Result};
pub use mix::engine::{Engine, run};
pub use mix::levers::{Lever, LeverPolicy, ScenarioInputs};
pub use mix::types::{Category, Mix, ScenarioResult};
