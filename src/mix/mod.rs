//! Scenario-diffusion engine and its data model.

pub mod assumptions;
pub mod baseline;
pub mod engine;
pub mod fold;
pub mod levers;
pub mod reallocate;
pub mod stages;
pub mod summary;
pub mod sweep;
pub mod types;
