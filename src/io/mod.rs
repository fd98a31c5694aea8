/// CSV and JSON export of projections and sweeps.
pub mod export;
