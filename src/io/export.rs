//! CSV and JSON export for scenario results and lever sweeps.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::mix::levers::Lever;
use crate::mix::sweep::SweepPoint;
use crate::mix::types::ScenarioResult;

/// Column header of the long-form result export.
const RESULT_HEADER: &str = "table,category,value,unit";

/// Columns following the lever column in a sweep export.
const SWEEP_COLUMNS: &str = "emissions_kt,production_gwh,cost_millions,investment_billions,\
                             emissions_change_kt,production_change_gwh,cost_change_millions";

/// Unit of each result table, in [`ScenarioResult::tables`] order.
const TABLE_UNITS: [&str; 5] = ["GWh", "kt_co2e", "million", "billion", "kt_co2e"];

/// Exports a result to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_result_csv(result: &ScenarioResult, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_result_csv(result, io::BufWriter::new(file))
}

/// Writes a result as long-form CSV, one row per table entry.
///
/// Rows follow table order, then category order, so identical results
/// always produce identical output.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_result_csv(result: &ScenarioResult, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(RESULT_HEADER.split(','))?;

    for ((table, mix), unit) in result.tables().into_iter().zip(TABLE_UNITS) {
        for (category, value) in mix.iter() {
            let value = format!("{value:.6}");
            wtr.write_record([table, category.name(), value.as_str(), unit])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a sweep to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_sweep_csv(points: &[SweepPoint], lever: Lever, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    write_sweep_csv(points, lever, io::BufWriter::new(file))
}

/// Writes one row of headline totals per sweep point.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_sweep_csv(points: &[SweepPoint], lever: Lever, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    let header = std::iter::once(lever.name()).chain(SWEEP_COLUMNS.split(',').map(str::trim));
    wtr.write_record(header)?;

    for p in points {
        let s = &p.summary;
        wtr.write_record(&[
            format!("{}", p.value),
            format!("{:.4}", s.emissions_kt),
            format!("{:.4}", s.production_gwh),
            format!("{:.4}", s.cost_millions),
            format!("{:.6}", s.investment_billions),
            format!("{:.4}", s.emissions_change_kt),
            format!("{:.4}", s.production_change_gwh),
            format!("{:.4}", s.cost_change_millions),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a result as pretty-printed JSON keyed `gen_production`, `gen_emissions`, ...
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(result: &ScenarioResult, mut writer: impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, result)?;
    writeln!(writer)?;
    Ok(())
}
