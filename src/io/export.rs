//! Export conversion results to CSV or JSON.
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream
//! scripts; the JSON keeps the whole result, including fit diagnostics.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::ConversionResult;
use crate::error::ConvertError;

/// Write one row per input temperature to a CSV file.
pub fn write_results_csv(path: &Path, result: &ConversionResult) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    write_results_csv_to(BufWriter::new(file), result).map_err(|e| ConvertError::io(path, e))
}

/// CSV body shared by [`write_results_csv`] and tests.
pub fn write_results_csv_to<W: Write>(mut out: W, result: &ConversionResult) -> std::io::Result<()> {
    writeln!(out, "source,target,t_in_k,t_out_k,delta_k,slope,intercept")?;

    for ((t_in, t_out), fit) in result
        .temperatures_in
        .iter()
        .zip(&result.temperatures_out)
        .zip(&result.fits)
    {
        writeln!(
            out,
            "{},{},{:.6},{:.6},{:.6},{:.10e},{:.10}",
            result.source.index(),
            result.target.index(),
            t_in,
            t_out,
            t_out - t_in,
            fit.slope,
            fit.intercept,
        )?;
    }

    out.flush()
}

/// Write the full result as pretty JSON.
pub fn write_results_json(path: &Path, result: &ConversionResult) -> Result<(), ConvertError> {
    let file = File::create(path).map_err(|e| ConvertError::io(path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), result)
        .map_err(|e| ConvertError::io(path, std::io::Error::other(e)))?;
    Ok(())
}
