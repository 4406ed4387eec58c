//! Merge a source and a target dataset into one parameter table.
//!
//! The two files carry no join key: row `i` of one is assumed to describe the
//! same transition as row `i` of the other. We check that assumption after
//! branch filtering (same count, same symbol, same J') instead of trusting it.

use crate::domain::{
    BranchPolicy, LineRecord, ModelConstants, ParameterRow, ParameterTable, ReferenceSource,
};
use crate::error::ConvertError;
use crate::io::DatasetRegistry;
use crate::spectro::{compute_terms, filter_branches};

const J_TOLERANCE: f64 = 1e-9;

/// Load both datasets from `registry` and merge them.
pub fn build_parameter_table(
    registry: &DatasetRegistry,
    source: ReferenceSource,
    target: ReferenceSource,
    constants: &ModelConstants,
    policy: BranchPolicy,
) -> Result<ParameterTable, ConvertError> {
    let source_lines = registry.load(source)?;
    let target_lines = registry.load(target)?;
    merge_datasets(source, &source_lines, target, &target_lines, constants, policy)
}

/// Merge already-loaded line tables by position.
pub fn merge_datasets(
    source: ReferenceSource,
    source_lines: &[LineRecord],
    target: ReferenceSource,
    target_lines: &[LineRecord],
    constants: &ModelConstants,
    policy: BranchPolicy,
) -> Result<ParameterTable, ConvertError> {
    let terms = compute_terms(source_lines, source.file_name(), constants, policy)?;
    let (target_kept, target_dropped) = filter_branches(target_lines, target.file_name(), policy)?;

    if terms.lines.len() != target_kept.len() {
        return Err(ConvertError::DatasetMismatch {
            source_rows: terms.lines.len(),
            target_rows: target_kept.len(),
            detail: format!(
                "{} and {} list a different number of usable lines",
                source.file_name(),
                target.file_name()
            ),
        });
    }

    let mut rows = Vec::with_capacity(terms.lines.len());
    for ((line, fprime), (other, _)) in terms.lines.iter().zip(&terms.fprime).zip(&target_kept) {
        if line.symbol != other.symbol || (line.j_upper - other.j_upper).abs() > J_TOLERANCE {
            return Err(ConvertError::DatasetMismatch {
                source_rows: terms.lines.len(),
                target_rows: target_kept.len(),
                detail: format!(
                    "{} line {} ('{}', J'={}) does not match {} line {} ('{}', J'={})",
                    source.file_name(),
                    line.line_number,
                    line.symbol,
                    line.j_upper,
                    target.file_name(),
                    other.line_number,
                    other.symbol,
                    other.j_upper
                ),
            });
        }
        if line.wavelength != other.wavelength {
            log::debug!(
                "'{}': wavelength {} in {} vs {} in {}",
                line.symbol,
                line.wavelength,
                source.file_name(),
                other.wavelength,
                target.file_name()
            );
        }

        rows.push(ParameterRow {
            symbol: line.symbol.clone(),
            wavelength: line.wavelength,
            j_upper: line.j_upper,
            fprime: *fprime,
            einstein_a_in: line.einstein_a,
            einstein_a_out: other.einstein_a,
        });
    }

    log::debug!(
        "parameter table {} -> {}: {} rows ({} + {} lines dropped)",
        source,
        target,
        rows.len(),
        terms.dropped,
        target_dropped
    );

    Ok(ParameterTable {
        source,
        target,
        rows,
        source_dropped: terms.dropped,
        target_dropped,
    })
}
