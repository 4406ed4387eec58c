//! Shared domain types.
//!
//! These types are kept small and serializable so they can be:
//!
//! - passed between the loader, the table builder and the converter
//! - exported to JSON/CSV
//! - printed by the report module

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Published Einstein A coefficient datasets for the OH(6-2) band.
///
/// The ordinal matches the index used by the tabulated data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceSource {
    /// Mies (1974).
    #[value(name = "mies", alias = "0", alias = "mies1974")]
    Mies1974,
    /// Loo & Groenenboom (2008).
    #[value(name = "lg", alias = "1", alias = "loo-groenenboom")]
    LooGroenenboom2008,
    #[value(name = "lwr", alias = "2")]
    Lwr,
    #[value(name = "gsc", alias = "3")]
    Gsc,
    #[value(name = "tl", alias = "4")]
    Tl,
}

impl ReferenceSource {
    pub const ALL: [ReferenceSource; 5] = [
        ReferenceSource::Mies1974,
        ReferenceSource::LooGroenenboom2008,
        ReferenceSource::Lwr,
        ReferenceSource::Gsc,
        ReferenceSource::Tl,
    ];

    pub fn index(self) -> usize {
        match self {
            ReferenceSource::Mies1974 => 0,
            ReferenceSource::LooGroenenboom2008 => 1,
            ReferenceSource::Lwr => 2,
            ReferenceSource::Gsc => 3,
            ReferenceSource::Tl => 4,
        }
    }

    pub fn from_index(index: usize) -> Result<Self, ConvertError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ConvertError::InvalidReferenceSource(index.to_string()))
    }

    /// Name of the tabulated data file for this source.
    pub fn file_name(self) -> &'static str {
        match self {
            ReferenceSource::Mies1974 => "MIES_QUANT.txt",
            ReferenceSource::LooGroenenboom2008 => "LG_QUANT.txt",
            ReferenceSource::Lwr => "LWR_QUANT.txt",
            ReferenceSource::Gsc => "GSC_QUANT.txt",
            ReferenceSource::Tl => "TL_QUANT.txt",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ReferenceSource::Mies1974 => "Mies 1974",
            ReferenceSource::LooGroenenboom2008 => "Loo & Groenenboom 2008",
            ReferenceSource::Lwr => "LWR",
            ReferenceSource::Gsc => "GSC",
            ReferenceSource::Tl => "TL",
        }
    }
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ReferenceSource {
    type Err = ConvertError;

    /// Accepts an ordinal (`"0"`..`"4"`) or a source name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Self::from_index(index);
        }
        <Self as ValueEnum>::from_str(trimmed, true)
            .map_err(|_| ConvertError::InvalidReferenceSource(trimmed.to_string()))
    }
}

/// One `v2` line from a tabulated dataset file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineRecord {
    pub symbol: String,
    /// Nominal wavelength; display only.
    pub wavelength: i64,
    /// Upper-state rotational quantum number J'.
    pub j_upper: f64,
    pub einstein_a: f64,
    /// 1-based line number in the source file.
    pub line_number: usize,
}

/// Which F-term formula a line uses, taken from the second symbol character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    F1,
    F2,
}

impl Branch {
    /// Decode the branch from a line symbol (e.g. `P1(3.5)` → `F1`).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.chars().nth(1)?.to_digit(10)? {
            1 => Some(Branch::F1),
            2 => Some(Branch::F2),
            _ => None,
        }
    }
}

/// What to do with a line whose symbol encodes neither F1 nor F2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BranchPolicy {
    /// Drop the line, count it and log a warning.
    #[default]
    Drop,
    /// Fail the request.
    Strict,
}

/// One row of the merged source/target parameter table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub symbol: String,
    pub wavelength: i64,
    pub j_upper: f64,
    /// Upper-state rotational term F(J').
    pub fprime: f64,
    pub einstein_a_in: f64,
    pub einstein_a_out: f64,
}

impl ParameterRow {
    /// `ln(A_in / A_out)`, the per-line intensity correction.
    pub fn correction(&self) -> f64 {
        (self.einstein_a_in / self.einstein_a_out).ln()
    }
}

/// Merged table for one (source, target) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterTable {
    pub source: ReferenceSource,
    pub target: ReferenceSource,
    pub rows: Vec<ParameterRow>,
    /// Lines dropped from the source dataset by branch filtering.
    pub source_dropped: usize,
    /// Lines dropped from the target dataset by branch filtering.
    pub target_dropped: usize,
}

impl ParameterTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub temperatures: Vec<f64>,
    pub source: ReferenceSource,
    pub target: ReferenceSource,
}

/// Straight-line fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub source: ReferenceSource,
    pub target: ReferenceSource,
    pub temperatures_in: Vec<f64>,
    /// One converted temperature per input, same order.
    pub temperatures_out: Vec<f64>,
    /// The fit behind each converted temperature.
    pub fits: Vec<LineFit>,
    pub rows_used: usize,
    pub source_dropped: usize,
    pub target_dropped: usize,
}

impl ConversionResult {
    pub fn dropped_lines(&self) -> usize {
        self.source_dropped + self.target_dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_source_parses_ordinals_and_names() {
        assert_eq!("0".parse::<ReferenceSource>().unwrap(), ReferenceSource::Mies1974);
        assert_eq!("1".parse::<ReferenceSource>().unwrap(), ReferenceSource::LooGroenenboom2008);
        assert_eq!("GSC".parse::<ReferenceSource>().unwrap(), ReferenceSource::Gsc);
        assert_eq!("tl".parse::<ReferenceSource>().unwrap(), ReferenceSource::Tl);
        assert!(matches!(
            "5".parse::<ReferenceSource>(),
            Err(ConvertError::InvalidReferenceSource(v)) if v == "5"
        ));
        assert!("hitran".parse::<ReferenceSource>().is_err());
    }

    #[test]
    fn ordinals_round_trip() {
        for source in ReferenceSource::ALL {
            assert_eq!(ReferenceSource::from_index(source.index()).unwrap(), source);
        }
    }

    #[test]
    fn branch_from_second_symbol_character() {
        assert_eq!(Branch::from_symbol("P1(2.5)"), Some(Branch::F1));
        assert_eq!(Branch::from_symbol("Q2e(1.5)"), Some(Branch::F2));
        assert_eq!(Branch::from_symbol("R3(1.5)"), None);
        assert_eq!(Branch::from_symbol("Px"), None);
        assert_eq!(Branch::from_symbol("P"), None);
    }
}
