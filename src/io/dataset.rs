//! Tabulated Einstein A dataset ingest.
//!
//! Each reference source ships as a plain-text file of Pascal-style record
//! lines. Only the `v2` transition lines matter here; a data line looks like:
//!
//! ```text
//! 8399: (v1:=6; v2:=2; J1:=2.5; J2:=1.5; A:=3.6290E+0000; symbol:='P1(2.5)';);
//! ```
//!
//! Rules, applied to every physical line in order:
//! - `//` comment lines are skipped
//! - indented (continuation) lines are skipped
//! - lines without `v2` are skipped
//! - everything else must carry the wavelength, `J2:=`, `A:=` and `symbol:='...'`
//!
//! A data line missing any of those fails the whole load with its line number.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{LineRecord, ReferenceSource};
use crate::error::ConvertError;

/// Environment variable naming the directory holding the dataset files.
pub const DATA_DIR_ENV: &str = "OH_EINSTEIN_DATA_DIR";
/// Directory used when neither a flag nor the environment names one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Resolves reference sources to dataset files under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRegistry {
    data_dir: PathBuf,
}

impl DatasetRegistry {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Registry rooted at `OH_EINSTEIN_DATA_DIR` (a `.env` file is honoured),
    /// falling back to `./data`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let dir = std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string());
        Self::new(dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, source: ReferenceSource) -> PathBuf {
        self.data_dir.join(source.file_name())
    }

    pub fn load(&self, source: ReferenceSource) -> Result<Vec<LineRecord>, ConvertError> {
        load_dataset(&self.path_for(source))
    }
}

/// Read and parse one dataset file.
pub fn load_dataset(path: &Path) -> Result<Vec<LineRecord>, ConvertError> {
    let text = fs::read_to_string(path).map_err(|e| ConvertError::io(path, e))?;
    let records = parse_dataset(&text, &path.display().to_string())?;
    log::debug!("read {} v2 lines from {}", records.len(), path.display());
    Ok(records)
}

/// Parse dataset text. `label` names the input in error messages.
pub fn parse_dataset(text: &str, label: &str) -> Result<Vec<LineRecord>, ConvertError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;

        if line.starts_with("//") || line.starts_with(char::is_whitespace) || !line.contains("v2") {
            continue;
        }

        let record = parse_line(line, line_number)
            .map_err(|reason| ConvertError::parse(label, line_number, reason))?;
        records.push(record);
    }

    Ok(records)
}

fn parse_line(line: &str, line_number: usize) -> Result<LineRecord, String> {
    let (head, _) = line
        .split_once(':')
        .ok_or_else(|| "missing leading '<wavelength>:' token".to_string())?;
    let wavelength = head
        .trim()
        .parse::<i64>()
        .map_err(|e| format!("invalid wavelength '{}': {e}", head.trim()))?;

    let j_upper = parse_float_field(line, "J2:=")?;
    let einstein_a = parse_float_field(line, "A:=")?;
    if einstein_a <= 0.0 {
        return Err(format!("Einstein A must be > 0 (got {einstein_a})"));
    }

    let symbol = field_value(line, "symbol:='", "';")
        .ok_or_else(|| "missing field symbol:='...'".to_string())?
        .trim()
        .to_string();

    Ok(LineRecord {
        symbol,
        wavelength,
        j_upper,
        einstein_a,
        line_number,
    })
}

/// Text between the first `key` and the following `terminator`.
///
/// A missing terminator takes the rest of the line.
fn field_value<'a>(line: &'a str, key: &str, terminator: &str) -> Option<&'a str> {
    let start = line.find(key)? + key.len();
    let rest = &line[start..];
    Some(rest.find(terminator).map_or(rest, |end| &rest[..end]))
}

fn parse_float_field(line: &str, key: &str) -> Result<f64, String> {
    let raw = field_value(line, key, ";")
        .ok_or_else(|| format!("missing field {key}<value>;"))?
        .trim();
    let value = raw
        .parse::<f64>()
        .map_err(|e| format!("invalid {key} value '{raw}': {e}"))?;
    if !value.is_finite() {
        return Err(format!("{key} value '{raw}' is not finite"));
    }
    Ok(value)
}
