//! Error types.
//!
//! The library reports failures through [`ConvertError`]; the `ohconv` binary
//! wraps those into [`AppError`], which also carries the process exit code.
//!
//! Exit codes:
//! - `2`: I/O, configuration or dataset problems
//! - `3`: invalid request input (temperatures, source identifiers)
//! - `4`: numerical failure (degenerate fit, non-finite terms)

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading datasets or converting temperatures.
///
/// Every variant is fatal to the conversion request that produced it.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A data line is missing a required field or a number failed to parse.
    #[error("failed to parse dataset '{file}' at line {line_number}: {reason}")]
    DatasetParse {
        file: String,
        line_number: usize,
        reason: String,
    },

    /// Source and target line tables cannot be aligned by position.
    #[error(
        "source and target datasets do not align ({source_rows} vs {target_rows} usable lines): {detail}"
    )]
    DatasetMismatch {
        source_rows: usize,
        target_rows: usize,
        detail: String,
    },

    /// The straight-line fit could not produce a usable slope.
    #[error("degenerate fit: {0}")]
    DegenerateFit(String),

    /// An identifier outside the known set of reference sources.
    #[error("unknown Einstein A reference source '{0}' (expected 0-4 or a source name)")]
    InvalidReferenceSource(String),

    #[error("input temperature #{index} must be a finite value > 0 K (got {value})")]
    NonPositiveTemperature { index: usize, value: f64 },

    #[error("no input temperatures supplied")]
    NoTemperatures,

    /// Raised in strict branch mode when a symbol encodes neither F1 nor F2.
    #[error("unrecognised branch in symbol '{symbol}' ({file}, line {line_number})")]
    UnrecognizedBranch {
        file: String,
        line_number: usize,
        symbol: String,
    },

    #[error("numeric error: {0}")]
    Numeric(String),

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model constants: {0}")]
    Constants(String),
}

impl ConvertError {
    pub fn parse(file: impl Into<String>, line_number: usize, reason: impl Into<String>) -> Self {
        Self::DatasetParse {
            file: file.into(),
            line_number,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Process exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DatasetParse { .. }
            | Self::DatasetMismatch { .. }
            | Self::UnrecognizedBranch { .. }
            | Self::Io { .. }
            | Self::Constants(_) => 2,
            Self::InvalidReferenceSource(_) | Self::NonPositiveTemperature { .. } | Self::NoTemperatures => 3,
            Self::DegenerateFit(_) | Self::Numeric(_) => 4,
        }
    }
}

/// Error surfaced by the `ohconv` binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<ConvertError> for AppError {
    fn from(err: ConvertError) -> Self {
        Self::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_error_category() {
        assert_eq!(ConvertError::parse("x", 3, "missing A").exit_code(), 2);
        assert_eq!(ConvertError::NoTemperatures.exit_code(), 3);
        assert_eq!(ConvertError::DegenerateFit("flat".into()).exit_code(), 4);

        let app: AppError = ConvertError::InvalidReferenceSource("9".into()).into();
        assert_eq!(app.exit_code(), 3);
        assert!(app.to_string().contains("'9'"));
    }
}
