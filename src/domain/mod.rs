//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the Einstein A reference sources (`ReferenceSource`)
//! - dataset lines and the merged parameter table (`LineRecord`, `ParameterTable`)
//! - conversion requests and results
//! - the model constant set (`ModelConstants`)

pub mod constants;
pub mod types;

pub use constants::*;
pub use types::*;
