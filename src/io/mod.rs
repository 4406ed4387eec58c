//! Input/output helpers.
//!
//! - tabulated Einstein A dataset ingest (`dataset`)
//! - conversion result exports (CSV/JSON) (`export`)

pub mod dataset;
pub mod export;

pub use dataset::*;
pub use export::*;
