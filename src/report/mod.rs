//! Reporting utilities: terminal tables for conversions, parameter tables,
//! reference sources and model constants.

pub mod format;

pub use format::*;
