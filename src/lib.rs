//! `oh-temp-convert` library crate.
//!
//! Converts OH(6-2) rotational temperatures between published Einstein A
//! coefficient sets by refitting the Boltzmann plot.
//!
//! The binary (`ohconv`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the converter can be embedded in other analysis tools

pub mod app;
pub mod cli;
pub mod convert;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod report;
pub mod spectro;

pub use convert::{ConverterConfig, TemperatureConverter, convert_temperatures};
pub use domain::{ConversionRequest, ConversionResult, ModelConstants, ReferenceSource};
pub use error::ConvertError;
