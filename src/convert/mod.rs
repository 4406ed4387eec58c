//! Einstein A temperature conversion.
//!
//! Responsibilities:
//!
//! - merge source/target datasets into a positional parameter table
//! - refit the Boltzmann line per input temperature and recover `T_out`

pub mod converter;
pub mod table;

pub use converter::*;
pub use table::*;
