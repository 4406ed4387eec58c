//! Mathematical utilities: least squares and straight-line fits.

pub mod ols;

pub use ols::*;
