//! Spectroscopic term values.

pub mod rotational;

pub use rotational::*;
