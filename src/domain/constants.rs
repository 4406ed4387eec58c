//! Physical and molecular constants used by the conversion model.
//!
//! The defaults describe the OH v'=6 upper level. An alternate set (for a
//! different vibrational level, say) can be loaded from JSON without code
//! changes.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Planck constant (J·s).
pub const PLANCK: f64 = 6.62607015e-34;
/// Speed of light in vacuum (m/s).
pub const SPEED_OF_LIGHT: f64 = 2.99792458e8;
/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Immutable constant set passed explicitly to the converter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelConstants {
    pub h: f64,
    pub c: f64,
    pub k: f64,
    /// Partition term `ln(N / Q_r)`.
    pub partition: f64,
    /// Spin-orbit coupling parameter Y = A/B.
    pub y: f64,
    /// Centrifugal distortion constant (cm^-1).
    pub d: f64,
    /// Rotational constant (cm^-1).
    pub b: f64,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            h: PLANCK,
            c: SPEED_OF_LIGHT,
            k: BOLTZMANN,
            partition: 6.30163002356721,
            y: -9.795,
            d: 0.0018,
            b: 14.349,
        }
    }
}

impl ModelConstants {
    /// `h*c/k` in m·K; the scale between a Boltzmann slope and a temperature.
    pub fn second_radiation_constant(&self) -> f64 {
        self.h * self.c / self.k
    }

    /// Reject sets that cannot produce a meaningful slope.
    pub fn validate(&self) -> Result<(), ConvertError> {
        let named = [
            ("h", self.h),
            ("c", self.c),
            ("k", self.k),
            ("partition", self.partition),
            ("y", self.y),
            ("d", self.d),
            ("b", self.b),
        ];
        if let Some((name, value)) = named.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConvertError::Constants(format!("{name} is not finite ({value})")));
        }
        if self.h <= 0.0 || self.c <= 0.0 || self.k <= 0.0 {
            return Err(ConvertError::Constants("h, c and k must be > 0".to_string()));
        }
        Ok(())
    }

    /// Load a constant set from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConvertError> {
        let file = File::open(path).map_err(|e| ConvertError::io(path, e))?;
        let constants: ModelConstants = serde_json::from_reader(file)
            .map_err(|e| ConvertError::Constants(format!("'{}': {e}", path.display())))?;
        constants.validate()?;
        Ok(constants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let c = ModelConstants::default();
        c.validate().unwrap();
        assert!((c.second_radiation_constant() - 1.438776877e-2).abs() < 1e-10);
    }

    #[test]
    fn loads_constants_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let alt = ModelConstants {
            b: 15.0,
            ..ModelConstants::default()
        };
        write!(file, "{}", serde_json::to_string(&alt).unwrap()).unwrap();

        let loaded = ModelConstants::from_json_file(file.path()).unwrap();
        assert_eq!(loaded, alt);
    }

    #[test]
    fn rejects_non_positive_boltzmann() {
        let bad = ModelConstants {
            k: 0.0,
            ..ModelConstants::default()
        };
        assert!(matches!(bad.validate(), Err(ConvertError::Constants(_))));
    }
}
