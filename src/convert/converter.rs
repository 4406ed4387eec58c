//! Temperature conversion between Einstein A datasets.
//!
//! For a Boltzmann rotational population the line intensities satisfy
//!
//! ```text
//! ln(I / (A·(2J'+1))) = -(h·c / (k·T)) · F(J') + ln(N / Q_r)
//! ```
//!
//! so a plot of the left side against F(J') is a line with slope
//! `-h·c/(k·T)`. Re-analysing intensities generated with `A_in` as if they
//! had been measured with `A_out` adds `ln(A_in / A_out)` to each point; the
//! slope of the refitted line gives the converted temperature.

use crate::domain::{
    BranchPolicy, ConversionRequest, ConversionResult, LineFit, ModelConstants, ParameterTable,
    ReferenceSource,
};
use crate::error::ConvertError;
use crate::io::DatasetRegistry;
use crate::math::fit_line;

use super::table::build_parameter_table;

/// Everything a conversion needs besides the request itself.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub registry: DatasetRegistry,
    pub constants: ModelConstants,
    pub branch_policy: BranchPolicy,
}

impl ConverterConfig {
    pub fn new(registry: DatasetRegistry) -> Self {
        Self {
            registry,
            constants: ModelConstants::default(),
            branch_policy: BranchPolicy::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TemperatureConverter {
    config: ConverterConfig,
}

impl TemperatureConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Merged parameter table for one source/target pair.
    pub fn parameter_table(
        &self,
        source: ReferenceSource,
        target: ReferenceSource,
    ) -> Result<ParameterTable, ConvertError> {
        build_parameter_table(
            &self.config.registry,
            source,
            target,
            &self.config.constants,
            self.config.branch_policy,
        )
    }

    /// Convert every requested temperature.
    ///
    /// Inputs are validated before any file is read, and the parameter table
    /// is built once for the whole request.
    pub fn convert(&self, request: &ConversionRequest) -> Result<ConversionResult, ConvertError> {
        validate_temperatures(&request.temperatures)?;
        self.config.constants.validate()?;

        let table = self.parameter_table(request.source, request.target)?;
        let result = convert_with_table(&request.temperatures, &table, &self.config.constants)?;

        log::info!(
            "converted {} temperature(s) {} -> {} using {} lines",
            result.temperatures_out.len(),
            request.source,
            request.target,
            result.rows_used
        );
        Ok(result)
    }
}

/// Convenience entry point: one request, one converter.
pub fn convert_temperatures(
    temperatures_in: &[f64],
    source: ReferenceSource,
    target: ReferenceSource,
    config: &ConverterConfig,
) -> Result<ConversionResult, ConvertError> {
    let request = ConversionRequest {
        temperatures: temperatures_in.to_vec(),
        source,
        target,
    };
    TemperatureConverter::new(config.clone()).convert(&request)
}

/// Convert temperatures against an explicit parameter table.
pub fn convert_with_table(
    temperatures_in: &[f64],
    table: &ParameterTable,
    constants: &ModelConstants,
) -> Result<ConversionResult, ConvertError> {
    validate_temperatures(temperatures_in)?;
    if table.len() < 2 {
        return Err(ConvertError::DegenerateFit(format!(
            "parameter table has {} usable line(s), need at least 2",
            table.len()
        )));
    }

    let x: Vec<f64> = table.rows.iter().map(|r| r.fprime).collect();
    let corrections: Vec<f64> = table.rows.iter().map(|r| r.correction()).collect();
    if let Some(pos) = corrections.iter().position(|v| !v.is_finite()) {
        return Err(ConvertError::Numeric(format!(
            "non-finite ln(A_in/A_out) for '{}'",
            table.rows[pos].symbol
        )));
    }

    let c2 = constants.second_radiation_constant();
    let mut temperatures_out = Vec::with_capacity(temperatures_in.len());
    let mut fits = Vec::with_capacity(temperatures_in.len());

    for &t_in in temperatures_in {
        let (t_out, fit) = convert_one(t_in, &x, &corrections, c2, constants.partition)?;
        log::debug!(
            "T_in={t_in:.3} K -> T_out={t_out:.3} K (slope={:.6e}, intercept={:.6})",
            fit.slope,
            fit.intercept
        );
        temperatures_out.push(t_out);
        fits.push(fit);
    }

    Ok(ConversionResult {
        source: table.source,
        target: table.target,
        temperatures_in: temperatures_in.to_vec(),
        temperatures_out,
        fits,
        rows_used: table.len(),
        source_dropped: table.source_dropped,
        target_dropped: table.target_dropped,
    })
}

fn convert_one(
    t_in: f64,
    x: &[f64],
    corrections: &[f64],
    c2: f64,
    partition: f64,
) -> Result<(f64, LineFit), ConvertError> {
    let slope_in = -c2 / t_in;
    let y: Vec<f64> = x
        .iter()
        .zip(corrections)
        .map(|(fprime, corr)| slope_in * fprime + partition + corr)
        .collect();

    let fit = fit_line(x, &y)?;
    if fit.slope == 0.0 || !fit.slope.is_finite() {
        return Err(ConvertError::DegenerateFit(format!(
            "slope {} for T_in={t_in} K",
            fit.slope
        )));
    }

    let t_out = -c2 / fit.slope;
    if !(t_out.is_finite() && t_out > 0.0) {
        return Err(ConvertError::DegenerateFit(format!(
            "converted temperature {t_out} K for T_in={t_in} K is not physical"
        )));
    }

    Ok((t_out, fit))
}

fn validate_temperatures(temperatures: &[f64]) -> Result<(), ConvertError> {
    if temperatures.is_empty() {
        return Err(ConvertError::NoTemperatures);
    }
    if let Some((index, &value)) = temperatures
        .iter()
        .enumerate()
        .find(|(_, t)| !(t.is_finite() && **t > 0.0))
    {
        return Err(ConvertError::NonPositiveTemperature { index, value });
    }
    Ok(())
}
