//! Shared conversion pipeline used by the CLI commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve config -> load datasets -> merge table -> convert -> export

use std::path::Path;

use crate::cli::{ConvertArgs, DataArgs, ModelArgs};
use crate::convert::{ConverterConfig, TemperatureConverter};
use crate::domain::{ConversionRequest, ConversionResult, ModelConstants, ParameterTable};
use crate::error::ConvertError;
use crate::io::DatasetRegistry;

/// Data directory from `--data-dir`, else the environment / default.
pub fn registry_from_args(args: &DataArgs) -> DatasetRegistry {
    match &args.data_dir {
        Some(dir) => DatasetRegistry::new(dir),
        None => DatasetRegistry::from_env(),
    }
}

pub fn load_constants(path: Option<&Path>) -> Result<ModelConstants, ConvertError> {
    match path {
        Some(path) => {
            let constants = ModelConstants::from_json_file(path)?;
            log::info!("using model constants from {}", path.display());
            Ok(constants)
        }
        None => Ok(ModelConstants::default()),
    }
}

pub fn converter_config_from_args(args: &ModelArgs) -> Result<ConverterConfig, ConvertError> {
    Ok(ConverterConfig {
        registry: registry_from_args(&args.data),
        constants: load_constants(args.constants.as_deref())?,
        branch_policy: args.branch_policy(),
    })
}

/// Run a conversion and write the optional exports.
pub fn run_convert(args: &ConvertArgs) -> Result<ConversionResult, ConvertError> {
    let config = converter_config_from_args(&args.model)?;
    let converter = TemperatureConverter::new(config);

    let request = ConversionRequest {
        temperatures: args.temperatures.clone(),
        source: args.model.source,
        target: args.model.target,
    };
    let result = converter.convert(&request)?;

    if let Some(path) = &args.export {
        crate::io::write_results_csv(path, &result)?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = &args.json {
        crate::io::write_results_json(path, &result)?;
        log::info!("wrote {}", path.display());
    }

    Ok(result)
}

pub fn run_table(args: &ModelArgs) -> Result<ParameterTable, ConvertError> {
    let config = converter_config_from_args(args)?;
    TemperatureConverter::new(config).parameter_table(args.source, args.target)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cli::{Cli, Command};
    use crate::domain::ReferenceSource;
    use clap::Parser;

    const DATA: &str = "\
8399: (v1:=6; v2:=2; J2:=1.5; A:=3.6290E+0000; symbol:='P1(2.5)';);
8430: (v1:=6; v2:=2; J2:=2.5; A:=4.5010E+0000; symbol:='P1(3.5)';);
8418: (v1:=6; v2:=2; J2:=1.5; A:=2.1000E+0000; symbol:='P2(2.5)';);
";

    fn convert_args(argv: &[&str]) -> ConvertArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Convert(args) => args,
            other => panic!("expected convert, got {other:?}"),
        }
    }

    #[test]
    fn convert_writes_both_exports() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(ReferenceSource::Gsc.file_name()), DATA).unwrap();
        let csv = dir.path().join("out.csv");
        let json = dir.path().join("out.json");

        let data_dir = dir.path().to_str().unwrap();
        let csv_arg = csv.to_str().unwrap();
        let json_arg = json.to_str().unwrap();
        let args = convert_args(&[
            "ohconv", "convert", "200", "250", "-f", "gsc", "-t", "gsc", "--data-dir", data_dir, "--export", csv_arg,
            "--json", json_arg,
        ]);

        let result = run_convert(&args).unwrap();
        assert!((result.temperatures_out[1] - 250.0).abs() < 1e-6);
        assert_eq!(fs::read_to_string(&csv).unwrap().lines().count(), 3);
        assert!(json.is_file());
    }

    #[test]
    fn negative_temperature_reaches_validation() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        let args = convert_args(&["ohconv", "convert", "-20", "-f", "0", "-t", "1", "--data-dir", data_dir]);

        let err = run_convert(&args).unwrap_err();
        assert!(matches!(err, ConvertError::NonPositiveTemperature { index: 0, .. }));
    }

    #[test]
    fn missing_constants_file_is_an_io_error() {
        let err = load_constants(Some(Path::new("/nonexistent/constants.json"))).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}
