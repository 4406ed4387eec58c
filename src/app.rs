//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - resolves the data directory and model constants
//! - runs the conversion pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, ConstantsArgs, ConvertArgs, DataArgs, TableArgs};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ohconv` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Convert(args) => handle_convert(args),
        Command::Table(args) => handle_table(args),
        Command::Sources(args) => handle_sources(args),
        Command::Constants(args) => handle_constants(args),
    }
}

fn handle_convert(args: ConvertArgs) -> Result<(), AppError> {
    let result = pipeline::run_convert(&args)?;

    if args.quiet {
        println!("{}", crate::report::format_temperatures(&result));
    } else {
        println!("{}", crate::report::format_conversion_summary(&result));
    }

    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let table = pipeline::run_table(&args.model)?;
    println!("{}", crate::report::format_parameter_table(&table));
    Ok(())
}

fn handle_sources(args: DataArgs) -> Result<(), AppError> {
    let registry = pipeline::registry_from_args(&args);
    println!("{}", crate::report::format_sources(&registry));
    Ok(())
}

fn handle_constants(args: ConstantsArgs) -> Result<(), AppError> {
    let constants = pipeline::load_constants(args.constants.as_deref())?;
    if !args.json {
        print!("{}", crate::report::format_constants(&constants));
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&constants)
        .map_err(|e| AppError::new(2, format!("Failed to serialize constants: {e}")))?;
    println!("{json}");
    Ok(())
}
