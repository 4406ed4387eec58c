//! Command-line parsing for the Einstein A temperature converter.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the conversion code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BranchPolicy, ReferenceSource};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "ohconv",
    version,
    about = "Convert OH(6-2) rotational temperatures between Einstein A coefficient sets"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert one or more temperatures from one Einstein A source to another.
    Convert(ConvertArgs),
    /// Print the merged parameter table for a source/target pair.
    Table(TableArgs),
    /// List the known Einstein A reference sources and their data files.
    Sources(DataArgs),
    /// Print the model constants (defaults, or a `--constants` file).
    Constants(ConstantsArgs),
}

/// Options shared by every command that reads dataset files.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Directory holding MIES_QUANT.txt, LG_QUANT.txt, ...
    ///
    /// Falls back to $OH_EINSTEIN_DATA_DIR, then ./data.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

/// Options shared by commands that build a parameter table.
#[derive(Debug, Args, Clone)]
pub struct ModelArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Einstein A source the input temperatures were derived with (0-4 or name).
    #[arg(short = 'f', long = "from", value_enum)]
    pub source: ReferenceSource,

    /// Einstein A source to convert to (0-4 or name).
    #[arg(short = 't', long = "to", value_enum)]
    pub target: ReferenceSource,

    /// JSON file with an alternate constant set (see `ohconv constants`).
    #[arg(long, value_name = "JSON")]
    pub constants: Option<PathBuf>,

    /// Fail on lines whose symbol has no F1/F2 branch code instead of dropping them.
    #[arg(long)]
    pub strict: bool,
}

impl ModelArgs {
    pub fn branch_policy(&self) -> BranchPolicy {
        if self.strict {
            BranchPolicy::Strict
        } else {
            BranchPolicy::Drop
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ConvertArgs {
    /// Input temperatures in Kelvin.
    #[arg(required = true, num_args = 1.., allow_negative_numbers = true, value_name = "KELVIN")]
    pub temperatures: Vec<f64>,

    #[command(flatten)]
    pub model: ModelArgs,

    /// Print only the converted temperatures, one per line.
    #[arg(short, long)]
    pub quiet: bool,

    /// Export per-temperature results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full conversion result to JSON.
    #[arg(long, value_name = "JSON")]
    pub json: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TableArgs {
    #[command(flatten)]
    pub model: ModelArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ConstantsArgs {
    /// Show this constant file instead of the defaults (validates it too).
    #[arg(long, value_name = "JSON")]
    pub constants: Option<PathBuf>,

    /// Print as JSON, ready to edit and pass back via `--constants`.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_convert_with_ordinals() {
        let cli = Cli::try_parse_from(["ohconv", "convert", "198.5", "210", "--from", "0", "--to", "1"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.temperatures, vec![198.5, 210.0]);
        assert_eq!(args.model.source, ReferenceSource::Mies1974);
        assert_eq!(args.model.target, ReferenceSource::LooGroenenboom2008);
        assert_eq!(args.model.branch_policy(), BranchPolicy::Drop);
    }

    #[test]
    fn parses_table_with_names_and_strict() {
        let cli = Cli::try_parse_from([
            "ohconv", "table", "-f", "gsc", "-t", "tl", "--strict", "--data-dir", "/tmp/oh",
        ])
        .unwrap();
        let Command::Table(args) = cli.command else {
            panic!("expected table");
        };
        assert_eq!(args.model.source, ReferenceSource::Gsc);
        assert_eq!(args.model.target, ReferenceSource::Tl);
        assert_eq!(args.model.branch_policy(), BranchPolicy::Strict);
        assert_eq!(args.model.data.data_dir, Some(PathBuf::from("/tmp/oh")));
    }

    #[test]
    fn rejects_unknown_source_and_missing_temperatures() {
        assert!(Cli::try_parse_from(["ohconv", "convert", "200", "--from", "7", "--to", "1"]).is_err());
        assert!(Cli::try_parse_from(["ohconv", "convert", "--from", "0", "--to", "1"]).is_err());
    }
}
