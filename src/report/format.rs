//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the conversion code stays clean and testable
//! - output changes are localized

use crate::domain::{ConversionResult, ModelConstants, ParameterTable, ReferenceSource};
use crate::io::DatasetRegistry;

/// Summary of one conversion: header, line counts and the temperature table.
pub fn format_conversion_summary(result: &ConversionResult) -> String {
    let mut out = String::new();

    out.push_str("=== OH(6-2) Einstein A temperature conversion ===\n");
    out.push_str(&format!(
        "From: {} ({})\n",
        result.source,
        result.source.file_name()
    ));
    out.push_str(&format!(
        "To:   {} ({})\n",
        result.target,
        result.target.file_name()
    ));
    out.push_str(&format!("Lines: n={}", result.rows_used));
    if result.dropped_lines() > 0 {
        out.push_str(&format!(
            " | dropped: {} source, {} target (unrecognised branch)",
            result.source_dropped, result.target_dropped
        ));
    }
    out.push_str("\n\n");

    out.push_str(&header_line(&[("T_in [K]", 12), ("T_out [K]", 12), ("dT [K]", 10), ("slope", 14)]));
    for ((t_in, t_out), fit) in result
        .temperatures_in
        .iter()
        .zip(&result.temperatures_out)
        .zip(&result.fits)
    {
        out.push_str(
            format!(
                "{:>12.3} {:>12.3} {:>10.3} {:>14.6e}\n",
                t_in,
                t_out,
                t_out - t_in,
                fit.slope
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Converted temperatures only, one per line (useful for scripting).
pub fn format_temperatures(result: &ConversionResult) -> String {
    result
        .temperatures_out
        .iter()
        .map(|t| format!("{t:.6}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The merged source/target table.
pub fn format_parameter_table(table: &ParameterTable) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Parameter table: {} -> {} ({} lines)\n",
        table.source,
        table.target,
        table.len()
    ));

    out.push_str(&header_line(&[
        ("symbol", 12),
        ("wl", 6),
        ("J'", 6),
        ("F' [m^-1]", 12),
        ("A_in", 12),
        ("A_out", 12),
        ("ln(Ain/Aout)", 13),
    ]));
    for row in &table.rows {
        out.push_str(
            format!(
                "{:>12} {:>6} {:>6.1} {:>12.3} {:>12.5e} {:>12.5e} {:>13.6}\n",
                truncate(&row.symbol, 12),
                row.wavelength,
                row.j_upper,
                row.fprime,
                row.einstein_a_in,
                row.einstein_a_out,
                row.correction()
            )
            .trim_end(),
        );
        out.push('\n');
    }

    if table.source_dropped + table.target_dropped > 0 {
        out.push_str(&format!(
            "(dropped {} source and {} target lines with unrecognised branch codes)\n",
            table.source_dropped, table.target_dropped
        ));
    }

    out
}

/// Known reference sources and whether their files are present.
pub fn format_sources(registry: &DatasetRegistry) -> String {
    let mut out = String::new();
    out.push_str(&format!("Data directory: {}\n", registry.data_dir().display()));
    out.push_str(&header_line(&[("#", 2), ("name", 5), ("source", 24), ("file", 16), ("status", 7)]));

    for source in ReferenceSource::ALL {
        let status = if registry.path_for(source).is_file() {
            "found"
        } else {
            "missing"
        };
        out.push_str(&format!(
            "{:>2} {:<5} {:<24} {:<16} {}\n",
            source.index(),
            source_cli_name(source),
            source.display_name(),
            source.file_name(),
            status
        ));
    }

    out
}

pub fn format_constants(constants: &ModelConstants) -> String {
    let mut out = String::new();
    out.push_str(&format!("h         = {:e} J s\n", constants.h));
    out.push_str(&format!("c         = {:e} m/s\n", constants.c));
    out.push_str(&format!("k         = {:e} J/K\n", constants.k));
    out.push_str(&format!("partition = {}\n", constants.partition));
    out.push_str(&format!("Y         = {}\n", constants.y));
    out.push_str(&format!("D         = {} cm^-1\n", constants.d));
    out.push_str(&format!("B         = {} cm^-1\n", constants.b));
    out
}

fn source_cli_name(source: ReferenceSource) -> &'static str {
    match source {
        ReferenceSource::Mies1974 => "mies",
        ReferenceSource::LooGroenenboom2008 => "lg",
        ReferenceSource::Lwr => "lwr",
        ReferenceSource::Gsc => "gsc",
        ReferenceSource::Tl => "tl",
    }
}

fn header_line(columns: &[(&str, usize)]) -> String {
    let names: Vec<String> = columns.iter().map(|&(name, w)| format!("{name:>w$}")).collect();
    let rules: Vec<String> = columns.iter().map(|&(_, w)| "-".repeat(w)).collect();
    format!("{}\n{}\n", names.join(" "), rules.join(" "))
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('.');
    out
}
