//! Upper-state rotational term values F(J') for the OH X²Π state.
//!
//! Hill–Van Vleck form with centrifugal distortion, in m^-1:
//!
//! ```text
//! F(J') = 100 * ( B * ((J'+½)² - 1 ∓ ½·sqrt(4(J'+½)² + Y(Y-4))) - D·J'⁴ )
//! ```
//!
//! The minus sign gives the F1 ladder, the plus sign F2.

use crate::domain::{Branch, BranchPolicy, LineRecord, ModelConstants};
use crate::error::ConvertError;

/// Lines that survived branch filtering, with their term values.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationalTerms {
    /// Retained records, in input order.
    pub lines: Vec<LineRecord>,
    /// `fprime[i]` belongs to `lines[i]`.
    pub fprime: Vec<f64>,
    pub dropped: usize,
}

/// Term value for one line.
pub fn fprime(j_upper: f64, branch: Branch, constants: &ModelConstants) -> f64 {
    let ModelConstants { b, d, y, .. } = *constants;
    let half = j_upper + 0.5;
    let root = 0.5 * (4.0 * half * half + y * (y - 4.0)).sqrt();
    let split = match branch {
        Branch::F1 => -root,
        Branch::F2 => root,
    };
    100.0 * (b * (half * half - 1.0 + split) - d * j_upper.powi(4))
}

/// Keep the lines with a recognised branch code.
///
/// Under [`BranchPolicy::Drop`] the other lines are counted and logged; under
/// [`BranchPolicy::Strict`] the first one fails the call.
pub fn filter_branches(
    lines: &[LineRecord],
    label: &str,
    policy: BranchPolicy,
) -> Result<(Vec<(LineRecord, Branch)>, usize), ConvertError> {
    let mut kept = Vec::with_capacity(lines.len());
    let mut dropped = 0usize;

    for line in lines {
        match Branch::from_symbol(&line.symbol) {
            Some(branch) => kept.push((line.clone(), branch)),
            None if policy == BranchPolicy::Strict => {
                return Err(ConvertError::UnrecognizedBranch {
                    file: label.to_string(),
                    line_number: line.line_number,
                    symbol: line.symbol.clone(),
                });
            }
            None => {
                log::debug!(
                    "{label}: dropping line {} (symbol '{}' has no F1/F2 branch code)",
                    line.line_number,
                    line.symbol
                );
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        log::warn!("{label}: dropped {dropped} of {} lines with unrecognised branch codes", lines.len());
    }

    Ok((kept, dropped))
}

/// Filter `lines` by branch and compute F(J') for each survivor.
pub fn compute_terms(
    lines: &[LineRecord],
    label: &str,
    constants: &ModelConstants,
    policy: BranchPolicy,
) -> Result<RotationalTerms, ConvertError> {
    let (kept, dropped) = filter_branches(lines, label, policy)?;

    let mut out_lines = Vec::with_capacity(kept.len());
    let mut out_fprime = Vec::with_capacity(kept.len());
    for (line, branch) in kept {
        let value = fprime(line.j_upper, branch, constants);
        if !value.is_finite() {
            return Err(ConvertError::Numeric(format!(
                "{label}: non-finite rotational term for symbol '{}' (J'={}, line {})",
                line.symbol, line.j_upper, line.line_number
            )));
        }
        out_lines.push(line);
        out_fprime.push(value);
    }

    Ok(RotationalTerms {
        lines: out_lines,
        fprime: out_fprime,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(symbol: &str, j_upper: f64, line_number: usize) -> LineRecord {
        LineRecord {
            symbol: symbol.to_string(),
            wavelength: 8400,
            j_upper,
            einstein_a: 1.0,
            line_number,
        }
    }

    #[test]
    fn f1_matches_hand_computation() {
        let c = ModelConstants::default();
        // J' = 1.5 gives (J'+½)² = 4
        let yy = -9.795f64 * (-9.795 - 4.0);
        let root = 0.5 * (16.0 + yy).sqrt();
        let expected = 100.0 * (14.349 * (4.0 - 1.0 - root) - 0.0018 * 1.5f64.powi(4));
        assert!((fprime(1.5, Branch::F1, &c) - expected).abs() < 1e-9);
    }

    #[test]
    fn f2_lies_above_f1() {
        let c = ModelConstants::default();
        for j in [0.5, 1.5, 2.5, 5.5] {
            assert!(fprime(j, Branch::F2, &c) > fprime(j, Branch::F1, &c));
        }
    }

    #[test]
    fn f1_increases_with_j() {
        let c = ModelConstants::default();
        let a = fprime(1.5, Branch::F1, &c);
        let b = fprime(2.5, Branch::F1, &c);
        let d = fprime(3.5, Branch::F1, &c);
        assert!(a < b && b < d);
    }

    #[test]
    fn drop_policy_keeps_terms_dense() {
        let c = ModelConstants::default();
        let lines = vec![line("P1(2.5)", 1.5, 1), line("Q3(1.5)", 1.5, 2), line("P2(3.5)", 2.5, 3)];

        let terms = compute_terms(&lines, "t", &c, BranchPolicy::Drop).unwrap();
        assert_eq!(terms.dropped, 1);
        assert_eq!(terms.lines.len(), 2);
        assert_eq!(terms.fprime.len(), 2);
        assert_eq!(terms.lines[1].symbol, "P2(3.5)");
        assert_eq!(terms.fprime[1], fprime(2.5, Branch::F2, &c));
    }

    #[test]
    fn strict_policy_fails_on_unknown_branch() {
        let c = ModelConstants::default();
        let lines = vec![line("P1(2.5)", 1.5, 1), line("R", 1.5, 7)];

        let err = compute_terms(&lines, "MIES_QUANT.txt", &c, BranchPolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnrecognizedBranch { line_number: 7, ref symbol, .. } if symbol == "R"
        ));
    }

    #[test]
    fn single_branch_datasets_are_usable() {
        let c = ModelConstants::default();
        let f1_only = vec![line("P1(2.5)", 1.5, 1), line("P1(3.5)", 2.5, 2)];
        let f2_only = vec![line("P2(2.5)", 1.5, 1), line("P2(3.5)", 2.5, 2)];

        for lines in [f1_only, f2_only] {
            let terms = compute_terms(&lines, "t", &c, BranchPolicy::Strict).unwrap();
            assert_eq!(terms.fprime.len(), 2);
            assert_eq!(terms.dropped, 0);
        }
    }
}
