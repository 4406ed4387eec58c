//! Ordinary least squares.
//!
//! The converter solves one tiny regression per input temperature:
//!
//! ```text
//! minimize Σ (y_i - (β0 + β1·x_i))^2
//! ```
//!
//! Implementation choices:
//! - SVD solve, so tall design matrices (many lines, two columns) are handled
//!   without forming the normal equations.
//! - `x` is centred before solving; term values sit in the thousands of m^-1
//!   and centring keeps the design matrix well conditioned. The intercept is
//!   shifted back afterwards.

use nalgebra::{DMatrix, DVector};

use crate::domain::LineFit;
use crate::error::ConvertError;

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Fit a straight line through `(x_i, y_i)`.
///
/// Needs at least two distinct `x` values.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit, ConvertError> {
    if x.len() != y.len() {
        return Err(ConvertError::Numeric(format!(
            "x and y lengths differ ({} vs {})",
            x.len(),
            y.len()
        )));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(ConvertError::DegenerateFit("non-finite data point".to_string()));
    }

    let distinct = count_distinct(x);
    if distinct < 2 {
        return Err(ConvertError::DegenerateFit(format!(
            "need at least 2 distinct x values, got {distinct}"
        )));
    }

    let n = x.len();
    let x_mean = x.iter().sum::<f64>() / n as f64;

    let design = DMatrix::from_fn(n, 2, |i, j| if j == 0 { 1.0 } else { x[i] - x_mean });
    let rhs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &rhs)
        .ok_or_else(|| ConvertError::DegenerateFit("least squares solve failed".to_string()))?;

    let slope = beta[1];
    let intercept = beta[0] - slope * x_mean;
    Ok(LineFit { slope, intercept })
}

fn count_distinct(values: &[f64]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();
    sorted.len()
}
