use crate::utils::errors::{FinanceError, Result};

/// Scales `weights` so they sum to one. Negative entries (short positions)
/// are scaled like any other.
pub fn normalize_weights(weights: &[f64]) -> Result<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Err(FinanceError::DomainError(
            "portfolio weights sum to zero".to_string(),
        ));
    }
    Ok(weights.iter().map(|w| w / total).collect())
}

/// Weighted average return of a portfolio.
///
/// The weights are normalized to sum to one before taking the dot product
/// with `returns`.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// let r = portfolio_return(&[0.10, 0.02], &[3.0, 1.0]).unwrap();
/// assert!((r - 0.08).abs() < 1e-12);
/// ```
pub fn portfolio_return(returns: &[f64], weights: &[f64]) -> Result<f64> {
    if returns.len() != weights.len() {
        return Err(FinanceError::ShapeError {
            expected: returns.len(),
            found: weights.len(),
        });
    }
    let normalized = normalize_weights(weights)?;
    Ok(returns
        .iter()
        .zip(normalized.iter())
        .map(|(r, w)| r * w)
        .sum())
}
