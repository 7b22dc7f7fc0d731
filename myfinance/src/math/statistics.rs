use statrs::statistics::Statistics;

use crate::utils::errors::{FinanceError, Result};

/// Arithmetic mean. Fails on an empty sample.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(FinanceError::DomainError(
            "mean of an empty sample is undefined".to_string(),
        ));
    }
    Ok(values.iter().mean())
}

/// Unbiased sample standard deviation; zero for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(FinanceError::DomainError(
            "standard deviation of an empty sample is undefined".to_string(),
        ));
    }
    if values.len() < 2 {
        return Ok(0.0);
    }
    Ok(values.iter().std_dev())
}

/// Standard error of the sample mean.
pub fn standard_error(values: &[f64]) -> Result<f64> {
    let sd = sample_std_dev(values)?;
    Ok(sd / (values.len() as f64).sqrt())
}
