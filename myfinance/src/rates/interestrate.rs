use serde::{Deserialize, Serialize};

use crate::utils::errors::{FinanceError, Result};

use super::enums::Compounding;

/// Effective annual rate of a nominal rate compounded `compounding_periods`
/// times per year: `(1 + r/n)^n - 1`.
///
/// Negative period counts are evaluated as written.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// let ear = effective_annual_rate(0.12, 12).unwrap();
/// assert!((ear - 0.126825).abs() < 1e-6);
/// assert!(effective_annual_rate(0.12, 0).is_err());
/// ```
pub fn effective_annual_rate(nominal_rate: f64, compounding_periods: i32) -> Result<f64> {
    if compounding_periods == 0 {
        return Err(FinanceError::DomainError(
            "compounding periods must be non-zero".to_string(),
        ));
    }
    let n = compounding_periods as f64;
    Ok((1.0 + nominal_rate / n).powi(compounding_periods) - 1.0)
}

/// Limit of [`effective_annual_rate`] as the period count grows: `e^r - 1`.
pub fn continuous_effective_annual_rate(nominal_rate: f64) -> f64 {
    nominal_rate.exp_m1()
}

/// Nominal rate that, compounded `compounding_periods` times per year, yields
/// `effective_rate`.
pub fn nominal_rate_from_effective(effective_rate: f64, compounding_periods: i32) -> Result<f64> {
    if compounding_periods == 0 {
        return Err(FinanceError::DomainError(
            "compounding periods must be non-zero".to_string(),
        ));
    }
    let growth = 1.0 + effective_rate;
    if growth <= 0.0 {
        return Err(FinanceError::DomainError(format!(
            "effective rate {} implies a non-positive growth factor",
            effective_rate
        )));
    }
    let n = compounding_periods as f64;
    Ok(n * (growth.powf(1.0 / n) - 1.0))
}

/// # InterestRate
/// A quoted rate together with its compounding convention.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// let rate = InterestRate::new(0.05, Compounding::Compounded(2)).unwrap();
/// assert_eq!(rate.rate(), 0.05);
/// assert!((rate.effective_annual_rate() - 0.050625).abs() < 1e-12);
/// assert!(InterestRate::new(0.05, Compounding::Compounded(0)).is_err());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct InterestRate {
    rate: f64,
    compounding: Compounding,
}

impl InterestRate {
    /// Fails on `Compounded(0)` or a period count that does not fit an `i32`.
    pub fn new(rate: f64, compounding: Compounding) -> Result<InterestRate> {
        if let Compounding::Compounded(n) = compounding {
            if n == 0 || i32::try_from(n).is_err() {
                return Err(FinanceError::DomainError(format!(
                    "invalid number of compounding periods: {}",
                    n
                )));
            }
        }
        Ok(InterestRate { rate, compounding })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn compounding(&self) -> Compounding {
        self.compounding
    }

    pub fn compound_factor(&self, year_fraction: f64) -> f64 {
        match self.compounding {
            Compounding::Simple => 1.0 + self.rate * year_fraction,
            Compounding::Compounded(n) => {
                let f = n as f64;
                (1.0 + self.rate / f).powf(year_fraction * f)
            }
            Compounding::Continuous => (self.rate * year_fraction).exp(),
        }
    }

    pub fn discount_factor(&self, year_fraction: f64) -> f64 {
        1.0 / self.compound_factor(year_fraction)
    }

    /// Growth over one year, minus one.
    pub fn effective_annual_rate(&self) -> f64 {
        match self.compounding {
            Compounding::Simple => self.rate,
            Compounding::Compounded(_) => self.compound_factor(1.0) - 1.0,
            Compounding::Continuous => continuous_effective_annual_rate(self.rate),
        }
    }
}
