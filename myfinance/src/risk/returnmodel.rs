use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    math::random::RandomSource,
    utils::errors::{FinanceError, Result},
};

/// # ReturnModel
/// Source of per-period returns for a simulated path.
///
/// Either a pool of observed returns, resampled with replacement, or a
/// Gaussian generator with mean `mu` and standard deviation `sigma`.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
///
/// let model = ReturnModel::try_from_options(None, Some(0.0005), Some(0.01)).unwrap();
/// assert_eq!(model, ReturnModel::Parametric { mu: 0.0005, sigma: 0.01 });
///
/// let err = ReturnModel::try_from_options(Some(vec![0.01]), Some(0.0), None);
/// assert!(matches!(err, Err(FinanceError::ConfigurationError(_))));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "ReturnOptions", into = "ReturnOptions")]
pub enum ReturnModel {
    Resampled(Vec<f64>),
    Parametric { mu: f64, sigma: f64 },
}

impl ReturnModel {
    pub fn resampled(pool: Vec<f64>) -> Self {
        ReturnModel::Resampled(pool)
    }

    pub fn parametric(mu: f64, sigma: f64) -> Result<Self> {
        if !(sigma >= 0.0) || !sigma.is_finite() {
            return Err(FinanceError::DomainError(format!(
                "sigma must be a finite non-negative number, got {}",
                sigma
            )));
        }
        Ok(ReturnModel::Parametric { mu, sigma })
    }

    /// Builds a model from the optional-argument form: either an explicit
    /// `returns` pool, or both `mu` and `sigma`.
    pub fn try_from_options(
        returns: Option<Vec<f64>>,
        mu: Option<f64>,
        sigma: Option<f64>,
    ) -> Result<Self> {
        match (returns, mu, sigma) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => Err(FinanceError::ConfigurationError(
                "provide either returns or mu/sigma, not both".to_string(),
            )),
            (Some(pool), None, None) => Ok(ReturnModel::resampled(pool)),
            (None, Some(mu), Some(sigma)) => ReturnModel::parametric(mu, sigma),
            (None, _, _) => Err(FinanceError::ConfigurationError(
                "must specify both mu and sigma when returns are not provided".to_string(),
            )),
        }
    }

    /// Draws `n_steps` returns from this model.
    pub fn sample_returns<R: Rng + ?Sized>(&self, n_steps: usize, rng: &mut R) -> Result<Vec<f64>> {
        match self {
            ReturnModel::Resampled(pool) => rng.choose_with_replacement(pool, n_steps),
            ReturnModel::Parametric { mu, sigma } => rng.normal_samples(*mu, *sigma, n_steps),
        }
    }
}

/// Optional-argument form of [`ReturnModel`], as found in parameter files.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReturnOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mu: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
}

impl TryFrom<ReturnOptions> for ReturnModel {
    type Error = FinanceError;

    fn try_from(options: ReturnOptions) -> Result<Self> {
        ReturnModel::try_from_options(options.returns, options.mu, options.sigma)
    }
}

impl From<ReturnModel> for ReturnOptions {
    fn from(model: ReturnModel) -> Self {
        match model {
            ReturnModel::Resampled(pool) => ReturnOptions {
                returns: Some(pool),
                ..Default::default()
            },
            ReturnModel::Parametric { mu, sigma } => ReturnOptions {
                returns: None,
                mu: Some(mu),
                sigma: Some(sigma),
            },
        }
    }
}
