use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    math::{black_scholes::black_scholes_call, random::RandomSource, statistics},
    utils::errors::{FinanceError, Result},
};

/// Discounted sample mean of a Monte Carlo run and its standard error.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloEstimate {
    price: f64,
    standard_error: f64,
    n_sims: usize,
}

impl MonteCarloEstimate {
    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn standard_error(&self) -> f64 {
        self.standard_error
    }

    pub fn n_sims(&self) -> usize {
        self.n_sims
    }
}

/// # EuropeanCall
/// European call on an asset following geometric Brownian motion under the
/// risk-neutral measure.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let call = EuropeanCall::new(100.0, 100.0, 0.05, 0.2, 1.0);
/// let mut rng = StdRng::seed_from_u64(11);
/// let estimate = call.mc_price(50_000, &mut rng).unwrap();
/// let bs = call.black_scholes_price();
/// assert!((estimate.price() - bs).abs() < 5.0 * estimate.standard_error());
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct EuropeanCall {
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
}

impl EuropeanCall {
    pub fn new(spot: f64, strike: f64, rate: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
        }
    }

    pub fn spot(&self) -> f64 {
        self.spot
    }

    pub fn strike(&self) -> f64 {
        self.strike
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Terminal asset price for a standard normal shock `z`.
    pub fn terminal_price(&self, z: f64) -> f64 {
        let vol = self.volatility;
        let t = self.maturity;
        self.spot * ((self.rate - 0.5 * vol * vol) * t + vol * t.sqrt() * z).exp()
    }

    pub fn payoff(&self, terminal: f64) -> f64 {
        (terminal - self.strike).max(0.0)
    }

    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Risk-neutral Monte Carlo price from `n_sims` independent draws.
    pub fn mc_price<R: Rng + ?Sized>(
        &self,
        n_sims: usize,
        rng: &mut R,
    ) -> Result<MonteCarloEstimate> {
        if n_sims == 0 {
            return Err(FinanceError::DomainError(
                "number of simulations must be positive".to_string(),
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(FinanceError::DomainError(format!(
                "volatility must be finite and non-negative, got {}",
                self.volatility
            )));
        }

        let df = self.discount_factor();
        let discounted: Vec<f64> = rng
            .standard_normals(n_sims)
            .into_iter()
            .map(|z| df * self.payoff(self.terminal_price(z)))
            .collect();

        let price = statistics::mean(&discounted)?;
        let standard_error = statistics::standard_error(&discounted)?;
        tracing::debug!(n_sims, price, standard_error, "priced european call");

        Ok(MonteCarloEstimate {
            price,
            standard_error,
            n_sims,
        })
    }

    pub fn black_scholes_price(&self) -> f64 {
        black_scholes_call(
            self.spot,
            self.strike,
            self.rate,
            self.volatility,
            self.maturity,
        )
    }
}

/// Monte Carlo price of a European call: `exp(-rT) * mean(max(S_T - K, 0))`
/// with `S_T = S0 * exp((r - sigma^2/2) T + sigma sqrt(T) Z)`.
///
/// Pass a seeded generator for reproducible estimates.
pub fn mc_european_call<R: Rng + ?Sized>(
    s0: f64,
    k: f64,
    r: f64,
    sigma: f64,
    t: f64,
    n_sims: usize,
    rng: &mut R,
) -> Result<f64> {
    EuropeanCall::new(s0, k, r, sigma, t)
        .mc_price(n_sims, rng)
        .map(|estimate| estimate.price())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::random::seeded_rng;

    #[test]
    fn zero_vol_atm_is_worthless() {
        let mut rng = seeded_rng(0);
        let price = mc_european_call(100.0, 100.0, 0.0, 0.0, 1.0, 1000, &mut rng).unwrap();
        assert!(price.abs() < 1e-12, "price={price}");
    }

    #[test]
    fn zero_vol_itm_is_discounted_forward_intrinsic() {
        let mut rng = seeded_rng(0);
        let price = mc_european_call(100.0, 90.0, 0.03, 0.0, 2.0, 10, &mut rng).unwrap();
        let expected = (-0.06_f64).exp() * (100.0 * 0.06_f64.exp() - 90.0);
        assert!((price - expected).abs() < 1e-9);
    }

    #[test]
    fn converges_to_black_scholes() {
        let call = EuropeanCall::new(100.0, 105.0, 0.02, 0.25, 0.75);
        let mut rng = seeded_rng(2024);
        let estimate = call.mc_price(200_000, &mut rng).unwrap();
        let bs = call.black_scholes_price();
        assert!(
            (estimate.price() - bs).abs() < 4.0 * estimate.standard_error(),
            "mc={} bs={} se={}",
            estimate.price(),
            bs,
            estimate.standard_error()
        );
        assert_eq!(estimate.n_sims(), 200_000);
    }

    #[test]
    fn same_seed_same_price() {
        let a = mc_european_call(50.0, 55.0, 0.01, 0.3, 0.5, 5_000, &mut seeded_rng(9)).unwrap();
        let b = mc_european_call(50.0, 55.0, 0.01, 0.3, 0.5, 5_000, &mut seeded_rng(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn standard_error_shrinks_with_more_paths() {
        let call = EuropeanCall::new(100.0, 100.0, 0.0, 0.2, 1.0);
        let small = call.mc_price(1_000, &mut seeded_rng(5)).unwrap();
        let large = call.mc_price(100_000, &mut seeded_rng(5)).unwrap();
        assert!(large.standard_error() < small.standard_error());
    }

    #[test]
    fn rejects_degenerate_inputs() {
        let mut rng = seeded_rng(1);
        assert!(matches!(
            mc_european_call(100.0, 100.0, 0.0, 0.2, 1.0, 0, &mut rng),
            Err(FinanceError::DomainError(_))
        ));
        for sigma in [-0.2, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(
                matches!(
                    mc_european_call(100.0, 100.0, 0.0, sigma, 1.0, 10, &mut rng),
                    Err(FinanceError::DomainError(_))
                ),
                "sigma={sigma} should be rejected"
            );
        }
    }
}
