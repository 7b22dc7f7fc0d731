use statrs::distribution::{ContinuousCDF, Normal};

/// Black-Scholes price of a European call.
///
/// Closed-form reference for the Monte Carlo estimator. Degenerate inputs
/// (zero volatility or zero maturity) collapse to the discounted intrinsic
/// value of the forward.
pub fn black_scholes_call(s0: f64, k: f64, r: f64, sigma: f64, t: f64) -> f64 {
    let df = (-r * t).exp();
    let sqt = t.sqrt();
    if sigma * sqt < 1e-12 {
        return df * (s0 * (r * t).exp() - k).max(0.0);
    }
    let normal = Normal::standard();
    let d1 = ((s0 / k).ln() + (r + 0.5 * sigma * sigma) * t) / (sigma * sqt);
    let d2 = d1 - sigma * sqt;
    s0 * normal.cdf(d1) - k * df * normal.cdf(d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atm_reference_value() {
        // Hull, S=100 K=100 r=5% vol=20% T=1
        let price = black_scholes_call(100.0, 100.0, 0.05, 0.2, 1.0);
        assert!((price - 10.4506).abs() < 1e-3, "price={price}");
    }

    #[test]
    fn zero_vol_is_discounted_forward_intrinsic() {
        let price = black_scholes_call(100.0, 90.0, 0.0, 0.0, 1.0);
        assert!((price - 10.0).abs() < 1e-12);
        assert_eq!(black_scholes_call(100.0, 100.0, 0.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn deep_otm_is_nearly_worthless() {
        let price = black_scholes_call(50.0, 200.0, 0.01, 0.1, 0.5);
        assert!(price < 1e-6);
    }
}
