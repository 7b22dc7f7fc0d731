use rand::Rng;

use crate::utils::errors::Result;

use super::{path::Path, returnmodel::ReturnModel};

/// Simulates one portfolio value path of `n_steps` periods.
///
/// Returns are drawn from `model` (bootstrap resampling or Gaussian) and
/// compounded onto `initial`; the path holds `n_steps + 1` values.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let model = ReturnModel::resampled(vec![0.01, -0.01, 0.005]);
/// let mut rng = StdRng::seed_from_u64(1);
/// let path = simulate_portfolio(1_000.0, 20, &model, &mut rng).unwrap();
/// assert_eq!(path.len(), 21);
/// assert_eq!(path[0], 1_000.0);
/// ```
pub fn simulate_portfolio<R: Rng + ?Sized>(
    initial: f64,
    n_steps: usize,
    model: &ReturnModel,
    rng: &mut R,
) -> Result<Path> {
    let returns = model.sample_returns(n_steps, rng)?;
    Ok(Path::from_returns(initial, &returns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::random::seeded_rng, utils::errors::FinanceError};

    #[test]
    fn path_has_n_steps_plus_one_values() {
        let mut rng = seeded_rng(3);
        let models = [
            ReturnModel::resampled(vec![0.02, -0.03]),
            ReturnModel::parametric(0.0, 0.05).unwrap(),
        ];
        for model in &models {
            for n_steps in [0, 1, 7, 252] {
                let path = simulate_portfolio(250.0, n_steps, model, &mut rng).unwrap();
                assert_eq!(path.len(), n_steps + 1);
                assert_eq!(path[0], 250.0);
            }
        }
    }

    #[test]
    fn zero_variance_path_is_flat() {
        let mut rng = seeded_rng(3);
        let model = ReturnModel::parametric(0.0, 0.0).unwrap();
        let path = simulate_portfolio(100.0, 10, &model, &mut rng).unwrap();
        assert!(path.values().iter().all(|v| *v == 100.0));
    }

    #[test]
    fn constant_pool_compounds_deterministically() {
        let mut rng = seeded_rng(3);
        let model = ReturnModel::resampled(vec![0.5]);
        let path = simulate_portfolio(8.0, 3, &model, &mut rng).unwrap();
        assert_eq!(path.values(), &[8.0, 12.0, 18.0, 27.0]);
    }

    #[test]
    fn bootstrap_values_follow_pool_returns() {
        let mut rng = seeded_rng(21);
        let pool = vec![0.1, -0.2];
        let model = ReturnModel::resampled(pool.clone());
        let path = simulate_portfolio(100.0, 50, &model, &mut rng).unwrap();
        for w in path.values().windows(2) {
            let r = w[1] / w[0] - 1.0;
            assert!(pool.iter().any(|p| (p - r).abs() < 1e-9), "unexpected return {r}");
        }
    }

    #[test]
    fn same_seed_same_path() {
        let model = ReturnModel::parametric(0.0003, 0.012).unwrap();
        let a = simulate_portfolio(1.0, 100, &model, &mut seeded_rng(77)).unwrap();
        let b = simulate_portfolio(1.0, 100, &model, &mut seeded_rng(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_pool_fails_when_steps_are_requested() {
        let mut rng = seeded_rng(3);
        let model = ReturnModel::resampled(Vec::new());
        assert_eq!(simulate_portfolio(5.0, 0, &model, &mut rng).unwrap().values(), &[5.0]);
        assert!(matches!(
            simulate_portfolio(5.0, 1, &model, &mut rng),
            Err(FinanceError::DomainError(_))
        ));
    }
}
