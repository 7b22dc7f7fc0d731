use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::utils::errors::{FinanceError, Result};

/// # RandomSource
/// Sampling capabilities needed by the Monte Carlo routines.
///
/// Implemented for every [`rand::Rng`], so a seeded `StdRng`, a `ThreadRng` or
/// a `&mut dyn RngCore` can be passed wherever randomness is consumed.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let draws = rng.choose_with_replacement(&[0.01, -0.02], 5).unwrap();
/// assert_eq!(draws.len(), 5);
/// assert!(draws.iter().all(|r| *r == 0.01 || *r == -0.02));
/// ```
pub trait RandomSource {
    /// Draws `count` values uniformly at random, with replacement, from `pool`.
    fn choose_with_replacement(&mut self, pool: &[f64], count: usize) -> Result<Vec<f64>>;

    /// Draws `count` independent samples from N(mean, std_dev^2).
    fn normal_samples(&mut self, mean: f64, std_dev: f64, count: usize) -> Result<Vec<f64>>;

    /// Draws `count` independent standard normal samples.
    fn standard_normals(&mut self, count: usize) -> Vec<f64>;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn choose_with_replacement(&mut self, pool: &[f64], count: usize) -> Result<Vec<f64>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if pool.is_empty() {
            return Err(FinanceError::DomainError(
                "cannot sample from an empty returns pool".to_string(),
            ));
        }
        Ok((0..count)
            .filter_map(|_| pool.choose(self).copied())
            .collect())
    }

    fn normal_samples(&mut self, mean: f64, std_dev: f64, count: usize) -> Result<Vec<f64>> {
        let normal = Normal::new(mean, std_dev).map_err(|e| {
            FinanceError::DomainError(format!(
                "invalid normal distribution (mean {}, std dev {}): {}",
                mean, std_dev, e
            ))
        })?;
        Ok(normal.sample_iter(self).take(count).collect())
    }

    fn standard_normals(&mut self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| self.sample::<f64, _>(StandardNormal))
            .collect()
    }
}

/// Seeded generator used by the library's reproducible entry points.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seed for the `index`-th independent stream derived from `seed`.
///
/// SplitMix64 finalizer over the combined value, so neighbouring indices give
/// unrelated seeds.
pub fn stream_seed(seed: u64, index: u64) -> u64 {
    let mut z = seed
        .wrapping_add(index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choose_with_replacement_only_returns_pool_values() {
        let mut rng = seeded_rng(1);
        let pool = [0.1, 0.2, 0.3];
        let draws = rng.choose_with_replacement(&pool, 100).unwrap();
        assert_eq!(draws.len(), 100);
        assert!(draws.iter().all(|d| pool.contains(d)));
    }

    #[test]
    fn empty_pool_fails_only_when_draws_are_requested() {
        let mut rng = seeded_rng(1);
        assert!(rng.choose_with_replacement(&[], 0).unwrap().is_empty());
        assert!(matches!(
            rng.choose_with_replacement(&[], 3),
            Err(FinanceError::DomainError(_))
        ));
    }

    #[test]
    fn zero_std_dev_returns_the_mean() {
        let mut rng = seeded_rng(3);
        let draws = rng.normal_samples(0.05, 0.0, 10).unwrap();
        assert!(draws.iter().all(|d| *d == 0.05));
    }

    #[test]
    fn negative_std_dev_is_a_domain_error() {
        let mut rng = seeded_rng(3);
        assert!(matches!(
            rng.normal_samples(0.0, -1.0, 10),
            Err(FinanceError::DomainError(_))
        ));
    }

    #[test]
    fn standard_normals_have_unit_moments() {
        let mut rng = seeded_rng(42);
        let z = rng.standard_normals(200_000);
        let mean = z.iter().sum::<f64>() / z.len() as f64;
        let var = z.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (z.len() - 1) as f64;
        assert!(mean.abs() < 0.01, "mean={mean}");
        assert!((var - 1.0).abs() < 0.02, "var={var}");
    }

    #[test]
    fn stream_seeds_differ_per_index() {
        let a = stream_seed(42, 0);
        let b = stream_seed(42, 1);
        assert_ne!(a, b);
        assert_eq!(a, stream_seed(42, 0));
    }
}
