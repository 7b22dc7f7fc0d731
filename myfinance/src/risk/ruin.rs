use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::{
    iter::{IntoParallelIterator, ParallelIterator},
    ThreadPoolBuilder,
};
use serde::{Deserialize, Serialize};

use crate::{
    math::random::stream_seed,
    utils::errors::{FinanceError, Result},
};

use super::{path::Path, returnmodel::ReturnModel, simulation::simulate_portfolio};

/// # RuinParameters
/// Inputs of a ruin estimation other than the return model.
///
/// `threshold` is the ruin level as a fraction of `initial`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct RuinParameters {
    initial: f64,
    n_steps: usize,
    n_sims: usize,
    threshold: f64,
}

impl RuinParameters {
    pub fn new(initial: f64, n_steps: usize, n_sims: usize, threshold: f64) -> Self {
        Self {
            initial,
            n_steps,
            n_sims,
            threshold,
        }
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn n_sims(&self) -> usize {
        self.n_sims
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn ruin_level(&self) -> f64 {
        self.threshold * self.initial
    }

    fn validate(&self) -> Result<()> {
        if self.n_sims == 0 {
            return Err(FinanceError::DomainError(
                "number of simulations must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// # RuinOutcome
/// Every simulated path of a ruin estimation, with the level they were
/// tested against. The ruin probability is derived from the paths.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "RuinOutcomeData")]
pub struct RuinOutcome {
    ruin_level: f64,
    paths: Vec<Path>,
}

#[derive(Deserialize)]
struct RuinOutcomeData {
    ruin_level: f64,
    paths: Vec<Path>,
}

impl TryFrom<RuinOutcomeData> for RuinOutcome {
    type Error = FinanceError;

    fn try_from(data: RuinOutcomeData) -> Result<Self> {
        if data.paths.is_empty() {
            return Err(FinanceError::DomainError(
                "a ruin outcome holds at least one path".to_string(),
            ));
        }
        Ok(RuinOutcome::new(data.ruin_level, data.paths))
    }
}

impl RuinOutcome {
    fn new(ruin_level: f64, paths: Vec<Path>) -> Self {
        Self { ruin_level, paths }
    }

    pub fn ruin_level(&self) -> f64 {
        self.ruin_level
    }

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn n_sims(&self) -> usize {
        self.paths.len()
    }

    /// Paths with at least one value strictly below the ruin level.
    pub fn breach_count(&self) -> usize {
        self.paths
            .iter()
            .filter(|p| p.breaches(self.ruin_level))
            .count()
    }

    /// Share of paths that breached the ruin level, in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.breach_count() as f64 / self.paths.len() as f64
    }

    pub fn terminal_values(&self) -> Vec<f64> {
        self.paths.iter().map(|p| p.terminal()).collect()
    }

    pub fn into_parts(self) -> (f64, Vec<Path>) {
        let probability = self.probability();
        (probability, self.paths)
    }
}

/// Estimates the probability that a portfolio falls strictly below
/// `threshold * initial` at any point within `n_steps` periods.
///
/// Runs `n_sims` independent path simulations sequentially, all drawing from
/// `rng`, and keeps every path.
///
/// ## Example
/// ```
/// use myfinance::prelude::*;
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let model = ReturnModel::parametric(0.0, 0.0).unwrap();
/// let mut rng = StdRng::seed_from_u64(5);
/// let outcome = estimate_portfolio_ruin(100.0, 10, 50, 1.0, &model, &mut rng).unwrap();
/// assert_eq!(outcome.probability(), 0.0);
/// assert_eq!(outcome.paths().len(), 50);
/// ```
pub fn estimate_portfolio_ruin<R: Rng + ?Sized>(
    initial: f64,
    n_steps: usize,
    n_sims: usize,
    threshold: f64,
    model: &ReturnModel,
    rng: &mut R,
) -> Result<RuinOutcome> {
    estimate_ruin(
        &RuinParameters::new(initial, n_steps, n_sims, threshold),
        model,
        rng,
    )
}

/// [`estimate_portfolio_ruin`] taking its inputs as a [`RuinParameters`].
pub fn estimate_ruin<R: Rng + ?Sized>(
    params: &RuinParameters,
    model: &ReturnModel,
    rng: &mut R,
) -> Result<RuinOutcome> {
    params.validate()?;
    let ruin_level = params.ruin_level();
    tracing::debug!(
        n_sims = params.n_sims,
        n_steps = params.n_steps,
        ruin_level,
        "estimating portfolio ruin"
    );

    let paths = (0..params.n_sims)
        .map(|_| simulate_portfolio(params.initial, params.n_steps, model, &mut *rng))
        .collect::<Result<Vec<Path>>>()?;

    let outcome = RuinOutcome::new(ruin_level, paths);
    tracing::debug!(probability = outcome.probability(), "ruin estimation done");
    Ok(outcome)
}

/// Parallel ruin estimation.
///
/// Trial `i` draws from its own generator seeded with `stream_seed(seed, i)`,
/// so the outcome depends only on `seed`, not on thread scheduling. Paths are
/// returned in trial order.
pub fn par_estimate_portfolio_ruin(
    params: &RuinParameters,
    model: &ReturnModel,
    seed: u64,
) -> Result<RuinOutcome> {
    params.validate()?;
    let ruin_level = params.ruin_level();

    let pool = ThreadPoolBuilder::new()
        .thread_name(|i| format!("ruin-thread-{}", i))
        .build()?;
    tracing::debug!(
        n_sims = params.n_sims,
        n_steps = params.n_steps,
        ruin_level,
        threads = pool.current_num_threads(),
        "estimating portfolio ruin in parallel"
    );

    let paths = pool.install(|| {
        (0..params.n_sims)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(stream_seed(seed, i as u64));
                simulate_portfolio(params.initial, params.n_steps, model, &mut rng)
            })
            .collect::<Result<Vec<Path>>>()
    })?;

    let outcome = RuinOutcome::new(ruin_level, paths);
    tracing::debug!(probability = outcome.probability(), "parallel ruin estimation done");
    Ok(outcome)
}
