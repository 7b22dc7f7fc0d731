use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::utils::errors::{FinanceError, Result};

/// # Path
/// Simulated portfolio values, starting with the initial value.
///
/// Element `i > 0` is element `i - 1` grown by the `i`-th drawn return.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "PathData")]
pub struct Path {
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct PathData {
    values: Vec<f64>,
}

impl TryFrom<PathData> for Path {
    type Error = FinanceError;

    fn try_from(data: PathData) -> Result<Self> {
        if data.values.is_empty() {
            return Err(FinanceError::DomainError(
                "a path holds at least its initial value".to_string(),
            ));
        }
        Ok(Path {
            values: data.values,
        })
    }
}

impl Path {
    /// Compounds `returns` onto `initial`.
    pub fn from_returns(initial: f64, returns: &[f64]) -> Self {
        let mut values = Vec::with_capacity(returns.len() + 1);
        values.push(initial);
        let mut current = initial;
        for r in returns {
            current *= 1.0 + r;
            values.push(current);
        }
        Path { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Number of values, i.e. steps plus one. Never zero.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn n_steps(&self) -> usize {
        self.values.len() - 1
    }

    pub fn initial(&self) -> f64 {
        self.values[0]
    }

    pub fn terminal(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// True if any value, the initial one included, is strictly below `level`.
    pub fn breaches(&self, level: f64) -> bool {
        self.values.iter().any(|v| *v < level)
    }

    /// Largest peak-to-trough loss as a fraction of the running peak.
    pub fn max_drawdown(&self) -> f64 {
        let mut peak = f64::NEG_INFINITY;
        let mut worst: f64 = 0.0;
        for v in &self.values {
            peak = peak.max(*v);
            if peak > 0.0 {
                worst = worst.max((peak - v) / peak);
            }
        }
        worst
    }
}

impl Index<usize> for Path {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl AsRef<[f64]> for Path {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

impl From<Path> for Vec<f64> {
    fn from(path: Path) -> Self {
        path.values
    }
}
