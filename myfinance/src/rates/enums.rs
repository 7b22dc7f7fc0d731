use serde::{Deserialize, Serialize};

/// # Compounding
/// How interest accrues over a year fraction. `Compounded(n)` accrues `n`
/// times per year.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compounding {
    Simple,
    Compounded(u32),
    Continuous,
}
