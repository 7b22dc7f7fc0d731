//! Financial math routines: effective annual rates, portfolio weighted
//! returns, Monte Carlo pricing of European calls, and Monte Carlo
//! simulation of portfolio value paths with ruin-probability estimation.
//!
//! Every routine that consumes randomness takes the generator explicitly, so
//! results are reproducible from a seed.

pub mod derivatives;
pub mod math;
pub mod portfolio;
pub mod prelude;
pub mod rates;
pub mod risk;
pub mod utils;
