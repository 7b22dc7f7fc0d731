pub mod black_scholes;
pub mod random;
pub mod statistics;
