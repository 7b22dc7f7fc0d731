pub use crate::{
    derivatives::europeancall::*,
    math::{black_scholes::*, random::*, statistics::*},
    portfolio::returns::*,
    rates::{enums::*, interestrate::*},
    risk::{path::*, returnmodel::*, ruin::*, simulation::*},
    utils::errors::*,
};
