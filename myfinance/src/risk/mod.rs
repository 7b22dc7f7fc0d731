pub mod path;
pub mod returnmodel;
pub mod ruin;
pub mod simulation;
