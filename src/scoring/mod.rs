pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::RangeOp;
pub use engine::{compute, compute_with, Breakdown, Factors, ScoreResult, MAX_SCORE};
pub use validation::{diagnose_record, validate_scoring};
