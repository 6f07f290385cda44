//! IPO quality scoring.
//!
//! [`scoring::compute`] reduces an [`ipo::IpoRecord`] to a 0-10 score with a
//! per-factor breakdown; [`label::label_for`] turns that score into a
//! display label and color.

pub mod config;
pub mod ipo;
pub mod label;
pub mod output;
pub mod scoring;
pub mod stderr_buffer;

pub use ipo::IpoRecord;
pub use label::{label_for, Label};
pub use scoring::{compute, compute_with, ScoreResult};
