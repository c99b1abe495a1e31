pub mod config;
pub mod criterion;
pub mod encoding;
pub mod engine;
pub mod error;
pub mod validation;

pub use config::*;
pub use criterion::{Criterion, CriterionSet, Direction, DEFAULT_WEIGHT};
pub use encoding::{encode_column, CategoryCodes, EncodedColumn};
pub use engine::{rank, CriterionTerm, ScoreBreakdown, ScoreResult, EPSILON};
pub use error::ScoreError;
pub use validation::validate_scoring;

#[cfg(test)]
mod proptests;
