use thiserror::Error;

/// Why a scoring run was refused. Raised before any fighter is scored, so a
/// failed run never yields a partial ranking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid value {value} for '{key}' on '{entity}': must be finite and non-negative")]
    InvalidValue {
        entity: String,
        key: String,
        value: f64,
    },
}

impl ScoreError {
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        ScoreError::InvalidConfiguration(msg.into())
    }
}
