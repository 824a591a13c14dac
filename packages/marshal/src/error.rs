use formwork_common::Value;
use thiserror::Error;

pub type CoerceResult = Result<Value, CoerceError>;

/// Signals a coercer can raise for a single raw value
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoerceError {
    /// The raw value does not convert to the target type
    #[error("{0}")]
    Invalid(String),

    /// Drop the value as if it had never been submitted
    #[error("Value ignored")]
    Ignore,
}

impl CoerceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}
