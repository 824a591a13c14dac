use thiserror::Error;

/// Errors raised when reading typed data out of a [`Value`](crate::Value)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("Value is missing")]
    Missing,
}

impl CommonError {
    pub fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch { expected, found }
    }
}
