//! Error types for form processing
//!
//! Bad user input never shows up here; it lands in the form's
//! [`ErrorTree`](formwork_marshal::ErrorTree). These variants cover
//! exceptional failures inside user callbacks and invalid configuration.

use std::error::Error as StdError;
use thiserror::Error;

pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Validator '{name}' failed: {source}")]
    Validator {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Action '{name}' failed: {source}")]
    Action {
        name: String,
        #[source]
        source: BoxError,
    },

    #[error("Invalid form options: {0}")]
    Options(#[from] serde_json::Error),
}

impl FormError {
    pub fn validator(name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Validator {
            name: name.into(),
            source: source.into(),
        }
    }

    pub fn action(name: impl Into<String>, source: anyhow::Error) -> Self {
        Self::Action {
            name: name.into(),
            source: source.into(),
        }
    }
}

pub type FormResult<T> = Result<T, FormError>;
