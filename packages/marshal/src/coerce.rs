use crate::error::CoerceError;
use crate::field::Scalar;
use formwork_common::Value;

/// Outcome of coercing one raw value against a scalar descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Valid(Value),
    /// No input, or trivial input the type does not accept
    Absent,
    Invalid(String),
    /// The coercer asked for the value to be dropped
    Ignored,
}

impl Coerced {
    pub fn value(&self) -> Option<&Value> {
        match self {
            Coerced::Valid(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Coerced::Invalid(message) => Some(message),
            _ => None,
        }
    }

    /// The value to store in marshalled data; `None` when ignored
    pub fn into_value(self) -> Option<Value> {
        match self {
            Coerced::Valid(value) => Some(value),
            Coerced::Absent | Coerced::Invalid(_) => Some(Value::Null),
            Coerced::Ignored => None,
        }
    }
}

/// Coerce `raw` (or its absence) with the required/optional rules.
///
/// Empty input on a required scalar is an error. On an optional scalar
/// the empty string is still offered to the coercer; a rejection is
/// treated as no input rather than as a failure.
pub fn coerce(raw: Option<&str>, scalar: &Scalar) -> Coerced {
    if let Some(message) = scalar.required_message() {
        if raw.map_or(true, str::is_empty) {
            return Coerced::Invalid(message.to_string());
        }
    }

    let Some(raw) = raw else {
        return Coerced::Absent;
    };

    match scalar.coercer().coerce(raw) {
        Ok(value) => Coerced::Valid(value),
        Err(CoerceError::Ignore) => Coerced::Ignored,
        Err(CoerceError::Invalid(_)) if raw.is_empty() => Coerced::Absent,
        Err(CoerceError::Invalid(message)) => Coerced::Invalid(message),
    }
}
