use crate::data::Data;
use crate::error::{FormError, FormResult};
use formwork_marshal::{split_path, ErrorTree};
use std::fmt;
use tracing::debug;

type Check = Box<dyn Fn(&Data<'_>) -> anyhow::Result<Vec<String>> + Send + Sync>;

/// A custom check run against marshalled data.
///
/// Returned messages are attached to each bound field path, or to the
/// form root when the validator is unbound. An `Err` is reserved for
/// conditions that are not about user input and aborts validation.
pub struct Validator {
    name: String,
    fields: Vec<String>,
    check: Check,
}

impl Validator {
    /// An unbound validator reporting at the form root
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&Data<'_>) -> anyhow::Result<Vec<String>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            fields: Vec::new(),
            check: Box::new(check),
        }
    }

    /// Attach messages at the given field paths, split on the data's
    /// separator
    pub fn bind<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_bound(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Run the check and merge its messages into `errors`.
    /// Returns the number of messages produced.
    pub fn run(&self, data: &Data<'_>, errors: &mut ErrorTree) -> FormResult<usize> {
        let messages =
            (self.check)(data).map_err(|source| FormError::validator(&self.name, source))?;

        if messages.is_empty() {
            return Ok(0);
        }

        debug!(validator = %self.name, messages = messages.len(), "Validator reported errors");

        if self.fields.is_empty() {
            for message in &messages {
                errors.push(message.clone());
            }
        } else {
            for field in &self.fields {
                let node = errors.at_path_mut(split_path(field, data.separator()));
                for message in &messages {
                    node.push(message.clone());
                }
            }
        }

        Ok(messages.len())
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}
