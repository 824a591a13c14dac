//! Actions and submission detection.
//!
//! A form under a prefix is addressed by parameters named
//! `prefix<sep>rest`. The [`Dispatcher`] decides whether the request
//! targets the form at all and, if so, which declared action it
//! names. At most one action is submitted per request.

use crate::data::Data;
use crate::error::{FormError, FormResult};
use crate::options::FormOptions;
use formwork_common::Params;
use std::fmt;
use tracing::debug;

type Handler = Box<dyn Fn(&mut Data<'_>) -> anyhow::Result<()> + Send + Sync>;

pub struct Action {
    name: String,
    handler: Handler,
}

impl Action {
    pub fn new<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Data<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            handler: Box::new(handler),
        }
    }

    /// The unnamed action submitted when no other action matches
    pub fn default<F>(handler: F) -> Self
    where
        F: Fn(&mut Data<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self::new("", handler)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_default(&self) -> bool {
        self.name.is_empty()
    }

    pub fn run(&self, data: &mut Data<'_>) -> FormResult<()> {
        (self.handler)(data).map_err(|source| FormError::action(&self.name, source))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of matching a request against a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    NotSubmitted,
    /// `action` indexes the form's declared actions
    Submitted { action: Option<usize> },
}

impl Submission {
    pub fn is_submitted(&self) -> bool {
        matches!(self, Submission::Submitted { .. })
    }

    pub fn action(&self) -> Option<usize> {
        match self {
            Submission::Submitted { action } => *action,
            Submission::NotSubmitted => None,
        }
    }
}

pub struct Dispatcher<'a> {
    prefix: Option<&'a str>,
    options: &'a FormOptions,
}

impl<'a> Dispatcher<'a> {
    pub fn new(prefix: Option<&'a str>, options: &'a FormOptions) -> Self {
        Self { prefix, options }
    }

    pub fn prefix(&self) -> Option<&'a str> {
        self.prefix
    }

    /// Without a prefix every request is a submission
    pub fn is_submitted(&self, params: &Params) -> bool {
        let Some(prefix) = self.prefix else {
            return true;
        };

        params.iter().any(|(key, value)| {
            (key == self.options.prefix_param && value == prefix)
                || key == prefix
                || self.after_prefix(key).is_some()
        })
    }

    /// Match parameters against non-default actions: parameters in
    /// request order, then separators in precedence order, then actions
    /// in declaration order. Falls back to the default action.
    pub fn resolve(&self, params: &Params, actions: &[Action]) -> Submission {
        if !self.is_submitted(params) {
            debug!(prefix = ?self.prefix, "Form not submitted");
            return Submission::NotSubmitted;
        }

        for (key, _) in params.iter() {
            if let Some(index) = self.match_key(key, actions) {
                debug!(
                    prefix = ?self.prefix,
                    action = %actions[index].name(),
                    "Matched submitted action"
                );
                return Submission::Submitted {
                    action: Some(index),
                };
            }
        }

        let action = actions.iter().position(Action::is_default);
        debug!(
            prefix = ?self.prefix,
            default = action.is_some(),
            "No named action submitted"
        );
        Submission::Submitted { action }
    }

    /// The marshalling key for a request parameter, or `None` when the
    /// parameter belongs to a different form
    pub fn field_key<'k>(&self, key: &'k str) -> Option<&'k str> {
        match self.prefix {
            None => Some(key),
            Some(prefix) => key
                .strip_prefix(prefix)?
                .strip_prefix(self.options.marshal.separator),
        }
    }

    fn match_key(&self, key: &str, actions: &[Action]) -> Option<usize> {
        match self.prefix {
            None => find_action(key, actions),
            Some(prefix) => {
                let rest = key.strip_prefix(prefix)?;
                self.options
                    .separators
                    .iter()
                    .filter_map(|separator| rest.strip_prefix(*separator))
                    .find_map(|name| find_action(name, actions))
            }
        }
    }

    fn after_prefix<'k>(&self, key: &'k str) -> Option<&'k str> {
        let rest = key.strip_prefix(self.prefix?)?;
        self.options
            .separators
            .iter()
            .find_map(|separator| rest.strip_prefix(*separator))
    }
}

fn find_action(name: &str, actions: &[Action]) -> Option<usize> {
    actions
        .iter()
        .position(|action| !action.is_default() && action.name() == name)
}
