//! Form definitions and their per-request instances.
//!
//! A [`FormDefinition`] is built once. Each request binds it through a
//! [`Binder`], which marshals the parameters addressed to the form and
//! resolves the submitted action, yielding a [`Form`].

use crate::action::{Action, Dispatcher, Submission};
use crate::data::Data;
use crate::error::FormResult;
use crate::options::FormOptions;
use crate::proxy::{Attributes, Proxy};
use crate::validator::Validator;
use formwork_common::{ParamSource, Params, Value, ValueMap};
use formwork_marshal::{ErrorTree, Fields, Marshaller};
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct FormDefinition {
    fields: Fields,
    validators: Vec<Validator>,
    actions: Vec<Action>,
    options: FormOptions,
}

impl FormDefinition {
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            validators: Vec::new(),
            actions: Vec::new(),
            options: FormOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.options.prefix = Some(prefix.into());
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Declare a named action; declaration order breaks ties
    pub fn action<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut Data<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actions.push(Action::new(name, handler));
        self
    }

    pub fn default_action<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut Data<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.actions.push(Action::default(handler));
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn validators(&self) -> &[Validator] {
        &self.validators
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn bind(&self) -> Binder<'_> {
        Binder {
            definition: self,
            params: None,
            target: None,
            context: None,
            prefix: None,
        }
    }
}

/// Collects the per-request inputs of a form
pub struct Binder<'a> {
    definition: &'a FormDefinition,
    params: Option<Params>,
    target: Option<&'a mut dyn Proxy>,
    context: Option<&'a dyn Attributes>,
    prefix: Option<String>,
}

impl<'a> Binder<'a> {
    pub fn params(mut self, source: impl ParamSource) -> Self {
        self.params = Some(source.params());
        self
    }

    /// Object that reads fall back to and that `save` writes to
    pub fn data(mut self, target: &'a mut dyn Proxy) -> Self {
        self.target = Some(target);
        self
    }

    pub fn context(mut self, context: &'a dyn Attributes) -> Self {
        self.context = Some(context);
        self
    }

    /// Override the definition's prefix for this instance
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build(self) -> Form<'a> {
        let definition = self.definition;
        let options = &definition.options;
        let prefix = self.prefix.or_else(|| options.prefix.clone());
        let supplied = self.params.is_some();
        let params = self.params.unwrap_or_default();

        let (submission, committed, errors) = {
            let dispatcher = Dispatcher::new(prefix.as_deref(), options);
            let submission = dispatcher.resolve(&params, &definition.actions);

            if supplied && submission.is_submitted() {
                let pairs = params
                    .iter()
                    .filter_map(|(key, value)| dispatcher.field_key(key).map(|key| (key, value)));
                let marshalled =
                    Marshaller::new(options.marshal.clone()).marshall(pairs, &definition.fields);
                let committed = match marshalled.data {
                    Value::Map(map) => map,
                    _ => ValueMap::new(),
                };
                (submission, committed, marshalled.errors)
            } else {
                (submission, ValueMap::new(), ErrorTree::new())
            }
        };

        debug!(
            prefix = ?prefix,
            submitted = submission.is_submitted(),
            errors = errors.len(),
            "Bound form"
        );

        let mut data = Data::new(committed)
            .with_submitted(supplied && submission.is_submitted())
            .with_separator(options.marshal.separator);
        if let Some(target) = self.target {
            data = data.with_target(target);
        }
        if let Some(context) = self.context {
            data = data.with_context(context);
        }

        Form {
            definition,
            prefix,
            params,
            submission,
            data,
            errors,
            validated: None,
        }
    }
}

/// A form definition bound to one request
#[derive(Debug)]
pub struct Form<'a> {
    definition: &'a FormDefinition,
    prefix: Option<String>,
    params: Params,
    submission: Submission,
    data: Data<'a>,
    errors: ErrorTree,
    validated: Option<bool>,
}

impl<'a> Form<'a> {
    pub fn definition(&self) -> &'a FormDefinition {
        self.definition
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_submitted()
    }

    pub fn submission(&self) -> Submission {
        self.submission
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// The full request, including parameters addressed to other forms
    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn data(&self) -> &Data<'a> {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Data<'a> {
        &mut self.data
    }

    /// Marshalling errors, plus validator messages once validated
    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    /// Run every validator once and report whether the form is free of
    /// errors. Later calls return the first result. When a validator
    /// fails, no messages from this run are kept.
    pub fn validate(&mut self) -> FormResult<bool> {
        if let Some(valid) = self.validated {
            return Ok(valid);
        }

        let mut reported = ErrorTree::new();
        for validator in &self.definition.validators {
            validator.run(&self.data, &mut reported)?;
        }
        self.errors.merge(reported);

        let valid = self.errors.is_empty();
        debug!(valid, errors = self.errors.len(), "Validated form");
        self.validated = Some(valid);
        Ok(valid)
    }

    pub fn actions(&self) -> &'a [Action] {
        &self.definition.actions
    }

    pub fn submitted_action(&self) -> Option<&'a Action> {
        let actions = self.actions();
        self.submission.action().and_then(|index| actions.get(index))
    }

    /// Run the submitted action's handler. Returns its name, or `None`
    /// when the request submitted no action.
    pub fn invoke(&mut self) -> FormResult<Option<&'a str>> {
        let Some(action) = self.submitted_action() else {
            debug!(prefix = ?self.prefix, "No action to invoke");
            return Ok(None);
        };

        action.run(&mut self.data)?;
        debug!(action = %action.name(), "Invoked action");
        Ok(Some(action.name()))
    }

    pub fn into_data(self) -> Data<'a> {
        self.data
    }
}
