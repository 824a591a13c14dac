//! Marshalling of flat request parameters into nested form data.
//!
//! ## Determinism
//!
//! For the same parameters and field definition `marshall` always
//! produces the same data and error trees: declared fields appear in
//! declaration order, dynamic keys in first-appearance order and
//! sequence items in submission order.
//!
//! ## Unknown input
//!
//! Parameters that match no field, or that address below a leaf, are
//! skipped without an error so forms can receive extraneous request
//! parameters (CSRF tokens, submit buttons and the like).

use crate::coerce::{coerce, Coerced};
use crate::error_tree::ErrorTree;
use crate::field::{Field, Fields, Scalar};
use crate::path::{group_by_head, split_path, PathEntry, DEFAULT_SEPARATOR};
use formwork_common::{Value, ValueMap};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

pub const MULTIPLE_VALUES_MESSAGE: &str = "Multiple values submitted";

/// What a single-valued field does with repeated parameters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Duplicates {
    /// Keep the first submitted value
    First,
    /// Later values override earlier ones
    #[default]
    Last,
    /// Record an error on the field
    Reject,
}

/// Marshaller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarshalOptions {
    /// Separator between key-path segments
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Policy for repeated values on scalar fields
    #[serde(default)]
    pub duplicates: Duplicates,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

impl Default for MarshalOptions {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            duplicates: Duplicates::default(),
        }
    }
}

impl MarshalOptions {
    pub fn with_duplicates(mut self, duplicates: Duplicates) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }
}

/// Data and error trees produced from one parameter sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Marshalled {
    /// A map isomorphic to the field definition
    pub data: Value,
    pub errors: ErrorTree,
}

impl Marshalled {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Marshaller {
    options: MarshalOptions,
}

impl Marshaller {
    pub fn new(options: MarshalOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarshalOptions {
        &self.options
    }

    /// Convert `params` into data and error trees shaped by `fields`
    #[instrument(level = "debug", skip_all, fields(separator = %self.options.separator))]
    pub fn marshall<'p, I>(&self, params: I, fields: &Fields) -> Marshalled
    where
        I: IntoIterator<Item = (&'p str, &'p str)>,
    {
        let pairs: Vec<(&str, &str)> = params.into_iter().collect();
        let paths: Vec<Vec<&str>> = pairs
            .iter()
            .map(|(key, _)| split_path(key, self.options.separator))
            .collect();
        let entries: Vec<PathEntry<'_>> = pairs
            .iter()
            .zip(&paths)
            .map(|((_, value), segments)| PathEntry::new(segments, value))
            .collect();

        let mut errors = ErrorTree::new();
        let data = self.marshall_fields(fields, &entries, &mut errors);

        debug!(
            params = pairs.len(),
            fields = fields.len(),
            errors = errors.len(),
            "Marshalling complete"
        );

        Marshalled { data, errors }
    }

    fn marshall_fields(
        &self,
        fields: &Fields,
        entries: &[PathEntry<'_>],
        errors: &mut ErrorTree,
    ) -> Value {
        let mut groups = group_by_head(entries);
        let mut map = ValueMap::with_capacity(fields.len());

        for (name, field) in fields.iter() {
            let group = groups.shift_remove(name).unwrap_or_default();
            let mut field_errors = ErrorTree::new();

            if let Some(value) = self.marshall_field(field, &group, &mut field_errors) {
                map.insert(name.to_string(), value);
            } else {
                trace!(field = %name, "Dropped ignored value");
            }

            if !field_errors.is_empty() {
                debug!(field = %name, errors = field_errors.len(), "Field did not marshal cleanly");
            }
            errors.attach(name, field_errors);
        }

        for key in groups.keys() {
            debug!(key = %key, "Ignoring parameter without a field definition");
        }

        Value::Map(map)
    }

    /// Returns `None` when the value was ignored and must be left out
    fn marshall_field(
        &self,
        field: &Field,
        entries: &[PathEntry<'_>],
        errors: &mut ErrorTree,
    ) -> Option<Value> {
        match field {
            Field::Scalar(scalar) => self.marshall_scalar(scalar, entries, errors),
            Field::Sequence(element) => Some(self.marshall_sequence(element, entries, errors)),
            Field::Fixed(fields) => Some(self.marshall_fields(fields, entries, errors)),
            Field::Dynamic(value_field) => {
                let mut map = ValueMap::new();
                for (key, group) in group_by_head(entries) {
                    let mut key_errors = ErrorTree::new();
                    if let Some(value) = self.marshall_field(value_field, &group, &mut key_errors) {
                        map.insert(key.to_string(), value);
                    }
                    errors.attach(key, key_errors);
                }
                Some(Value::Map(map))
            }
        }
    }

    fn marshall_scalar(
        &self,
        scalar: &Scalar,
        entries: &[PathEntry<'_>],
        errors: &mut ErrorTree,
    ) -> Option<Value> {
        let values = leaf_values(entries);

        let raw = match (self.options.duplicates, values.as_slice()) {
            (_, []) => None,
            (_, [only]) => Some(*only),
            (Duplicates::First, [first, ..]) => Some(*first),
            (Duplicates::Last, [.., last]) => Some(*last),
            (Duplicates::Reject, _) => {
                errors.push(MULTIPLE_VALUES_MESSAGE);
                return Some(Value::Null);
            }
        };

        let outcome = coerce(raw, scalar);
        if let Some(message) = outcome.error() {
            errors.push(message);
        }
        outcome.into_value()
    }

    fn marshall_sequence(
        &self,
        element: &Scalar,
        entries: &[PathEntry<'_>],
        errors: &mut ErrorTree,
    ) -> Value {
        let values = leaf_values(entries);

        if values.is_empty() {
            if let Some(message) = element.required_message() {
                errors.push(message);
            }
            return Value::List(Vec::new());
        }

        let mut items = Vec::with_capacity(values.len());
        for raw in values {
            match coerce(Some(raw), element) {
                Coerced::Valid(value) => items.push(value),
                Coerced::Absent => items.push(Value::Null),
                Coerced::Invalid(message) => {
                    errors.child_mut(&items.len().to_string()).push(message);
                    items.push(Value::Null);
                }
                Coerced::Ignored => {}
            }
        }
        Value::List(items)
    }
}

/// Values addressed at this node; deeper entries are logged and skipped
fn leaf_values<'a>(entries: &[PathEntry<'a>]) -> Vec<&'a str> {
    let mut values = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_leaf() {
            values.push(entry.value);
        } else {
            debug!(segments = ?entry.segments, "Ignoring parameter below a leaf field");
        }
    }
    values
}

/// Marshall with default options
pub fn marshall<'p, I>(params: I, fields: &Fields) -> Marshalled
where
    I: IntoIterator<Item = (&'p str, &'p str)>,
{
    Marshaller::default().marshall(params, fields)
}
