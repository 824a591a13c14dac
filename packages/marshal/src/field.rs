//! Field definitions describing the expected shape of form input.
//!
//! A definition is a tree of [`Field`] nodes. Leaves are [`Scalar`]
//! descriptors wrapping a [`Coercer`]; internal nodes are fixed mappings
//! ([`Fields`]), dynamic mappings accepting any key, or sequences of a
//! single scalar type.

use crate::error::{CoerceError, CoerceResult};
use crate::path::{DEFAULT_SEPARATOR, PATH_WILDCARD};
use formwork_common::Value;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_REQUIRED_MESSAGE: &str = "Required field";

/// Converts one raw string into a typed [`Value`]
pub trait Coercer: Send + Sync {
    fn coerce(&self, raw: &str) -> CoerceResult;

    /// Name used in debug output
    fn name(&self) -> &'static str {
        "custom"
    }
}

impl<F> Coercer for F
where
    F: Fn(&str) -> CoerceResult + Send + Sync,
{
    fn coerce(&self, raw: &str) -> CoerceResult {
        self(raw)
    }
}

/// Accepts any string, including the empty one
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Coercer for Text {
    fn coerce(&self, raw: &str) -> CoerceResult {
        Ok(Value::String(raw.to_string()))
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

impl Coercer for Integer {
    fn coerce(&self, raw: &str) -> CoerceResult {
        raw.trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| CoerceError::invalid(format!("Error converting '{}' to integer", raw)))
    }

    fn name(&self) -> &'static str {
        "integer"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

impl Coercer for Float {
    fn coerce(&self, raw: &str) -> CoerceResult {
        raw.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoerceError::invalid(format!("Error converting '{}' to float", raw)))
    }

    fn name(&self) -> &'static str {
        "float"
    }
}

/// Checkbox-style truth values, case-insensitive
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

impl Coercer for Boolean {
    fn coerce(&self, raw: &str) -> CoerceResult {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" | "y" | "t" => Ok(Value::Boolean(true)),
            "0" | "false" | "no" | "off" | "n" | "f" => Ok(Value::Boolean(false)),
            _ => Err(CoerceError::invalid(format!(
                "Error converting '{}' to boolean",
                raw
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "boolean"
    }
}

/// Leaf descriptor: a coercer plus the optional required flag
#[derive(Clone)]
pub struct Scalar {
    coercer: Arc<dyn Coercer>,
    required: Option<String>,
}

impl Scalar {
    pub fn new(coercer: impl Coercer + 'static) -> Self {
        Self {
            coercer: Arc::new(coercer),
            required: None,
        }
    }

    pub fn text() -> Self {
        Self::new(Text)
    }

    pub fn integer() -> Self {
        Self::new(Integer)
    }

    pub fn float() -> Self {
        Self::new(Float)
    }

    pub fn boolean() -> Self {
        Self::new(Boolean)
    }

    /// Treat absent or empty input as an error with the default message
    pub fn required(self) -> Self {
        self.required_with(DEFAULT_REQUIRED_MESSAGE)
    }

    pub fn required_with(mut self, message: impl Into<String>) -> Self {
        self.required = Some(message.into());
        self
    }

    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    pub fn required_message(&self) -> Option<&str> {
        self.required.as_deref()
    }

    pub fn coercer(&self) -> &dyn Coercer {
        self.coercer.as_ref()
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("coercer", &self.coercer.name())
            .field("required", &self.required)
            .finish()
    }
}

/// One node of a field definition tree
#[derive(Debug, Clone)]
pub enum Field {
    /// Single coerced value
    Scalar(Scalar),
    /// Every submitted value, in submission order
    Sequence(Scalar),
    /// Named sub-fields
    Fixed(Fields),
    /// Arbitrary keys sharing one value definition
    Dynamic(Box<Field>),
}

impl Field {
    pub fn sequence(element: Scalar) -> Self {
        Field::Sequence(element)
    }

    pub fn dynamic(value: impl Into<Field>) -> Self {
        Field::Dynamic(Box::new(value.into()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Field::Scalar(_) => "scalar",
            Field::Sequence(_) => "sequence",
            Field::Fixed(_) => "fixed",
            Field::Dynamic(_) => "dynamic",
        }
    }

    /// Walk `segments` below this node; any key matches a dynamic level
    pub fn resolve<'a, I>(&self, segments: I) -> Option<&Field>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            current = match current {
                Field::Fixed(fields) => fields.get(segment)?,
                Field::Dynamic(value) => value.as_ref(),
                Field::Scalar(_) | Field::Sequence(_) => return None,
            };
        }
        Some(current)
    }

    fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
        match self {
            Field::Scalar(_) | Field::Sequence(_) => out.push(prefix.to_string()),
            Field::Fixed(fields) => {
                for (name, field) in fields.iter() {
                    field.collect_paths(&format!("{}.{}", prefix, name), out);
                }
            }
            Field::Dynamic(value) => {
                value.collect_paths(&format!("{}.{}", prefix, PATH_WILDCARD), out)
            }
        }
    }
}

impl From<Scalar> for Field {
    fn from(scalar: Scalar) -> Self {
        Field::Scalar(scalar)
    }
}

impl From<Fields> for Field {
    fn from(fields: Fields) -> Self {
        Field::Fixed(fields)
    }
}

/// Ordered set of named fields; the root of every definition
#[derive(Debug, Clone, Default)]
pub struct Fields {
    entries: IndexMap<String, Field>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn field(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.insert(name, field);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, field: impl Into<Field>) {
        self.entries.insert(name.into(), field.into());
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.entries.iter().map(|(name, field)| (name.as_str(), field))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the definition node at a dotted path such as `user.name`
    pub fn resolve(&self, path: &str) -> Option<&Field> {
        self.resolve_with(path, DEFAULT_SEPARATOR)
    }

    pub fn resolve_with(&self, path: &str, separator: char) -> Option<&Field> {
        let mut segments = path.split(separator);
        let head = segments.next()?;
        self.get(head)?.resolve(segments)
    }

    /// Dotted paths of every leaf; dynamic levels render as `*`
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        for (name, field) in self.iter() {
            field.collect_paths(name, &mut out);
        }
        out
    }
}
