//! Attribute access to the objects a form reads from and writes to.
//!
//! [`Attributes`] is the read-only view used for context objects;
//! [`Proxy`] adds writes and is what [`Data::save`](crate::Data::save)
//! commits to. Custom accessor logic is layered on by wrapping a proxy
//! in an [`Intercept`].

use formwork_common::{Value, ValueMap};
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

pub trait Attributes {
    fn get(&self, name: &str) -> Option<Value>;
}

pub trait Proxy: Attributes {
    fn set(&mut self, name: &str, value: Value);
}

/// Plain attribute storage
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBag {
    attributes: ValueMap,
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.attributes.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Attributes for AttributeBag {
    fn get(&self, name: &str) -> Option<Value> {
        self.attributes.get(name).cloned()
    }
}

impl Proxy for AttributeBag {
    fn set(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_string(), value);
    }
}

impl Attributes for ValueMap {
    fn get(&self, name: &str) -> Option<Value> {
        ValueMap::get(self, name).cloned()
    }
}

impl Proxy for ValueMap {
    fn set(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

impl Attributes for HashMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        HashMap::get(self, name).cloned()
    }
}

impl Proxy for HashMap<String, Value> {
    fn set(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

impl Attributes for BTreeMap<String, Value> {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned()
    }
}

impl Proxy for BTreeMap<String, Value> {
    fn set(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }
}

/// A map value read as an attribute source
impl Attributes for Value {
    fn get(&self, name: &str) -> Option<Value> {
        Value::get(self, name).cloned()
    }
}

type Getter<P> = Box<dyn Fn(&P) -> Option<Value>>;
type Setter<P> = Box<dyn Fn(&mut P, Value)>;

/// Wraps a proxy and overrides individual attribute accessors.
///
/// ```rust
/// use formwork_common::Value;
/// use formwork_form::{AttributeBag, Attributes, Intercept, Proxy};
///
/// let mut album = Intercept::new(AttributeBag::new())
///     .setter("title", |bag, value| bag.set("title", Value::from(value.to_string().to_uppercase())));
///
/// album.set("title", Value::from("Live"));
/// assert_eq!(album.get("title"), Some(Value::from("LIVE")));
/// ```
pub struct Intercept<P> {
    inner: P,
    getters: IndexMap<String, Getter<P>>,
    setters: IndexMap<String, Setter<P>>,
}

impl<P: Proxy> Intercept<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            getters: IndexMap::new(),
            setters: IndexMap::new(),
        }
    }

    pub fn getter<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&P) -> Option<Value> + 'static,
    {
        self.getters.insert(name.into(), Box::new(getter));
        self
    }

    pub fn setter<F>(mut self, name: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut P, Value) + 'static,
    {
        self.setters.insert(name.into(), Box::new(setter));
        self
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Proxy> Attributes for Intercept<P> {
    fn get(&self, name: &str) -> Option<Value> {
        match self.getters.get(name) {
            Some(getter) => getter(&self.inner),
            None => self.inner.get(name),
        }
    }
}

impl<P: Proxy> Proxy for Intercept<P> {
    fn set(&mut self, name: &str, value: Value) {
        match self.setters.get(name) {
            Some(setter) => setter(&mut self.inner, value),
            None => self.inner.set(name, value),
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for Intercept<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intercept")
            .field("inner", &self.inner)
            .field("getters", &self.getters.keys().collect::<Vec<_>>())
            .field("setters", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}
