//! Read/write access to a form's values.
//!
//! Reads resolve, in order: staged writes, committed values (marshalled
//! request data plus anything saved), the bound target, the context.
//! Writes are staged until [`Data::save`] commits them.

use crate::proxy::{Attributes, Proxy};
use formwork_common::{Value, ValueMap};
use formwork_marshal::{split_first, split_path, DEFAULT_SEPARATOR};
use std::fmt;
use tracing::{debug, trace};

pub struct Data<'a> {
    committed: ValueMap,
    submitted: bool,
    separator: char,
    staged: ValueMap,
    target: Option<&'a mut dyn Proxy>,
    context: Option<&'a dyn Attributes>,
}

impl<'a> Data<'a> {
    /// Data backed by marshalled request values
    pub fn new(committed: ValueMap) -> Self {
        Self {
            committed,
            submitted: false,
            separator: DEFAULT_SEPARATOR,
            staged: ValueMap::new(),
            target: None,
            context: None,
        }
    }

    /// Data with no request values at all
    pub fn empty() -> Self {
        Self::new(ValueMap::new())
    }

    pub fn with_target(mut self, target: &'a mut dyn Proxy) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_context(mut self, context: &'a dyn Attributes) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_submitted(mut self, submitted: bool) -> Self {
        self.submitted = submitted;
        self
    }

    /// Separator used by [`Data::get_path`] and bound validator paths
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Whether the committed values came from a submitted request
    pub fn submitted(&self) -> bool {
        self.submitted
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.staged.get(key) {
            return Some(value.clone());
        }

        match self.committed.get(key) {
            Some(value) if !value.is_null() => return Some(value.clone()),
            _ => {}
        }

        if let Some(value) = self.target.as_ref().and_then(|target| target.get(key)) {
            return Some(value);
        }

        self.context.and_then(|context| context.get(key))
    }

    /// Resolve a path such as `artist.name`; the first segment goes
    /// through [`Data::get`]
    pub fn get_path(&self, path: &str) -> Option<Value> {
        let (head, rest) = split_first(path, self.separator);
        let value = self.get(head)?;
        match rest {
            None => Some(value),
            Some(rest) => value
                .lookup_segments(split_path(rest, self.separator))
                .cloned(),
        }
    }

    /// Stage a write; nothing else changes until [`Data::save`]
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        trace!(key = %key, "Staged write");
        self.staged.insert(key, value.into());
    }

    /// Stage every non-null top-level request value
    pub fn stage_submitted(&mut self) -> usize {
        let mut count = 0;
        for (key, value) in &self.committed {
            if !value.is_null() {
                self.staged.insert(key.clone(), value.clone());
                count += 1;
            }
        }
        count
    }

    pub fn is_dirty(&self) -> bool {
        !self.staged.is_empty()
    }

    pub fn staged(&self) -> &ValueMap {
        &self.staged
    }

    pub fn committed(&self) -> &ValueMap {
        &self.committed
    }

    /// Commit staged writes to the target and to the committed values
    /// in the order they were staged. Returns the number of writes.
    pub fn save(&mut self) -> usize {
        let count = self.staged.len();
        for (key, value) in self.staged.drain(..) {
            if let Some(target) = self.target.as_mut() {
                target.set(&key, value.clone());
            }
            self.committed.insert(key, value);
        }

        if count > 0 {
            debug!(writes = count, target = self.target.is_some(), "Saved form data");
        }
        count
    }
}

impl fmt::Debug for Data<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Data")
            .field("committed", &self.committed)
            .field("submitted", &self.submitted)
            .field("separator", &self.separator)
            .field("staged", &self.staged)
            .field("target", &self.target.is_some())
            .field("context", &self.context.is_some())
            .finish()
    }
}
