//! Nested validation messages.
//!
//! An [`ErrorTree`] mirrors the field definition but is sparse: only
//! nodes that were written to exist. Lookups of names without errors
//! return a shared empty tree, so chained lookups like
//! `errors["user"]["age"]` never need guard code and never mutate.

use crate::path::DEFAULT_SEPARATOR;
use std::fmt;
use std::ops::Index;

static EMPTY: ErrorTree = ErrorTree::new();

#[derive(Debug, Clone, Default)]
pub struct ErrorTree {
    messages: Vec<String>,
    children: Vec<(String, ErrorTree)>,
}

impl ErrorTree {
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            children: Vec::new(),
        }
    }

    /// True when no node in the subtree holds a message
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.children.iter().all(|(_, child)| child.is_empty())
    }

    /// Number of messages in the whole subtree
    pub fn len(&self) -> usize {
        self.messages.len() + self.children.iter().map(|(_, child)| child.len()).sum::<usize>()
    }

    /// Messages attached directly to this node
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn push(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn get(&self, name: &str) -> &ErrorTree {
        self.children
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, child)| child)
            .unwrap_or(&EMPTY)
    }

    /// Dotted lookup; the empty path is this node
    pub fn lookup(&self, path: &str) -> &ErrorTree {
        self.lookup_with(path, DEFAULT_SEPARATOR)
    }

    /// Lookup with a custom path separator
    pub fn lookup_with(&self, path: &str, separator: char) -> &ErrorTree {
        if path.is_empty() {
            return self;
        }
        path.split(separator).fold(self, |tree, segment| tree.get(segment))
    }

    /// Child node for `name`, created on first use
    pub fn child_mut(&mut self, name: &str) -> &mut ErrorTree {
        let index = match self.children.iter().position(|(key, _)| key == name) {
            Some(index) => index,
            None => {
                self.children.push((name.to_string(), ErrorTree::new()));
                self.children.len() - 1
            }
        };
        &mut self.children[index].1
    }

    pub fn at_path_mut<'a, I>(&mut self, segments: I) -> &mut ErrorTree
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .fold(self, |tree, segment| tree.child_mut(segment))
    }

    /// Merge `child` under `name`, skipping it when it holds nothing
    pub fn attach(&mut self, name: &str, child: ErrorTree) {
        if !child.is_empty() {
            self.child_mut(name).merge(child);
        }
    }

    /// Append every message of `other` at the matching positions
    pub fn merge(&mut self, other: ErrorTree) {
        self.messages.extend(other.messages);
        for (name, child) in other.children {
            self.attach(&name, child);
        }
    }

    /// Children holding at least one message, in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, &ErrorTree)> {
        self.children
            .iter()
            .filter(|(_, child)| !child.is_empty())
            .map(|(name, child)| (name.as_str(), child))
    }

    /// Every message in the subtree, own messages first, then children
    pub fn flatten(&self) -> impl Iterator<Item = &str> + '_ {
        let mut out = Vec::with_capacity(self.len());
        self.collect_messages(&mut out);
        out.into_iter()
    }

    /// `(dotted path, messages)` for every node with messages
    pub fn entries(&self) -> Vec<(String, &[String])> {
        let mut out = Vec::new();
        self.collect_entries(String::new(), &mut out);
        out
    }

    fn collect_messages<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.extend(self.messages.iter().map(String::as_str));
        for (_, child) in &self.children {
            child.collect_messages(out);
        }
    }

    fn collect_entries<'a>(&'a self, path: String, out: &mut Vec<(String, &'a [String])>) {
        if !self.messages.is_empty() {
            out.push((path.clone(), &self.messages));
        }
        for (name, child) in &self.children {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", path, name)
            };
            child.collect_entries(child_path, out);
        }
    }
}

/// Structural equality: empty children and child order are ignored
impl PartialEq for ErrorTree {
    fn eq(&self, other: &Self) -> bool {
        self.messages == other.messages
            && self.children().count() == other.children().count()
            && self
                .children()
                .all(|(name, child)| other.get(name) == child)
    }
}

impl Index<&str> for ErrorTree {
    type Output = ErrorTree;

    fn index(&self, name: &str) -> &ErrorTree {
        self.get(name)
    }
}

impl fmt::Display for ErrorTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, message) in self.flatten().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}
