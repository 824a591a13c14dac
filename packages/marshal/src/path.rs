//! Key-path parsing for flat parameter names.
//!
//! `items.bicycle` addresses the `bicycle` entry below `items`. The
//! marshaller splits every key once and then strips one segment per
//! level of the field definition it descends into.

use indexmap::IndexMap;
use tracing::debug;

pub const DEFAULT_SEPARATOR: char = '.';

/// Placeholder for a dynamic mapping level in rendered paths
pub const PATH_WILDCARD: &str = "*";

pub fn split_path(key: &str, separator: char) -> Vec<&str> {
    key.split(separator).collect()
}

/// Split off the top-level key: `a.b.c` → (`a`, Some(`b.c`))
pub fn split_first(key: &str, separator: char) -> (&str, Option<&str>) {
    match key.split_once(separator) {
        Some((head, rest)) => (head, Some(rest)),
        None => (key, None),
    }
}

pub fn join_path<'a, I>(segments: I, separator: char) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(segment);
    }
    out
}

/// A parameter value with the path segments still left to consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathEntry<'a> {
    pub segments: &'a [&'a str],
    pub value: &'a str,
}

impl<'a> PathEntry<'a> {
    pub fn new(segments: &'a [&'a str], value: &'a str) -> Self {
        Self { segments, value }
    }

    /// True once every segment has been consumed
    pub fn is_leaf(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn head(&self) -> Option<&'a str> {
        self.segments.first().copied()
    }

    /// The same entry one level down
    pub fn descend(&self) -> Self {
        Self {
            segments: self.segments.get(1..).unwrap_or_default(),
            value: self.value,
        }
    }
}

/// Group entries by their first segment, descending one level.
///
/// Groups keep first-appearance order and entries keep submission order.
/// Leaf entries have no head and are left out, as are entries whose
/// next segment is empty (`items.` or `items..x`).
pub fn group_by_head<'a>(entries: &[PathEntry<'a>]) -> IndexMap<&'a str, Vec<PathEntry<'a>>> {
    let mut groups: IndexMap<&'a str, Vec<PathEntry<'a>>> = IndexMap::new();
    for entry in entries {
        match entry.head() {
            Some("") => {
                debug!(segments = ?entry.segments, "Ignoring parameter with an empty key segment")
            }
            Some(head) => groups.entry(head).or_default().push(entry.descend()),
            None => {}
        }
    }
    groups
}
