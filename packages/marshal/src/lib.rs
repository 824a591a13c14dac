//! # Formwork Marshal
//!
//! Converts flat, possibly repeated `(key, value)` request parameters into
//! typed nested data plus a parallel tree of validation messages.
//!
//! ## Example
//!
//! ```rust
//! use formwork_marshal::{marshall, Field, Fields, Scalar};
//! use formwork_common::Value;
//!
//! let fields = Fields::new()
//!     .field("title", Scalar::text().required())
//!     .field("year", Scalar::integer())
//!     .field("tracks", Field::sequence(Scalar::text()))
//!     .field("items", Field::dynamic(Scalar::integer()));
//!
//! let result = marshall(
//!     [
//!         ("title", "Live"),
//!         ("year", "1978"),
//!         ("tracks", "Intro"),
//!         ("tracks", "Outro"),
//!         ("items.bicycle", "2"),
//!         ("csrf_token", "ignored"),
//!     ],
//!     &fields,
//! );
//!
//! assert!(result.errors.is_empty());
//! assert_eq!(result.data.lookup("year"), Some(&Value::Integer(1978)));
//! assert_eq!(result.data.lookup("items.bicycle"), Some(&Value::Integer(2)));
//! ```

pub mod coerce;
pub mod error;
pub mod error_tree;
pub mod field;
pub mod marshaller;
pub mod path;

#[cfg(test)]
mod tests_marshalling;

pub use coerce::{coerce, Coerced};
pub use error::{CoerceError, CoerceResult};
pub use error_tree::ErrorTree;
pub use field::{
    Boolean, Coercer, Field, Fields, Float, Integer, Scalar, Text, DEFAULT_REQUIRED_MESSAGE,
};
pub use marshaller::{
    marshall, Duplicates, MarshalOptions, Marshalled, Marshaller, MULTIPLE_VALUES_MESSAGE,
};
pub use path::{group_by_head, join_path, split_first, split_path, PathEntry, DEFAULT_SEPARATOR};
