//! # Formwork Form
//!
//! Binds a field definition to a request: marshals the parameters
//! addressed to the form, merges them with an optional target object
//! and context, runs custom validators and dispatches the submitted
//! action.
//!
//! ## Example
//!
//! ```rust
//! use formwork_common::Request;
//! use formwork_form::{AttributeBag, FormDefinition};
//! use formwork_marshal::{Fields, Scalar};
//!
//! let definition = FormDefinition::new(
//!     Fields::new()
//!         .field("title", Scalar::text().required())
//!         .field("year", Scalar::integer()),
//! )
//! .prefix("tape_form")
//! .action("add", |data| {
//!     data.stage_submitted();
//!     data.save();
//!     Ok(())
//! });
//!
//! let request = Request::from_pairs(&[
//!     ("tape_form.title", "Live"),
//!     ("tape_form.year", "1978"),
//!     ("tape_form-add", ""),
//! ]);
//! let mut tape = AttributeBag::new();
//!
//! let mut form = definition.bind().params(&request).data(&mut tape).build();
//! assert!(form.validate().unwrap());
//! assert_eq!(form.invoke().unwrap(), Some("add"));
//! drop(form);
//!
//! assert_eq!(tape.iter().count(), 2);
//! ```

pub mod action;
pub mod data;
pub mod error;
pub mod form;
pub mod options;
pub mod proxy;
pub mod validator;


pub use action::{Action, Dispatcher, Submission};
pub use data::Data;
pub use error::{BoxError, FormError, FormResult};
pub use form::{Binder, Form, FormDefinition};
pub use options::{FormOptions, DEFAULT_PREFIX_PARAM, DEFAULT_SEPARATORS};
pub use proxy::{AttributeBag, Attributes, Intercept, Proxy};
pub use validator::Validator;
