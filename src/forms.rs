//! Form domain module.
//!
//! Records, the field-kind registry, batch reconciliation, and
//! submission validation.
//!
//! # Examples
//!
//! ```
//! use formulaire::forms::{FieldKind, Form, FormField};
//!
//! let mut form = Form::new("Contact");
//! form.add_field(FormField::new(FieldKind::TextField, "Name").with_name("name"));
//! assert_eq!(form.field_keys(), ["name"]);
//! ```

pub use formulaire_forms::*;
