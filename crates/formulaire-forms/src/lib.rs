//! Dynamic form definitions and submission validation
//!
//! This crate provides the domain model for administrator-built forms:
//! - Forms composed of typed fields (text, textarea, select, checkbox,
//!   checkbox group) with per-field validation rules
//! - Batch reconciliation of a form's field set, one field kind at a time
//! - Option lists for selector fields, editable through a single
//!   comma-delimited string
//! - Submissions validated field-by-field with accumulated error messages
//!
//! Persistence sits behind the [`FormStore`] trait; the companion
//! `formulaire-store` crate ships an in-memory implementation.

pub mod error;
pub mod field;
pub mod form;
pub mod kind;
pub mod record;
pub mod store;
pub mod submission;
pub mod validate;

pub use error::{FormError, FormResult};
pub use field::{FieldAttrs, FieldOption, FormField};
pub use form::{FieldBatch, Form};
pub use kind::{FieldKind, ValidationKind};
pub use record::{OwnerRef, Record, RecordId};
pub use store::FormStore;
pub use submission::{FormSubmission, SubmissionErrors};
pub use validate::Validate;
