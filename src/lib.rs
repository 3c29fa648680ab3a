//! # Formulaire
//!
//! Dynamic form definitions and submission validation for Rust
//! applications.
//!
//! Administrators build [`Form`]s out of typed fields (text, textarea,
//! select, checkbox, checkbox group), each carrying its own validation
//! rules; end users submit values against a form and get field-keyed
//! error messages back. Persistence sits behind the [`FormStore`] port,
//! with an in-memory implementation shipped behind the `store` feature.
//!
//! ## Feature Flags
//!
//! - `minimal` - Domain types only: records, reconciliation, submission
//!   validation
//! - `store` - The in-memory [`MemoryStore`] backend
//! - `full` (default) - All features enabled
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! use formulaire::prelude::*;
//! use serde_json::json;
//!
//! let mut store = MemoryStore::new();
//!
//! // An administrator defines the form...
//! let mut form = Form::new("Contact us");
//! form.add_field(
//! 	FormField::new(FieldKind::TextField, "Your name")
//! 		.with_name("name")
//! 		.required(),
//! );
//! form.add_field(
//! 	FormField::new(FieldKind::Select, "Topic")
//! 		.with_name("topic")
//! 		.with_options_string("Sales, Support"),
//! );
//! store.save_form(&mut form).unwrap();
//!
//! // ...and a visitor fills it in.
//! let submission = form.submit(
//! 	&mut store,
//! 	HashMap::from([
//! 		("name".to_string(), json!("Jane")),
//! 		("topic".to_string(), json!("Support")),
//! 	]),
//! );
//! assert!(!submission.has_errors());
//!
//! let declined = form.submit(&mut store, HashMap::new());
//! assert_eq!(
//! 	declined.errors().on("name"),
//! 	Some(&["name cannot be blank.".to_string()][..])
//! );
//! ```

pub mod forms;
#[cfg(feature = "store")]
pub mod store;

// Re-export the domain types
pub use formulaire_forms::{
	FieldAttrs, FieldBatch, FieldKind, FieldOption, Form, FormError, FormField, FormResult,
	FormStore, FormSubmission, OwnerRef, Record, RecordId, SubmissionErrors, Validate,
	ValidationKind,
};

// Re-export the bundled backend
#[cfg(feature = "store")]
pub use formulaire_store::MemoryStore;

pub mod prelude {
	// Domain types - always available
	pub use crate::{
		FieldAttrs, FieldBatch, FieldKind, FieldOption, Form, FormError, FormField, FormResult,
		FormStore, FormSubmission, OwnerRef, Record, RecordId, SubmissionErrors, Validate,
		ValidationKind,
	};

	// External
	pub use serde::{Deserialize, Serialize};

	// Store feature - in-memory backend
	#[cfg(feature = "store")]
	pub use crate::MemoryStore;
}
