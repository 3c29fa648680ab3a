//! Persistence port for forms and their submissions
//!
//! The domain stays storage-agnostic: operations that persist records
//! take a [`FormStore`] from the caller. The companion
//! `formulaire-store` crate ships the in-memory implementation used by
//! applications and tests.

use crate::error::FormResult;
use crate::form::Form;
use crate::record::RecordId;
use crate::submission::FormSubmission;

/// Backing store contract for forms, their field tree, and submissions.
///
/// Multi-record writes are atomic from the caller's point of view: a
/// declined save leaves the store untouched.
pub trait FormStore {
	/// Validate and persist a form together with its fields and
	/// options.
	///
	/// Assigns ids to the form and to any new fields or options,
	/// deletes persisted fields the form no longer carries (their
	/// options go with them), and refreshes the form's primary field
	/// collection in position order. A validation failure declines the
	/// save.
	fn save_form(&mut self, form: &mut Form) -> FormResult<()>;

	/// Load a form by id, primary field collection position-ordered and
	/// per-kind collections mirrored.
	fn find_form(&self, id: RecordId) -> Option<Form>;

	/// Every stored form, id-ordered.
	fn all_forms(&self) -> Vec<Form>;

	/// Stored forms with the active flag set, name-ordered.
	fn active_forms(&self) -> Vec<Form>;

	/// Delete a form, cascading to its fields, options, and
	/// submissions.
	fn delete_form(&mut self, id: RecordId) -> FormResult<()>;

	/// Persist a validated submission.
	///
	/// Declined when the submission already carries errors, references
	/// no form, or references a form the store does not hold.
	fn save_submission(&mut self, submission: &mut FormSubmission) -> FormResult<()>;

	/// Stored submissions for one form, newest first.
	fn submissions_for(&self, form_id: RecordId) -> Vec<FormSubmission>;
}
