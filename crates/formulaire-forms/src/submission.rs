//! Form submissions and their accumulated validation errors

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{Record, RecordId};

/// Validation messages accumulated on a submission, keyed by field name.
///
/// Messages for one field keep the order the rules produced them in; a
/// submission may carry errors for several fields at once.
///
/// # Examples
///
/// ```
/// use formulaire_forms::submission::SubmissionErrors;
///
/// let mut errors = SubmissionErrors::new();
/// errors.add("age", "age must be a number.");
/// errors.add("age", "age must be greater than 2 characters long.");
///
/// assert_eq!(errors.on("age").map(|msgs| msgs.len()), Some(2));
/// assert!(errors.on("name").is_none());
/// assert_eq!(errors.total(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmissionErrors {
	errors: HashMap<String, Vec<String>>,
}

impl SubmissionErrors {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a message under the given field name.
	pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.errors
			.entry(field.into())
			.or_default()
			.push(message.into());
	}

	/// Messages recorded for one field, in the order they were added.
	pub fn on(&self, field: &str) -> Option<&[String]> {
		self.errors.get(field).map(|messages| messages.as_slice())
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Total message count across all fields.
	pub fn total(&self) -> usize {
		self.errors.values().map(|messages| messages.len()).sum()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
		self.errors
			.iter()
			.map(|(field, messages)| (field.as_str(), messages.as_slice()))
	}

	/// Every message, grouped by field name in sorted order for stable
	/// output.
	pub fn full_messages(&self) -> Vec<String> {
		let mut fields: Vec<&String> = self.errors.keys().collect();
		fields.sort();
		fields
			.into_iter()
			.flat_map(|field| self.errors[field].iter().cloned())
			.collect()
	}

	pub(crate) fn clear(&mut self) {
		self.errors.clear();
	}
}

impl fmt::Display for SubmissionErrors {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.full_messages().join("; "))
	}
}

/// One user's recorded answers against a form's fields.
///
/// Values are keyed by field name. A submission is built once per user
/// submission and not edited afterwards; validation writes only to the
/// error collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
	pub id: Option<RecordId>,
	pub form_id: Option<RecordId>,
	values: HashMap<String, Value>,
	pub submitted_at: DateTime<Utc>,
	errors: SubmissionErrors,
}

impl FormSubmission {
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::submission::FormSubmission;
	/// use serde_json::json;
	///
	/// let mut submission = FormSubmission::new();
	/// submission.set_value("name", json!("Jane"));
	///
	/// assert_eq!(submission.value("name"), Some(&json!("Jane")));
	/// assert!(!submission.has_errors());
	/// ```
	pub fn new() -> Self {
		Self {
			id: None,
			form_id: None,
			values: HashMap::new(),
			submitted_at: Utc::now(),
			errors: SubmissionErrors::new(),
		}
	}

	/// Submission bound to a persisted form.
	pub fn for_form(form_id: RecordId) -> Self {
		Self {
			form_id: Some(form_id),
			..Self::new()
		}
	}

	/// Stored value for a field name.
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn set_value(&mut self, name: impl Into<String>, value: Value) {
		self.values.insert(name.into(), value);
	}

	pub fn values(&self) -> &HashMap<String, Value> {
		&self.values
	}

	pub fn errors(&self) -> &SubmissionErrors {
		&self.errors
	}

	pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
		self.errors.add(field, message);
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub(crate) fn clear_errors(&mut self) {
		self.errors.clear();
	}
}

impl Default for FormSubmission {
	fn default() -> Self {
		Self::new()
	}
}

impl Record for FormSubmission {
	fn record_kind() -> &'static str {
		"form_submission"
	}

	fn id(&self) -> Option<RecordId> {
		self.id
	}

	fn set_id(&mut self, id: RecordId) {
		self.id = Some(id);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_errors_keep_per_field_message_order() {
		let mut errors = SubmissionErrors::new();
		errors.add("age", "age cannot be blank.");
		errors.add("age", "age must be greater than 3 characters long.");

		assert_eq!(
			errors.on("age"),
			Some(
				&[
					"age cannot be blank.".to_string(),
					"age must be greater than 3 characters long.".to_string(),
				][..]
			)
		);
	}

	#[test]
	fn test_full_messages_sort_by_field_name() {
		let mut errors = SubmissionErrors::new();
		errors.add("zip", "zip must be a number.");
		errors.add("age", "age cannot be blank.");

		assert_eq!(
			errors.full_messages(),
			["age cannot be blank.", "zip must be a number."]
		);
		assert_eq!(
			errors.to_string(),
			"age cannot be blank.; zip must be a number."
		);
	}

	#[test]
	fn test_submission_stores_values_by_field_name() {
		let mut submission = FormSubmission::for_form(3);
		submission.set_value("name", json!("Jane"));
		submission.set_value("colors", json!(["red", "blue"]));

		assert_eq!(submission.form_id, Some(3));
		assert_eq!(submission.value("name"), Some(&json!("Jane")));
		assert_eq!(submission.value("colors"), Some(&json!(["red", "blue"])));
		assert_eq!(submission.value("missing"), None);
		assert_eq!(submission.values().len(), 2);
	}

	#[test]
	fn test_clearing_errors_resets_the_collection() {
		let mut submission = FormSubmission::new();
		submission.add_error("name", "name cannot be blank.");
		assert!(submission.has_errors());
		assert_eq!(submission.errors().total(), 1);

		submission.clear_errors();
		assert!(!submission.has_errors());
	}
}
