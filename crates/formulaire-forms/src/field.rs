//! Field definitions: one typed, validated input within a form

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::{FormError, FormResult};
use crate::kind::{FieldKind, ValidationKind};
use crate::record::{Record, RecordId};
use crate::submission::FormSubmission;
use crate::validate::{self, Validate};

/// One selectable label/value pair owned by a selector field.
///
/// Labels and values are currently always equal; the pair is kept so the
/// two can diverge later without reshaping stored data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
	pub id: Option<RecordId>,
	pub label: String,
	pub value: String,
	pub position: i32,
}

impl FieldOption {
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FieldOption;
	///
	/// let option = FieldOption::new("Red", 0);
	/// assert_eq!(option.label, "Red");
	/// assert_eq!(option.value, "Red");
	/// assert_eq!(option.position, 0);
	/// ```
	pub fn new(label: impl Into<String>, position: i32) -> Self {
		let label = label.into();
		Self {
			id: None,
			value: label.clone(),
			label,
			position,
		}
	}
}

impl Record for FieldOption {
	fn record_kind() -> &'static str {
		"form_field_option"
	}

	fn id(&self) -> Option<RecordId> {
		self.id
	}

	fn set_id(&mut self, id: RecordId) {
		self.id = Some(id);
	}
}

/// Attribute updates carried by one reconciliation descriptor.
///
/// Only attributes that are present are applied. An `id` marks the
/// descriptor as targeting an already-persisted field; it is never copied
/// onto the field itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldAttrs {
	pub id: Option<RecordId>,
	pub label: Option<String>,
	pub name: Option<String>,
	pub required: Option<bool>,
	pub number: Option<bool>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub position: Option<i32>,
	pub options_string: Option<String>,
}

impl FieldAttrs {
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FieldAttrs;
	///
	/// let attrs = FieldAttrs::new().with_label("Age").numeric().with_position(2);
	/// assert_eq!(attrs.label.as_deref(), Some("Age"));
	/// assert_eq!(attrs.number, Some(true));
	/// assert_eq!(attrs.required, None);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_id(mut self, id: RecordId) -> Self {
		self.id = Some(id);
		self
	}

	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	pub fn required(mut self) -> Self {
		self.required = Some(true);
		self
	}

	pub fn numeric(mut self) -> Self {
		self.number = Some(true);
		self
	}

	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	pub fn with_position(mut self, position: i32) -> Self {
		self.position = Some(position);
		self
	}

	pub fn with_options_string(mut self, options_string: impl Into<String>) -> Self {
		self.options_string = Some(options_string.into());
		self
	}
}

/// One typed, validated input definition within a form.
///
/// The kind is fixed at construction. The `name` identifies the field's
/// value in a submission and is derived from the label on the first
/// validation pass when left blank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
	pub id: Option<RecordId>,
	kind: FieldKind,
	pub label: String,
	pub name: String,
	pub required: bool,
	pub number: bool,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	pub position: i32,
	pub options: Vec<FieldOption>,
}

impl FormField {
	/// Create a new field of the given kind.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let field = FormField::new(FieldKind::TextField, "Your name");
	/// assert_eq!(field.kind(), FieldKind::TextField);
	/// assert_eq!(field.label, "Your name");
	/// assert!(!field.required);
	/// ```
	pub fn new(kind: FieldKind, label: impl Into<String>) -> Self {
		Self {
			id: None,
			kind,
			label: label.into(),
			name: String::new(),
			required: false,
			number: false,
			max_length: None,
			min_length: None,
			position: 0,
			options: Vec::new(),
		}
	}

	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	/// Set the field as required
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let field = FormField::new(FieldKind::TextField, "Name").required();
	/// assert!(field.required);
	/// ```
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Require the submitted value to match the numeric pattern
	pub fn numeric(mut self) -> Self {
		self.number = true;
		self
	}

	/// Set the submission key for the field
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Set the maximum length for the field
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let field = FormField::new(FieldKind::TextField, "Name").with_max_length(100);
	/// assert_eq!(field.max_length, Some(100));
	/// ```
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Set the minimum length for the field
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	/// Set the display position for the field
	pub fn with_position(mut self, position: i32) -> Self {
		self.position = position;
		self
	}

	/// Build the option list from a comma-delimited string
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let field = FormField::new(FieldKind::Select, "Color")
	/// 	.with_options_string("Red, Green, Blue");
	/// assert_eq!(field.options.len(), 3);
	/// ```
	pub fn with_options_string(mut self, raw: impl AsRef<str>) -> Self {
		self.set_options_string(raw.as_ref());
		self
	}

	/// Ordered view of the field's options, by position then label.
	pub fn sorted_options(&self) -> Vec<&FieldOption> {
		let mut options: Vec<&FieldOption> = self.options.iter().collect();
		options.sort_by(|a, b| {
			a.position
				.cmp(&b.position)
				.then_with(|| a.label.cmp(&b.label))
		});
		options
	}

	/// Option labels joined as a single editable string.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let field = FormField::new(FieldKind::Select, "Color")
	/// 	.with_options_string("Red, Green , Blue");
	/// assert_eq!(field.options_string(), "Red, Green, Blue");
	/// ```
	pub fn options_string(&self) -> String {
		self.sorted_options()
			.iter()
			.map(|option| option.label.as_str())
			.collect::<Vec<_>>()
			.join(", ")
	}

	/// Replace the option list from a comma-delimited string.
	///
	/// Existing options are discarded. Trailing empty pieces are ignored;
	/// every remaining piece is trimmed and becomes one option with
	/// `value == label` and its split index as position.
	pub fn set_options_string(&mut self, raw: &str) {
		let mut pieces: Vec<&str> = raw.split(',').collect();
		while pieces.last().is_some_and(|piece| piece.is_empty()) {
			pieces.pop();
		}
		self.options = pieces
			.iter()
			.enumerate()
			.map(|(index, piece)| FieldOption::new(piece.trim(), index as i32))
			.collect();
	}

	/// Apply the attribute updates a reconciliation descriptor carries.
	pub fn apply_attrs(&mut self, attrs: &FieldAttrs) {
		if let Some(label) = &attrs.label {
			self.label = label.clone();
		}
		if let Some(name) = &attrs.name {
			self.name = name.clone();
		}
		if let Some(required) = attrs.required {
			self.required = required;
		}
		if let Some(number) = attrs.number {
			self.number = number;
		}
		if let Some(max_length) = attrs.max_length {
			self.max_length = Some(max_length);
		}
		if let Some(min_length) = attrs.min_length {
			self.min_length = Some(min_length);
		}
		if let Some(position) = attrs.position {
			self.position = position;
		}
		if let Some(options_string) = &attrs.options_string {
			self.set_options_string(options_string);
		}
	}

	/// Derive a name from the label and the current time when none is
	/// set.
	///
	/// The name is stable once assigned: repeated calls never overwrite
	/// it. Collisions are possible but vanishingly unlikely.
	pub fn ensure_name(&mut self) {
		if self.name.trim().is_empty() {
			let digest = Sha256::digest(format!("{}{}", self.label, Utc::now()));
			self.name = format!("field_{}", &hex::encode(digest)[..20]);
		}
	}

	/// Check the submission's value for this field against every rule its
	/// kind allows, appending one formatted message per violation under
	/// the field's name.
	///
	/// Multiple violations accumulate; nothing short-circuits.
	pub fn validate_submission(&self, submission: &mut FormSubmission) {
		let value = submission.value(&self.name).cloned();
		for validation in ValidationKind::ALL {
			if !self.kind.allows_validation(validation) {
				continue;
			}
			if let Some(message) = self.error_for_value(validation, value.as_ref()) {
				tracing::debug!(field = %self.name, %validation, "adding error: {}", message);
				submission.add_error(self.name.clone(), message);
			}
		}
	}

	/// The violation message for one rule against one value, if any.
	fn error_for_value(&self, validation: ValidationKind, value: Option<&Value>) -> Option<String> {
		match validation {
			ValidationKind::Required => (self.required && validate::is_blank(value))
				.then(|| format!("{} cannot be blank.", self.name)),
			ValidationKind::Number => {
				if !self.number || validate::is_blank(value) {
					return None;
				}
				let text = validate::value_text(value?);
				(!validate::is_number(&text)).then(|| format!("{} must be a number.", self.name))
			}
			ValidationKind::MaxLength => {
				let max_length = self.max_length?;
				if validate::is_blank(value) {
					return None;
				}
				(validate::value_length(value) > max_length).then(|| {
					format!(
						"{} must be less than {} characters long.",
						self.name, max_length
					)
				})
			}
			ValidationKind::MinLength => {
				// blank values still violate a positive minimum
				let min_length = self.min_length?;
				(validate::value_length(value) < min_length).then(|| {
					format!(
						"{} must be greater than {} characters long.",
						self.name, min_length
					)
				})
			}
		}
	}
}

impl Record for FormField {
	fn record_kind() -> &'static str {
		"form_field"
	}

	fn id(&self) -> Option<RecordId> {
		self.id
	}

	fn set_id(&mut self, id: RecordId) {
		self.id = Some(id);
	}
}

impl Validate for FormField {
	/// Assigns a generated name when blank, then checks presence.
	fn validate(&mut self) -> FormResult<()> {
		self.ensure_name();
		if self.name.trim().is_empty() {
			return Err(FormError::BlankName);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[test]
	fn test_options_string_round_trip() {
		let mut field = FormField::new(FieldKind::Select, "Color");
		field.set_options_string("Red, Green , Blue");

		assert_eq!(field.options.len(), 3);
		for (index, expected) in ["Red", "Green", "Blue"].iter().enumerate() {
			let option = &field.options[index];
			assert_eq!(option.label, *expected);
			assert_eq!(option.value, option.label);
			assert_eq!(option.position, index as i32);
		}
		assert_eq!(field.options_string(), "Red, Green, Blue");
	}

	#[rstest]
	#[case("", 0)]
	#[case("a,,", 1)]
	#[case("a,b,", 2)]
	#[case("a,,b", 3)]
	fn test_options_string_drops_trailing_empty_pieces(
		#[case] raw: &str,
		#[case] expected_count: usize,
	) {
		// Arrange
		let mut field = FormField::new(FieldKind::Select, "Color");

		// Act
		field.set_options_string(raw);

		// Assert
		assert_eq!(
			field.options.len(),
			expected_count,
			"Expected {raw:?} to produce {expected_count} options"
		);
	}

	#[test]
	fn test_set_options_string_discards_existing_options() {
		let mut field = FormField::new(FieldKind::Select, "Color")
			.with_options_string("Red, Green, Blue");
		field.set_options_string("Cyan");

		assert_eq!(field.options.len(), 1);
		assert_eq!(field.options_string(), "Cyan");
	}

	#[test]
	fn test_sorted_options_order_by_position_then_label() {
		let mut field = FormField::new(FieldKind::Select, "Color");
		field.options = vec![
			FieldOption {
				position: 1,
				..FieldOption::new("Zed", 0)
			},
			FieldOption::new("Beta", 0),
			FieldOption::new("Alpha", 0),
		];

		let labels: Vec<&str> = field
			.sorted_options()
			.iter()
			.map(|option| option.label.as_str())
			.collect();
		assert_eq!(labels, ["Alpha", "Beta", "Zed"]);
	}

	#[test]
	fn test_ensure_name_generates_a_stable_prefixed_name() {
		let mut field = FormField::new(FieldKind::TextField, "Email");
		field.ensure_name();

		let first = field.name.clone();
		assert!(first.starts_with("field_"));
		assert_eq!(first.len(), "field_".len() + 20);

		field.ensure_name();
		assert_eq!(field.name, first);
	}

	#[test]
	fn test_ensure_name_keeps_an_explicit_name() {
		let mut field = FormField::new(FieldKind::TextField, "Email").with_name("email");
		field.ensure_name();
		assert_eq!(field.name, "email");
	}

	#[test]
	fn test_validate_fills_in_a_blank_name() {
		let mut field = FormField::new(FieldKind::TextField, "Email");
		field.validate().unwrap();
		assert!(!field.name.is_empty());
	}

	#[test]
	fn test_apply_attrs_touches_only_present_attributes() {
		let mut field = FormField::new(FieldKind::TextField, "Name")
			.with_name("name")
			.required()
			.with_max_length(50);

		field.apply_attrs(
			&FieldAttrs::new()
				.with_label("Full name")
				.with_position(4)
				.with_min_length(2),
		);

		assert_eq!(field.label, "Full name");
		assert_eq!(field.position, 4);
		assert_eq!(field.min_length, Some(2));
		// untouched
		assert_eq!(field.name, "name");
		assert!(field.required);
		assert_eq!(field.max_length, Some(50));
		assert_eq!(field.id, None);
	}

	#[test]
	fn test_apply_attrs_never_copies_the_descriptor_id() {
		let mut field = FormField::new(FieldKind::TextField, "Name");
		field.apply_attrs(&FieldAttrs::new().with_id(9).with_label("Other"));
		assert_eq!(field.id, None);
	}

	#[test]
	fn test_apply_attrs_can_unset_flags() {
		let mut field = FormField::new(FieldKind::TextField, "Name").required().numeric();

		let mut attrs = FieldAttrs::new();
		attrs.required = Some(false);
		attrs.number = Some(false);
		field.apply_attrs(&attrs);

		assert!(!field.required);
		assert!(!field.number);
	}

	#[test]
	fn test_apply_attrs_rebuilds_options_from_the_string() {
		let mut field = FormField::new(FieldKind::Select, "Color").with_options_string("Red");
		field.apply_attrs(&FieldAttrs::new().with_options_string("Green, Blue"));

		assert_eq!(field.options_string(), "Green, Blue");
	}
}
