//! Field kind registry and validation rule identifiers
//!
//! Every field carries one of five fixed kinds, set at construction and
//! immutable afterwards. The kind decides whether the field draws its value
//! from a predefined option list, whether a submitted value is a collection,
//! and which validation rules may run against it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// The fixed set of field kinds a form can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	TextField,
	TextArea,
	Select,
	CheckBox,
	CheckBoxGroup,
}

impl FieldKind {
	/// Every field kind, in canonical registry order.
	pub const ALL: [FieldKind; 5] = [
		FieldKind::TextField,
		FieldKind::TextArea,
		FieldKind::Select,
		FieldKind::CheckBox,
		FieldKind::CheckBoxGroup,
	];

	/// Stable string tag for this kind.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::kind::FieldKind;
	///
	/// assert_eq!(FieldKind::TextField.as_str(), "text_field");
	/// assert_eq!(FieldKind::CheckBoxGroup.as_str(), "check_box_group");
	/// ```
	pub fn as_str(&self) -> &'static str {
		match self {
			FieldKind::TextField => "text_field",
			FieldKind::TextArea => "text_area",
			FieldKind::Select => "select",
			FieldKind::CheckBox => "check_box",
			FieldKind::CheckBoxGroup => "check_box_group",
		}
	}

	/// Whether a submitted value for this kind is a collection of
	/// responses rather than a scalar.
	pub fn has_many_responses(&self) -> bool {
		matches!(self, FieldKind::CheckBoxGroup)
	}

	/// Whether this kind draws its value from a predefined option list.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::kind::FieldKind;
	///
	/// assert!(FieldKind::Select.is_selector());
	/// assert!(FieldKind::CheckBoxGroup.is_selector());
	/// assert!(!FieldKind::TextField.is_selector());
	/// ```
	pub fn is_selector(&self) -> bool {
		matches!(self, FieldKind::Select | FieldKind::CheckBoxGroup)
	}

	/// Whether the given validation rule applies to fields of this kind.
	///
	/// Free-text kinds accept every rule. Selectors skip the length rules
	/// since their values are constrained to predefined options, and
	/// checkboxes only ever check presence.
	pub fn allows_validation(&self, validation: ValidationKind) -> bool {
		match self {
			FieldKind::TextField | FieldKind::TextArea => true,
			FieldKind::Select => {
				matches!(validation, ValidationKind::Required | ValidationKind::Number)
			}
			FieldKind::CheckBox | FieldKind::CheckBoxGroup => {
				matches!(validation, ValidationKind::Required)
			}
		}
	}
}

impl fmt::Display for FieldKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for FieldKind {
	type Err = FormError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"text_field" => Ok(FieldKind::TextField),
			"text_area" => Ok(FieldKind::TextArea),
			"select" => Ok(FieldKind::Select),
			"check_box" => Ok(FieldKind::CheckBox),
			"check_box_group" => Ok(FieldKind::CheckBoxGroup),
			other => Err(FormError::UnknownKind(other.to_string())),
		}
	}
}

/// The four validation rules a field can be configured with, in the order
/// they are evaluated against a submitted value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationKind {
	Required,
	Number,
	MaxLength,
	MinLength,
}

impl ValidationKind {
	/// Every validation rule, in evaluation order.
	pub const ALL: [ValidationKind; 4] = [
		ValidationKind::Required,
		ValidationKind::Number,
		ValidationKind::MaxLength,
		ValidationKind::MinLength,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			ValidationKind::Required => "required",
			ValidationKind::Number => "number",
			ValidationKind::MaxLength => "max_length",
			ValidationKind::MinLength => "min_length",
		}
	}
}

impl fmt::Display for ValidationKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(FieldKind::TextField, "text_field")]
	#[case(FieldKind::TextArea, "text_area")]
	#[case(FieldKind::Select, "select")]
	#[case(FieldKind::CheckBox, "check_box")]
	#[case(FieldKind::CheckBoxGroup, "check_box_group")]
	fn test_kind_round_trips_through_its_tag(#[case] kind: FieldKind, #[case] tag: &str) {
		// Arrange & Act & Assert
		assert_eq!(kind.as_str(), tag);
		assert_eq!(tag.parse::<FieldKind>().unwrap(), kind);
		assert_eq!(kind.to_string(), tag);
	}

	#[test]
	fn test_unknown_tag_is_rejected() {
		let parsed = "radio".parse::<FieldKind>();
		assert!(matches!(parsed, Err(FormError::UnknownKind(tag)) if tag == "radio"));
	}

	#[test]
	fn test_registry_lists_every_kind_once() {
		assert_eq!(FieldKind::ALL.len(), 5);
		for kind in FieldKind::ALL {
			assert_eq!(
				FieldKind::ALL.iter().filter(|k| **k == kind).count(),
				1,
				"Expected {kind} to appear exactly once in the registry"
			);
		}
	}

	#[rstest]
	#[case(FieldKind::TextField, false, false)]
	#[case(FieldKind::TextArea, false, false)]
	#[case(FieldKind::Select, false, true)]
	#[case(FieldKind::CheckBox, false, false)]
	#[case(FieldKind::CheckBoxGroup, true, true)]
	fn test_kind_capabilities(
		#[case] kind: FieldKind,
		#[case] many_responses: bool,
		#[case] selector: bool,
	) {
		assert_eq!(kind.has_many_responses(), many_responses);
		assert_eq!(kind.is_selector(), selector);
	}

	#[rstest]
	#[case(FieldKind::TextField, &[true, true, true, true])]
	#[case(FieldKind::TextArea, &[true, true, true, true])]
	#[case(FieldKind::Select, &[true, true, false, false])]
	#[case(FieldKind::CheckBox, &[true, false, false, false])]
	#[case(FieldKind::CheckBoxGroup, &[true, false, false, false])]
	fn test_allowed_validations_per_kind(#[case] kind: FieldKind, #[case] allowed: &[bool; 4]) {
		for (validation, expected) in ValidationKind::ALL.iter().zip(allowed) {
			assert_eq!(
				kind.allows_validation(*validation),
				*expected,
				"Expected {kind} to {} {validation}",
				if *expected { "allow" } else { "skip" }
			);
		}
	}

	#[test]
	fn test_validation_rules_keep_their_evaluation_order() {
		let tags: Vec<&str> = ValidationKind::ALL.iter().map(|v| v.as_str()).collect();
		assert_eq!(tags, ["required", "number", "max_length", "min_length"]);
	}

	#[test]
	fn test_kind_serializes_as_snake_case() {
		let json = serde_json::to_string(&FieldKind::CheckBoxGroup).unwrap();
		assert_eq!(json, "\"check_box_group\"");
		let back: FieldKind = serde_json::from_str(&json).unwrap();
		assert_eq!(back, FieldKind::CheckBoxGroup);
	}
}
