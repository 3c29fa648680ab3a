//! Submission value checks shared across field kinds
//!
//! Blankness, textual rendering, and the numeric pattern live here; the
//! per-rule dispatch sits on [`FormField`](crate::field::FormField).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::FormResult;

// Numeric value pattern.
//
// Accepts an optional leading sign, one or more digits with optional
// thousands separators, and an optional decimal point with trailing
// digits.
static NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[+-]?[\d,]+\.?\d*$").expect("NUMBER_REGEX: invalid regex pattern")
});

/// Structural validation run by the store before a record is persisted.
///
/// A failed validation declines the save; it never panics.
pub trait Validate {
	fn validate(&mut self) -> FormResult<()>;
}

/// Whether a submitted value counts as blank.
///
/// Blank values are: an absent entry, JSON null, a string containing only
/// whitespace, and an empty array (the collection value of a checkbox
/// group).
///
/// # Examples
///
/// ```
/// use formulaire_forms::validate::is_blank;
/// use serde_json::json;
///
/// assert!(is_blank(None));
/// assert!(is_blank(Some(&json!("   "))));
/// assert!(is_blank(Some(&json!([]))));
/// assert!(!is_blank(Some(&json!("x"))));
/// assert!(!is_blank(Some(&json!(0))));
/// ```
pub fn is_blank(value: Option<&Value>) -> bool {
	match value {
		None | Some(Value::Null) => true,
		Some(Value::String(s)) => s.trim().is_empty(),
		Some(Value::Array(items)) => items.is_empty(),
		Some(_) => false,
	}
}

/// Textual rendering of a submitted value, as seen by the pattern and
/// length rules. Strings are taken as-is, untrimmed; everything else
/// renders as its JSON serialization.
pub fn value_text(value: &Value) -> Cow<'_, str> {
	match value {
		Value::String(s) => Cow::Borrowed(s.as_str()),
		other => Cow::Owned(other.to_string()),
	}
}

/// Character count of a submitted value's text. Absent and null values
/// count as zero.
pub fn value_length(value: Option<&Value>) -> usize {
	match value {
		None | Some(Value::Null) => 0,
		Some(value) => value_text(value).chars().count(),
	}
}

/// Whether the text matches the numeric pattern.
///
/// # Examples
///
/// ```
/// use formulaire_forms::validate::is_number;
///
/// assert!(is_number("123"));
/// assert!(is_number("-1,000.25"));
/// assert!(!is_number("12a"));
/// ```
pub fn is_number(text: &str) -> bool {
	NUMBER_REGEX.is_match(text)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case("123", true)]
	#[case("+123", true)]
	#[case("-123", true)]
	#[case("1,000", true)]
	#[case("12.5", true)]
	#[case("123.", true)]
	#[case("0", true)]
	#[case("", false)]
	#[case(".5", false)]
	#[case("12a", false)]
	#[case("a12", false)]
	#[case("1 000", false)]
	#[case("12.5.6", false)]
	#[case("+-12", false)]
	fn test_numeric_pattern(#[case] text: &str, #[case] expected: bool) {
		// Arrange & Act & Assert
		assert_eq!(
			is_number(text),
			expected,
			"Expected is_number({text:?}) to be {expected}"
		);
	}

	#[rstest]
	#[case(json!(12.5), "12.5")]
	#[case(json!(42), "42")]
	#[case(json!(true), "true")]
	#[case(json!("plain"), "plain")]
	#[case(json!("  padded  "), "  padded  ")]
	fn test_value_text_rendering(#[case] value: serde_json::Value, #[case] expected: &str) {
		assert_eq!(value_text(&value), expected);
	}

	#[test]
	fn test_value_length_counts_characters_not_bytes() {
		assert_eq!(value_length(Some(&json!("héllo"))), 5);
		assert_eq!(value_length(Some(&json!("こんにちは"))), 5);
		assert_eq!(value_length(None), 0);
		assert_eq!(value_length(Some(&serde_json::Value::Null)), 0);
		assert_eq!(value_length(Some(&json!("  "))), 2);
	}

	proptest! {
		#[test]
		fn test_digit_strings_always_match(text in "[0-9]{1,12}") {
			prop_assert!(is_number(&text));
		}

		#[test]
		fn test_strings_containing_letters_never_match(text in "[0-9]{0,4}[a-z]+[0-9]{0,4}") {
			prop_assert!(!is_number(&text));
		}

		#[test]
		fn test_signed_decimals_always_match(
			sign in "[+-]?",
			whole in "[0-9]{1,6}",
			frac in "[0-9]{0,4}",
		) {
			let text = format!("{sign}{whole}.{frac}");
			prop_assert!(is_number(&text));
		}
	}
}
