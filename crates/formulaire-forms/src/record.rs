//! Record identity and polymorphic ownership

use serde::{Deserialize, Serialize};

/// Identifier assigned by the backing store when a record is first saved.
pub type RecordId = i64;

/// Minimal persistence identity carried by every record kind.
pub trait Record {
	/// Stable type tag, used for polymorphic references and log output.
	fn record_kind() -> &'static str;

	fn id(&self) -> Option<RecordId>;

	fn set_id(&mut self, id: RecordId);

	/// A record is new until the store has assigned it an id.
	fn is_new_record(&self) -> bool {
		self.id().is_none()
	}
}

/// Reference to the arbitrary entity a form belongs to.
///
/// Forms can hang off any owning record (a page, an event, a campaign);
/// the owner is identified by its type tag plus id rather than a typed
/// foreign key.
///
/// # Examples
///
/// ```
/// use formulaire_forms::record::OwnerRef;
///
/// let owner = OwnerRef::new("event", 7);
/// assert_eq!(owner.kind, "event");
/// assert_eq!(owner.id, 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerRef {
	pub kind: String,
	pub id: RecordId,
}

impl OwnerRef {
	pub fn new(kind: impl Into<String>, id: RecordId) -> Self {
		Self {
			kind: kind.into(),
			id,
		}
	}
}
