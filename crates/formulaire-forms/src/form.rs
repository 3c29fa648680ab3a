//! Forms: named containers of typed fields plus their submissions

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, FormResult};
use crate::field::{FieldAttrs, FormField};
use crate::kind::FieldKind;
use crate::record::{OwnerRef, Record, RecordId};
use crate::store::FormStore;
use crate::submission::FormSubmission;
use crate::validate::Validate;

/// One reconciliation batch: field descriptors keyed by an opaque client
/// key.
///
/// Keys carry no meaning beyond ordering; descriptors are processed in
/// key order so reapplying a batch is deterministic.
pub type FieldBatch = BTreeMap<String, FieldAttrs>;

/// A named, orderable collection of field definitions, owned by an
/// arbitrary parent entity and accepting user submissions.
///
/// Fields live in one collection per kind; those collections are the
/// reconciliation surface for administrative edits. The primary
/// collection mirrors them in position order once the form has been
/// through a store, and [`Form::form_fields`] falls back to sorting the
/// per-kind collections while it is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
	pub id: Option<RecordId>,
	pub name: String,
	pub active: bool,
	pub formable: Option<OwnerRef>,
	kind_fields: BTreeMap<FieldKind, Vec<FormField>>,
	primary_fields: Vec<FormField>,
}

impl Form {
	/// Create a new, unsaved form. New forms start out active.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FormField;
	/// use formulaire_forms::form::Form;
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let mut form = Form::new("Contact us");
	/// form.add_field(FormField::new(FieldKind::TextField, "Your name").with_name("name"));
	///
	/// assert!(form.active);
	/// assert_eq!(form.field_count(), 1);
	/// ```
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			id: None,
			name: name.into(),
			active: true,
			formable: None,
			kind_fields: BTreeMap::new(),
			primary_fields: Vec::new(),
		}
	}

	/// Attach the form to its owning entity.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::form::Form;
	/// use formulaire_forms::record::OwnerRef;
	///
	/// let form = Form::new("RSVP").with_formable(OwnerRef::new("event", 12));
	/// assert_eq!(form.formable, Some(OwnerRef::new("event", 12)));
	/// ```
	pub fn with_formable(mut self, owner: OwnerRef) -> Self {
		self.formable = Some(owner);
		self
	}

	/// Append a field to its kind's collection.
	pub fn add_field(&mut self, field: FormField) {
		self.kind_fields.entry(field.kind()).or_default().push(field);
		self.primary_fields.clear();
	}

	/// Fields of one kind, in collection order.
	pub fn fields_of(&self, kind: FieldKind) -> &[FormField] {
		self.kind_fields
			.get(&kind)
			.map(Vec::as_slice)
			.unwrap_or(&[])
	}

	/// Mutable pass over every field, kind collections in registry
	/// order.
	///
	/// Clears the primary collection, since the cached ordering cannot
	/// be trusted once field state changes; stores refresh it after a
	/// save.
	pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut FormField> {
		self.primary_fields.clear();
		self.kind_fields
			.values_mut()
			.flat_map(|fields| fields.iter_mut())
	}

	/// The form's fields in display order.
	///
	/// The primary collection is returned as-is once a store has filled
	/// it. While it is empty (a freshly built form populated per kind),
	/// the per-kind collections are concatenated in registry order and
	/// sorted by position.
	pub fn form_fields(&self) -> Vec<&FormField> {
		if !self.primary_fields.is_empty() {
			return self.primary_fields.iter().collect();
		}
		let mut fields: Vec<&FormField> = FieldKind::ALL
			.iter()
			.filter_map(|kind| self.kind_fields.get(kind))
			.flat_map(|fields| fields.iter())
			.collect();
		fields.sort_by_key(|field| field.position);
		fields
	}

	/// Ordered field names: the stable attribute key set consumers use
	/// to build a submission value object.
	pub fn field_keys(&self) -> Vec<&str> {
		self.form_fields()
			.into_iter()
			.map(|field| field.name.as_str())
			.collect()
	}

	/// Look up a field by its submission name.
	pub fn get_field(&self, name: &str) -> Option<&FormField> {
		self.form_fields()
			.into_iter()
			.find(|field| field.name == name)
	}

	pub fn field_count(&self) -> usize {
		self.form_fields().len()
	}

	/// Rebuild the primary collection from the per-kind collections,
	/// position-ordered. Stores call this after loading or saving the
	/// field tree.
	pub fn refresh_primary_fields(&mut self) {
		let mut fields: Vec<FormField> = FieldKind::ALL
			.iter()
			.filter_map(|kind| self.kind_fields.get(kind))
			.flat_map(|fields| fields.iter())
			.cloned()
			.collect();
		fields.sort_by_key(|field| field.position);
		self.primary_fields = fields;
	}

	/// Reconcile one kind's field collection against a descriptor batch.
	///
	/// Descriptors carrying an `id` update the matching persisted field;
	/// descriptors without one build a new field of the batch's kind.
	/// When the form itself is still unsaved no persisted ids can exist,
	/// so the lookup path is skipped entirely and every descriptor
	/// builds. Once every descriptor has been applied, any field that
	/// was in the collection before the batch and was not referenced by
	/// id is dropped.
	///
	/// A descriptor referencing an id unknown to this kind's collection
	/// declines the whole batch and leaves the form untouched. Other
	/// kinds are never affected.
	///
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::field::FieldAttrs;
	/// use formulaire_forms::form::{FieldBatch, Form};
	/// use formulaire_forms::kind::FieldKind;
	///
	/// let mut form = Form::new("Survey");
	/// let mut batch = FieldBatch::new();
	/// batch.insert("0".into(), FieldAttrs::new().with_label("Age").numeric());
	///
	/// form.apply_field_batch(FieldKind::TextField, &batch).unwrap();
	/// assert_eq!(form.fields_of(FieldKind::TextField).len(), 1);
	/// ```
	pub fn apply_field_batch(&mut self, kind: FieldKind, batch: &FieldBatch) -> FormResult<()> {
		let ids_are_live = !self.is_new_record();
		let collection = self.kind_fields.entry(kind).or_default();

		// Reject unknown ids before touching anything, so a declined
		// batch has no effect.
		if ids_are_live {
			for attrs in batch.values() {
				if let Some(id) = attrs.id {
					if !collection.iter().any(|field| field.id == Some(id)) {
						return Err(FormError::UnknownFieldId { kind, id });
					}
				}
			}
		}

		let mut referenced: BTreeSet<RecordId> = BTreeSet::new();
		let mut built: Vec<FormField> = Vec::new();
		for attrs in batch.values() {
			match attrs.id {
				Some(id) if ids_are_live => {
					if let Some(field) = collection.iter_mut().find(|field| field.id == Some(id))
					{
						field.apply_attrs(attrs);
						referenced.insert(id);
					}
				}
				_ => {
					let mut field =
						FormField::new(kind, attrs.label.clone().unwrap_or_default());
					field.apply_attrs(attrs);
					built.push(field);
				}
			}
		}

		// Everything present before the batch and not referenced by id
		// goes away, unsaved leftovers included.
		let before = collection.len();
		collection.retain(|field| field.id.is_some_and(|id| referenced.contains(&id)));
		let deleted = before - collection.len();
		let created = built.len();
		collection.append(&mut built);
		self.primary_fields.clear();
		tracing::debug!(
			%kind,
			created,
			updated = referenced.len(),
			deleted,
			"reconciled field batch"
		);
		Ok(())
	}

	/// Validate a submission's values against every field.
	///
	/// Previous errors are cleared first; each field then appends one
	/// message per violated rule under its name.
	pub fn validate_submission(&self, submission: &mut FormSubmission) {
		submission.clear_errors();
		for field in self.form_fields() {
			field.validate_submission(submission);
		}
	}

	/// Build, validate, and save a submission from a flat attribute
	/// mapping.
	///
	/// The submission is always returned; callers inspect its error
	/// state. Content violations leave it unsaved with field-keyed
	/// messages, and a store decline (an unsaved form, for instance) is
	/// recorded under the `form` key. A valid submission comes back with
	/// its store-assigned id.
	pub fn submit(
		&self,
		store: &mut dyn FormStore,
		attrs: HashMap<String, Value>,
	) -> FormSubmission {
		let mut submission = self.build_submission(attrs);
		self.validate_submission(&mut submission);
		if submission.has_errors() {
			tracing::debug!(
				form = ?self.id,
				errors = submission.errors().total(),
				"submission declined"
			);
			return submission;
		}
		if let Err(error) = store.save_submission(&mut submission) {
			tracing::warn!(form = ?self.id, %error, "submission save declined");
			submission.add_error("form", error.to_string());
		}
		submission
	}

	/// Like [`Form::submit`], but a declined save is a hard error.
	///
	/// Content violations surface as
	/// [`FormError::SubmissionRejected`] carrying the accumulated
	/// messages; store preconditions propagate as-is. Nothing is
	/// persisted on failure.
	pub fn submit_strict(
		&self,
		store: &mut dyn FormStore,
		attrs: HashMap<String, Value>,
	) -> FormResult<FormSubmission> {
		let mut submission = self.build_submission(attrs);
		self.validate_submission(&mut submission);
		if submission.has_errors() {
			return Err(FormError::SubmissionRejected(submission.errors().clone()));
		}
		store.save_submission(&mut submission)?;
		Ok(submission)
	}

	fn build_submission(&self, attrs: HashMap<String, Value>) -> FormSubmission {
		let mut submission = FormSubmission::new();
		submission.form_id = self.id;
		for (name, value) in attrs {
			submission.set_value(name, value);
		}
		submission
	}
}

impl Record for Form {
	fn record_kind() -> &'static str {
		"form"
	}

	fn id(&self) -> Option<RecordId> {
		self.id
	}

	fn set_id(&mut self, id: RecordId) {
		self.id = Some(id);
	}
}

impl Validate for Form {
	/// A form needs a non-blank name before it can be saved.
	fn validate(&mut self) -> FormResult<()> {
		if self.name.trim().is_empty() {
			return Err(FormError::BlankName);
		}
		Ok(())
	}
}
