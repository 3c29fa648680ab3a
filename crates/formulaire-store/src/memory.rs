//! Map-backed implementation of the form store port

use std::collections::BTreeMap;

use formulaire_forms::{
	Form, FormError, FormResult, FormStore, FormSubmission, Record, RecordId, Validate,
};

/// [`FormStore`] backed by in-process maps.
///
/// Every write is checked up front and then applied as a single map
/// operation per record tree, which gives the atomic multi-record
/// grouping the domain expects without a transaction log. Ids come from
/// one monotonically increasing counter shared by all record kinds.
#[derive(Debug, Default)]
pub struct MemoryStore {
	forms: BTreeMap<RecordId, Form>,
	submissions: BTreeMap<RecordId, FormSubmission>,
	next_id: RecordId,
}

impl MemoryStore {
	/// # Examples
	///
	/// ```
	/// use formulaire_forms::{Form, FormStore};
	/// use formulaire_store::MemoryStore;
	///
	/// let mut store = MemoryStore::new();
	/// let mut form = Form::new("Contact");
	///
	/// store.save_form(&mut form).unwrap();
	/// assert!(form.id.is_some());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	fn allocate_id(&mut self) -> RecordId {
		self.next_id += 1;
		self.next_id
	}
}

impl FormStore for MemoryStore {
	fn save_form(&mut self, form: &mut Form) -> FormResult<()> {
		// Validate the whole tree before touching the maps, so a
		// declined save leaves the store as it was.
		form.validate()?;
		for field in form.fields_mut() {
			field.validate()?;
		}

		let id = match form.id() {
			Some(existing) => existing,
			None => {
				let id = self.allocate_id();
				form.set_id(id);
				id
			}
		};
		for field in form.fields_mut() {
			if field.is_new_record() {
				let field_id = self.allocate_id();
				field.set_id(field_id);
			}
			for option in &mut field.options {
				if option.is_new_record() {
					let option_id = self.allocate_id();
					option.set_id(option_id);
				}
			}
		}
		form.refresh_primary_fields();

		// Replacing the snapshot drops fields removed by
		// reconciliation, their options with them.
		self.forms.insert(id, form.clone());
		tracing::debug!(form = id, fields = form.field_count(), "saved form");
		Ok(())
	}

	fn find_form(&self, id: RecordId) -> Option<Form> {
		self.forms.get(&id).cloned()
	}

	fn all_forms(&self) -> Vec<Form> {
		self.forms.values().cloned().collect()
	}

	fn active_forms(&self) -> Vec<Form> {
		let mut forms: Vec<Form> = self
			.forms
			.values()
			.filter(|form| form.active)
			.cloned()
			.collect();
		forms.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
		forms
	}

	fn delete_form(&mut self, id: RecordId) -> FormResult<()> {
		if self.forms.remove(&id).is_none() {
			return Err(FormError::FormNotFound(id));
		}
		self.submissions
			.retain(|_, submission| submission.form_id != Some(id));
		tracing::debug!(form = id, "deleted form and its submissions");
		Ok(())
	}

	fn save_submission(&mut self, submission: &mut FormSubmission) -> FormResult<()> {
		if submission.has_errors() {
			return Err(FormError::SubmissionRejected(submission.errors().clone()));
		}
		let form_id = submission.form_id.ok_or(FormError::UnsavedForm)?;
		if !self.forms.contains_key(&form_id) {
			return Err(FormError::FormNotFound(form_id));
		}
		let id = match submission.id() {
			Some(existing) => existing,
			None => {
				let id = self.allocate_id();
				submission.set_id(id);
				id
			}
		};
		self.submissions.insert(id, submission.clone());
		Ok(())
	}

	fn submissions_for(&self, form_id: RecordId) -> Vec<FormSubmission> {
		let mut submissions: Vec<FormSubmission> = self
			.submissions
			.values()
			.filter(|submission| submission.form_id == Some(form_id))
			.cloned()
			.collect();
		submissions.sort_by(|a, b| {
			b.submitted_at
				.cmp(&a.submitted_at)
				.then(b.id().cmp(&a.id()))
		});
		submissions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_find_form_misses_return_none() {
		let store = MemoryStore::new();
		assert!(store.find_form(7).is_none());
	}

	#[test]
	fn test_delete_unknown_form_is_an_error() {
		let mut store = MemoryStore::new();
		assert!(matches!(
			store.delete_form(7),
			Err(FormError::FormNotFound(7))
		));
	}

	#[test]
	fn test_save_submission_requires_a_clean_submission() {
		let mut store = MemoryStore::new();
		let mut form = Form::new("Survey");
		store.save_form(&mut form).unwrap();

		let mut submission = FormSubmission::new();
		submission.form_id = form.id;
		submission.add_error("name", "name cannot be blank.");

		let result = store.save_submission(&mut submission);
		assert!(matches!(result, Err(FormError::SubmissionRejected(_))));
		assert!(store.submissions_for(form.id.unwrap()).is_empty());
	}

	#[test]
	fn test_save_submission_requires_a_persisted_form() {
		let mut store = MemoryStore::new();

		let mut unbound = FormSubmission::new();
		assert!(matches!(
			store.save_submission(&mut unbound),
			Err(FormError::UnsavedForm)
		));

		let mut dangling = FormSubmission::for_form(99);
		assert!(matches!(
			store.save_submission(&mut dangling),
			Err(FormError::FormNotFound(99))
		));
	}

	#[test]
	fn test_ids_are_unique_across_record_kinds() {
		let mut store = MemoryStore::new();
		let mut first = Form::new("First");
		let mut second = Form::new("Second");
		store.save_form(&mut first).unwrap();
		store.save_form(&mut second).unwrap();

		let mut submission = FormSubmission::for_form(first.id.unwrap());
		store.save_submission(&mut submission).unwrap();

		let mut ids = vec![first.id, second.id, submission.id];
		ids.sort();
		ids.dedup();
		assert_eq!(ids.len(), 3);
	}
}
