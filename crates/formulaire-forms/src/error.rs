//! Error types shared across the crate

use crate::kind::FieldKind;
use crate::record::RecordId;
use crate::submission::SubmissionErrors;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("name cannot be blank")]
	BlankName,
	#[error("no {kind} field with id {id} on this form")]
	UnknownFieldId { kind: FieldKind, id: RecordId },
	#[error("unknown field kind: {0}")]
	UnknownKind(String),
	#[error("form {0} not found")]
	FormNotFound(RecordId),
	#[error("form must be saved before it can accept submissions")]
	UnsavedForm,
	#[error("submission failed validation: {0}")]
	SubmissionRejected(SubmissionErrors),
}

pub type FormResult<T> = Result<T, FormError>;
