//! # Form Modal State
//!
//! UI-agnostic state for the add/edit dialogs used by every management screen.
//!
//! A modal is either closed or open in add or edit mode. Opening always resets
//! the fields in the same call (blank for add, prefilled for edit), so a modal
//! re-opened for a different record can never show the previous record's data.
//! Submitting validates the fields; on success the modal closes and hands the
//! validated output back to the caller, who is solely responsible for
//! committing it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Validation messages keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`; the first message for a field wins
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }

    /// `Ok(value)` when no field failed, otherwise the collected errors
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

/// Whether the modal is creating a record or editing the record with this id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormMode {
    Add,
    Edit(u64),
}

/// The editable fields of one entity's form
pub trait FormFields: Clone + Default {
    /// Record an edit-mode modal is prefilled from
    type Source;
    /// What a successful validation produces
    type Output;

    fn from_source(source: &Self::Source) -> Self;

    /// Update one field by name; false when the form has no such field
    fn set_field(&mut self, field: &str, value: String) -> bool;

    fn validate(&self, mode: FormMode) -> Result<Self::Output, FieldErrors>;
}

/// A validated form, ready for the caller to commit
#[derive(Debug, Clone, PartialEq)]
pub struct Submission<T> {
    pub mode: FormMode,
    pub output: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitError {
    NotOpen,
    Invalid(FieldErrors),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::NotOpen => write!(f, "Form is not open"),
            SubmitError::Invalid(errors) => write!(f, "Invalid form: {}", errors),
        }
    }
}

impl std::error::Error for SubmitError {}

#[derive(Debug, Clone, PartialEq)]
pub enum FormModal<F: FormFields> {
    Closed,
    Open {
        mode: FormMode,
        fields: F,
        errors: FieldErrors,
    },
}

impl<F: FormFields> Default for FormModal<F> {
    fn default() -> Self {
        FormModal::Closed
    }
}

impl<F: FormFields> FormModal<F> {
    pub fn new() -> Self {
        FormModal::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormModal::Open { .. })
    }

    pub fn mode(&self) -> Option<FormMode> {
        match self {
            FormModal::Open { mode, .. } => Some(*mode),
            FormModal::Closed => None,
        }
    }

    pub fn fields(&self) -> Option<&F> {
        match self {
            FormModal::Open { fields, .. } => Some(fields),
            FormModal::Closed => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match self {
            FormModal::Open { errors, .. } => Some(errors),
            FormModal::Closed => None,
        }
    }

    /// Open with blank fields, discarding whatever was open before
    pub fn open_add(&mut self) {
        *self = FormModal::Open {
            mode: FormMode::Add,
            fields: F::default(),
            errors: FieldErrors::new(),
        };
    }

    /// Open prefilled from `source`, discarding whatever was open before
    pub fn open_edit(&mut self, id: u64, source: &F::Source) {
        *self = FormModal::Open {
            mode: FormMode::Edit(id),
            fields: F::from_source(source),
            errors: FieldErrors::new(),
        };
    }

    /// Edit one field. A stale error for that field is cleared.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        match self {
            FormModal::Open { fields, errors, .. } => {
                let updated = fields.set_field(field, value.into());
                if updated && errors.contains(field) {
                    let mut remaining = FieldErrors::new();
                    for (k, v) in errors.clone().into_map() {
                        if k != field {
                            remaining.add(&k, v);
                        }
                    }
                    *errors = remaining;
                }
                updated
            }
            FormModal::Closed => false,
        }
    }

    /// Validate; close and return the output on success, stay open with
    /// keyed errors otherwise
    pub fn submit(&mut self) -> Result<Submission<F::Output>, SubmitError> {
        let FormModal::Open { mode, fields, errors } = self else {
            return Err(SubmitError::NotOpen);
        };

        match fields.validate(*mode) {
            Ok(output) => {
                let submission = Submission { mode: *mode, output };
                *self = FormModal::Closed;
                Ok(submission)
            }
            Err(validation) => {
                *errors = validation.clone();
                Err(SubmitError::Invalid(validation))
            }
        }
    }

    /// Close without submitting; uncommitted edits are dropped
    pub fn cancel(&mut self) {
        *self = FormModal::Closed;
    }
}

/// Blocking "are you sure?" step in front of a delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion<Id> {
    pending: Option<Id>,
}

impl<Id> Default for PendingDeletion<Id> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<Id: Clone> PendingDeletion<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, id: Id) {
        self.pending = Some(id);
    }

    pub fn pending(&self) -> Option<&Id> {
        self.pending.as_ref()
    }

    /// The id to delete; clears the prompt
    pub fn confirm(&mut self) -> Option<Id> {
        self.pending.take()
    }

    pub fn decline(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct NoteForm {
        title: String,
        body: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        title: String,
        body: String,
    }

    impl FormFields for NoteForm {
        type Source = Note;
        type Output = Note;

        fn from_source(source: &Note) -> Self {
            Self {
                title: source.title.clone(),
                body: source.body.clone(),
            }
        }

        fn set_field(&mut self, field: &str, value: String) -> bool {
            match field {
                "title" => self.title = value,
                "body" => self.body = value,
                _ => return false,
            }
            true
        }

        fn validate(&self, _mode: FormMode) -> Result<Note, FieldErrors> {
            let mut errors = FieldErrors::new();
            if self.title.trim().is_empty() {
                errors.add("title", "Judul wajib diisi");
            }
            errors.into_result(|| Note {
                title: self.title.trim().to_string(),
                body: self.body.clone(),
            })
        }
    }

    fn note(title: &str) -> Note {
        Note {
            title: title.to_string(),
            body: format!("{} body", title),
        }
    }

    #[test]
    fn test_open_add_starts_blank() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        assert!(!modal.is_open());

        modal.open_add();
        assert_eq!(modal.mode(), Some(FormMode::Add));
        assert_eq!(modal.fields(), Some(&NoteForm::default()));
    }

    #[test]
    fn test_reopening_edit_never_shows_previous_record() {
        let mut modal: FormModal<NoteForm> = FormModal::new();

        modal.open_edit(1, &note("first"));
        modal.set_field("body", "edited but not saved");

        modal.open_edit(2, &note("second"));
        let fields = modal.fields().unwrap();
        assert_eq!(fields.title, "second");
        assert_eq!(fields.body, "second body");
        assert_eq!(modal.mode(), Some(FormMode::Edit(2)));
    }

    #[test]
    fn test_cancel_discards_uncommitted_edits() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        modal.open_add();
        modal.set_field("title", "draft");
        modal.cancel();
        assert!(!modal.is_open());

        modal.open_add();
        assert_eq!(modal.fields().unwrap().title, "");
    }

    #[test]
    fn test_invalid_submit_stays_open_with_keyed_errors() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        modal.open_add();

        let result = modal.submit();
        assert!(matches!(result, Err(SubmitError::Invalid(_))));
        assert!(modal.is_open());
        assert_eq!(modal.errors().unwrap().get("title"), Some("Judul wajib diisi"));

        // Fixing the field clears its error
        modal.set_field("title", "ok");
        assert!(modal.errors().unwrap().is_empty());
    }

    #[test]
    fn test_valid_submit_closes_and_returns_output() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        modal.open_edit(9, &note("kept"));
        modal.set_field("title", "  renamed ");

        let submission = modal.submit().expect("valid form");
        assert_eq!(submission.mode, FormMode::Edit(9));
        assert_eq!(submission.output.title, "renamed");
        assert_eq!(submission.output.body, "kept body");
        assert!(!modal.is_open());
    }

    #[test]
    fn test_closed_modal_rejects_edits_and_submit() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        assert!(!modal.set_field("title", "x"));
        assert_eq!(modal.submit(), Err(SubmitError::NotOpen));
    }

    #[test]
    fn test_unknown_field_is_reported() {
        let mut modal: FormModal<NoteForm> = FormModal::new();
        modal.open_add();
        assert!(!modal.set_field("colour", "red"));
    }

    #[test]
    fn test_pending_deletion_confirm_and_decline() {
        let mut prompt = PendingDeletion::new();
        prompt.request(4u64);
        assert_eq!(prompt.pending(), Some(&4));
        prompt.decline();
        assert_eq!(prompt.confirm(), None);

        prompt.request(5);
        assert_eq!(prompt.confirm(), Some(5));
        assert_eq!(prompt.pending(), None);
    }
}
