//! Form validation rules for the editable user fields.

use crate::domain::UserDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FullName,
    Email,
    Phone,
}

/// Per-field validation messages. An empty set means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FullName => self.full_name.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Phone => self.phone.as_deref(),
        }
    }

    pub fn clear(&mut self, field: Field) {
        match field {
            Field::FullName => self.full_name = None,
            Field::Email => self.email = None,
            Field::Phone => self.phone = None,
        }
    }
}

/// Runs the synchronous pre-submit checks: every field must be non-empty
/// after trimming and the email must have a plausible `local@domain` shape.
pub fn validate_draft(draft: &UserDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if draft.full_name.trim().is_empty() {
        errors.full_name = Some("Full name is required".to_string());
    }

    if draft.email.trim().is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !looks_like_email(&draft.email) {
        errors.email = Some("Email format is not valid".to_string());
    }

    if draft.phone.trim().is_empty() {
        errors.phone = Some("Phone number is required".to_string());
    }

    errors
}

/// Unanchored shape check equivalent to `\S+@\S+\.\S+`: somewhere in the
/// input there must be a non-space run, an `@`, a non-space run containing a
/// `.` with at least one character on each side.
fn looks_like_email(value: &str) -> bool {
    value.split_whitespace().any(|chunk| {
        chunk.char_indices().any(|(at, c)| {
            if c != '@' || at == 0 {
                return false;
            }
            let domain = &chunk[at + 1..];
            domain
                .rfind('.')
                .is_some_and(|dot| dot > 0 && dot + 1 < domain.len())
        })
    })
}
