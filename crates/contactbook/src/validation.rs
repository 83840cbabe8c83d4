//! Validation of proposed contact fields.
//!
//! Rules are intentionally simple: length caps on name and phone, and a
//! single well-placed `@` in the email. Values are never trimmed or folded.

use crate::contact::{Contact, IdHint};
use crate::error::{Error, Result, ValidationError};

/// Names must have fewer characters than this.
pub const MAX_NAME_LEN: usize = 16;

/// Phones must have fewer characters than this.
pub const MAX_PHONE_LEN: usize = 16;

/// Id that a sentinel create receives given the current records.
///
/// # Errors
///
/// Returns [`ValidationError::IdSpaceExhausted`] when the highest stored id is
/// already `i64::MAX`.
pub fn next_id(existing: &[Contact]) -> Result<i64> {
    match existing.iter().map(|c| c.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| ValidationError::IdSpaceExhausted(max).into()),
    }
}

/// Check that `email` has exactly one `@`, and that it is neither the first
/// nor the last character.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.matches('@').count() == 1 && !email.starts_with('@') && !email.ends_with('@')
}

/// Validate proposed fields against the current records and resolve the id.
///
/// Checks run in order (id, name, email, phone) and the first failure is
/// returned.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when an existing id hint matches no record, or
/// [`Error::Validation`] when a field breaks its rule.
pub fn validate(
    existing: &[Contact],
    name: &str,
    email: &str,
    phone: &str,
    hint: IdHint,
) -> Result<Contact> {
    let id = match hint {
        IdHint::Existing(id) => {
            if !existing.iter().any(|c| c.id == id) {
                return Err(Error::not_found(id));
            }
            id
        }
        IdHint::Unassigned => next_id(existing)?,
    };

    let name_len = name.chars().count();
    if name_len >= MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong {
            len: name_len,
            max: MAX_NAME_LEN,
        }
        .into());
    }

    if !is_valid_email(email) {
        return Err(ValidationError::BadEmail {
            email: email.to_string(),
        }
        .into());
    }

    let phone_len = phone.chars().count();
    if phone_len >= MAX_PHONE_LEN {
        return Err(ValidationError::PhoneTooLong {
            len: phone_len,
            max: MAX_PHONE_LEN,
        }
        .into());
    }

    Ok(Contact::new(id, name, email, phone))
}
