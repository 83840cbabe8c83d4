//! Core contact types for contactbook.
//!
//! This module defines the record kept in the store and the id hint used to
//! ask validation for either an existing id or the next free one.

use serde::{Deserialize, Serialize};

/// Raw id value meaning "assign the next available id".
pub const UNASSIGNED_ID: i64 = -1;

/// A single contact record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique, positive, immutable identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number, free-form.
    pub phone: String,
}

impl Contact {
    /// Create a contact from its parts.
    #[must_use]
    pub fn new(
        id: i64,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Id supplied alongside proposed contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IdHint {
    /// No id yet; validation assigns `max + 1`.
    #[default]
    Unassigned,
    /// An id that must already be present in the store.
    Existing(i64),
}

impl From<i64> for IdHint {
    fn from(raw: i64) -> Self {
        if raw == UNASSIGNED_ID {
            Self::Unassigned
        } else {
            Self::Existing(raw)
        }
    }
}

impl From<IdHint> for i64 {
    fn from(hint: IdHint) -> Self {
        match hint {
            IdHint::Unassigned => UNASSIGNED_ID,
            IdHint::Existing(id) => id,
        }
    }
}
