//! CSV row layout for the contact store.
//!
//! One contact per row, columns `id,name,email,phone`, no header row. Fields
//! are quoted only when they contain a delimiter, quote or line break.

use std::io::Write;

use csv::{QuoteStyle, StringRecord, Terminator, Writer, WriterBuilder};
use thiserror::Error;

use crate::contact::Contact;

/// Number of columns in a well-formed row.
pub const FIELD_COUNT: usize = 4;

/// Why a stored row could not be turned into a contact.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    /// The id column is not an integer.
    #[error("cannot convert {raw:?} to integer")]
    BadId {
        /// Raw id column text.
        raw: String,
    },

    /// Fewer than [`FIELD_COUNT`] columns.
    #[error("expected {FIELD_COUNT} fields, found {found}")]
    MissingFields {
        /// Number of columns present.
        found: usize,
    },
}

/// Parse one stored row.
///
/// Columns past the fourth are ignored.
///
/// # Errors
///
/// Returns a [`RowError`] when the id does not parse or columns are missing.
pub fn from_record(record: &StringRecord) -> Result<Contact, RowError> {
    let raw_id = record.get(0).unwrap_or_default();
    let id = raw_id.parse::<i64>().map_err(|_| RowError::BadId {
        raw: raw_id.to_string(),
    })?;

    match (record.get(1), record.get(2), record.get(3)) {
        (Some(name), Some(email), Some(phone)) => Ok(Contact::new(id, name, email, phone)),
        _ => Err(RowError::MissingFields {
            found: record.len(),
        }),
    }
}

/// Build a writer that emits rows in the store layout.
pub fn writer<W: Write>(inner: W) -> Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}

/// Write one contact as a row.
///
/// # Errors
///
/// Returns the CSV error if the underlying writer fails.
pub fn write_contact<W: Write>(writer: &mut Writer<W>, contact: &Contact) -> csv::Result<()> {
    writer.write_record([
        contact.id.to_string().as_str(),
        contact.name.as_str(),
        contact.email.as_str(),
        contact.phone.as_str(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    fn encode(contacts: &[Contact]) -> String {
        let mut w = writer(Vec::new());
        for c in contacts {
            write_contact(&mut w, c).unwrap();
        }
        String::from_utf8(w.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_from_record() {
        let contact = from_record(&row(&["12", "Ann", "ann@x.io", "555"])).unwrap();
        assert_eq!(contact, Contact::new(12, "Ann", "ann@x.io", "555"));
    }

    #[test]
    fn test_from_record_bad_id() {
        let err = from_record(&row(&["id", "Ann", "ann@x.io", "555"])).unwrap_err();
        assert_eq!(
            err,
            RowError::BadId {
                raw: "id".to_string()
            }
        );
        assert_eq!(err.to_string(), "cannot convert \"id\" to integer");
    }

    #[test]
    fn test_from_record_missing_fields() {
        let err = from_record(&row(&["3", "Ann"])).unwrap_err();
        assert_eq!(err, RowError::MissingFields { found: 2 });
    }

    #[test]
    fn test_from_record_ignores_extra_fields() {
        let contact = from_record(&row(&["3", "Ann", "a@b", "1", "extra"])).unwrap();
        assert_eq!(contact.phone, "1");
    }

    #[test]
    fn test_plain_row_is_unquoted() {
        let out = encode(&[Contact::new(1, "Ann", "ann@x.io", "555-0100")]);
        assert_eq!(out, "1,Ann,ann@x.io,555-0100\n");
    }

    #[test]
    fn test_comma_and_quote_are_quoted() {
        let out = encode(&[Contact::new(2, "Doe, \"J\"", "j@d", "")]);
        assert_eq!(out, "2,\"Doe, \"\"J\"\"\",j@d,\n");
    }
}
