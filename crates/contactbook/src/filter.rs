//! Typeahead filter over contact names.
//!
//! A query matches a name when its characters appear in the name in order,
//! not necessarily next to each other. Matching is case-sensitive.

use tracing::trace;

use crate::contact::Contact;

/// Check whether `query` is a subsequence of `name`.
///
/// An empty query matches everything.
#[must_use]
pub fn is_subsequence(query: &str, name: &str) -> bool {
    let mut pending = query.chars().peekable();
    for c in name.chars() {
        if pending.peek().is_none() {
            break;
        }
        if pending.peek() == Some(&c) {
            pending.next();
        }
    }
    pending.peek().is_none()
}

/// Keep the contacts whose name the query subsequence-matches.
///
/// An empty query returns the input unchanged. Relative order is preserved.
#[must_use]
pub fn filter_contacts(query: &str, contacts: Vec<Contact>) -> Vec<Contact> {
    if query.is_empty() {
        return contacts;
    }

    let total = contacts.len();
    let matched: Vec<Contact> = contacts
        .into_iter()
        .filter(|c| is_subsequence(query, &c.name))
        .collect();
    trace!(query, total, matched = matched.len(), "Filtered contacts");
    matched
}
