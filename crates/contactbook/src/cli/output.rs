//! Terminal rendering of contacts.

use std::fmt::Write;

use super::OutputFormat;
use crate::contact::Contact;
use crate::error::Result;

const HEADERS: [&str; 4] = ["ID", "NAME", "EMAIL", "PHONE"];

/// Render a list of contacts in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_contacts(contacts: &[Contact], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(contacts)?),
        OutputFormat::Plain => Ok(contacts.iter().map(plain_line).collect()),
        OutputFormat::Table => Ok(table(contacts)),
    }
}

/// Render a single contact in the requested format.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_contact(contact: &Contact, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(contact)?),
        OutputFormat::Table => Ok(table(std::slice::from_ref(contact))),
        OutputFormat::Plain => {
            let mut out = String::new();
            let _ = writeln!(out, "Id:    {}", contact.id);
            let _ = writeln!(out, "Name:  {}", contact.name);
            let _ = writeln!(out, "Email: {}", contact.email);
            let _ = writeln!(out, "Phone: {}", contact.phone);
            Ok(out)
        }
    }
}

fn plain_line(contact: &Contact) -> String {
    if contact.phone.is_empty() {
        format!("{} {} <{}>\n", contact.id, contact.name, contact.email)
    } else {
        format!(
            "{} {} <{}> {}\n",
            contact.id, contact.name, contact.email, contact.phone
        )
    }
}

fn table(contacts: &[Contact]) -> String {
    let rows: Vec<[String; 4]> = contacts
        .iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                c.phone.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &widths, &HEADERS);
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        push_row(&mut out, &widths, &cells);
    }
    out
}

fn push_row(out: &mut String, widths: &[usize; 4], cells: &[&str]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
