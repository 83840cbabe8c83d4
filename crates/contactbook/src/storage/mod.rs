//! Storage layer for contactbook.
//!
//! Contacts live in a single CSV file. Every operation opens the file, reads
//! or rewrites it completely, and closes it before returning; nothing is
//! cached between calls and nothing is locked, so concurrent writers can
//! lose each other's changes.

pub mod record;

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind as IoErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info, warn};

use crate::contact::{Contact, IdHint};
use crate::error::{Error, Result, ValidationError};
use crate::filter::filter_contacts;
use crate::validation::validate;

/// Handle to a CSV-backed contact store.
///
/// Cheap to clone; it only holds the file path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStore {
    /// Path to the CSV file.
    path: PathBuf,
}

impl ContactStore {
    /// Create a handle for the store at `path` without touching the disk.
    ///
    /// The file is created lazily by the first read.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a handle and make sure the store file exists.
    ///
    /// Creates the parent directories and an empty file if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directories or file cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.open_for_read()?;
        info!("Contact store ready at {}", store.path.display());
        Ok(store)
    }

    /// Get the path to the store file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every contact in file order.
    ///
    /// Rows that are not UTF-8, whose id is not an integer, or that have too
    /// few columns, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, created or read.
    pub fn read_all(&self) -> Result<Vec<Contact>> {
        let file = self.open_for_read()?;
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut contacts = Vec::new();
        for result in reader.byte_records() {
            let raw = result.map_err(|e| Error::csv(&self.path, e))?;
            let line = raw.position().map_or(0, csv::Position::line);
            let row = match StringRecord::from_byte_record(raw) {
                Ok(row) => row,
                Err(e) => {
                    warn!(line, reason = %e.utf8_error(), "Skipping non-UTF-8 contact row");
                    continue;
                }
            };
            match record::from_record(&row) {
                Ok(contact) => contacts.push(contact),
                Err(reason) => {
                    warn!(line, %reason, "Skipping unreadable contact row");
                }
            }
        }

        debug!(
            "Read {} contacts from {}",
            contacts.len(),
            self.path.display()
        );
        Ok(contacts)
    }

    /// Get a contact by its id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no contact has this id, or an I/O error.
    pub fn get(&self, id: i64) -> Result<Contact> {
        self.read_all()?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::not_found(id))
    }

    /// Read every contact whose name the query subsequence-matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn search(&self, query: &str) -> Result<Vec<Contact>> {
        Ok(filter_contacts(query, self.read_all()?))
    }

    /// Validate and append a new contact.
    ///
    /// With [`IdHint::Unassigned`] the contact receives the next free id.
    /// Nothing is written if validation fails.
    ///
    /// # Errors
    ///
    /// Returns a validation, not-found or I/O error.
    pub fn create(&self, name: &str, email: &str, phone: &str, hint: IdHint) -> Result<Contact> {
        let existing = self.read_all()?;
        let contact = validate(&existing, name, email, phone, hint)?;
        if let IdHint::Existing(id) = hint {
            return Err(ValidationError::IdAlreadyAssigned(id).into());
        }

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| Error::store("open", &self.path, e))?;
        // A hand-edited store may lack the final newline
        if !ends_with_newline(&mut file).map_err(|e| Error::store("read", &self.path, e))? {
            file.write_all(b"\n").map_err(|e| Error::store("write", &self.path, e))?;
        }
        let mut writer = record::writer(file);
        record::write_contact(&mut writer, &contact).map_err(|e| Error::csv(&self.path, e))?;
        writer
            .flush()
            .map_err(|e| Error::store("write", &self.path, e))?;

        info!(id = contact.id, "Created contact");
        Ok(contact)
    }

    /// Replace the fields of an existing contact.
    ///
    /// The whole file is rewritten with the new values in place.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for ids below 1, not-found for
    /// unknown ids, other validation errors, or an I/O error.
    pub fn update(&self, id: i64, name: &str, email: &str, phone: &str) -> Result<Contact> {
        if id < 1 {
            return Err(ValidationError::InvalidId(id).into());
        }

        let existing = self.read_all()?;
        let updated = validate(&existing, name, email, phone, IdHint::Existing(id))?;

        self.rewrite(existing.iter().map(|c| if c.id == id { &updated } else { c }))?;

        info!(id, "Updated contact");
        Ok(updated)
    }

    /// Remove a contact by id.
    ///
    /// The file is deleted and rewritten without the matching row. Returns
    /// `true` if a contact was removed, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, removed or rewritten.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let existing = self.read_all()?;
        fs::remove_file(&self.path).map_err(|e| Error::store("remove", &self.path, e))?;

        let before = existing.len();
        let kept: Vec<&Contact> = existing.iter().filter(|c| c.id != id).collect();
        let removed = kept.len() < before;
        self.rewrite(kept)?;

        if removed {
            info!(id, "Deleted contact");
        } else {
            debug!(id, "No contact to delete");
        }
        Ok(removed)
    }

    /// Open the store for reading, creating it when missing.
    fn open_for_read(&self) -> Result<File> {
        match File::open(&self.path) {
            Ok(file) => Ok(file),
            Err(e) if e.kind() == IoErrorKind::NotFound => {
                self.ensure_parent_dir()?;
                debug!("Creating empty contact store at {}", self.path.display());
                File::options()
                    .read(true)
                    .write(true)
                    .create(true)
                    .truncate(false)
                    .open(&self.path)
                    .map_err(|e| Error::store("create", &self.path, e))
            }
            Err(e) => Err(Error::store("open", &self.path, e)),
        }
    }

    /// Truncate the store and write the given contacts in order.
    fn rewrite<'a>(&self, contacts: impl IntoIterator<Item = &'a Contact>) -> Result<()> {
        let file = File::create(&self.path).map_err(|e| Error::store("open", &self.path, e))?;
        let mut writer = record::writer(file);
        for contact in contacts {
            record::write_contact(&mut writer, contact).map_err(|e| Error::csv(&self.path, e))?;
        }
        writer
            .flush()
            .map_err(|e| Error::store("write", &self.path, e))
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

/// Whether the file is empty or its last byte is a line feed.
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
