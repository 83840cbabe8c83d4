//! Error types for contactbook.
//!
//! Every fallible operation in the crate returns [`Error`]. Callers that need to
//! branch on the failure (the web layer choosing a status code, the CLI choosing
//! an exit message) should match on [`Error::kind`] rather than on message text.

use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Proposed contact fields or ids were rejected.
    Validation,
    /// The referenced contact does not exist.
    NotFound,
    /// Reading or writing the store failed.
    Io,
    /// Configuration could not be loaded or is invalid.
    Config,
    /// Anything else (rendering, serialization, server startup).
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::NotFound => write!(f, "not_found"),
            Self::Io => write!(f, "io"),
            Self::Config => write!(f, "config"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

/// Reasons a proposed contact is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name has 16 or more characters.
    #[error("name too long ({len} characters, must be fewer than {max})")]
    NameTooLong {
        /// Length of the rejected name.
        len: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Email does not contain exactly one `@` away from both ends.
    #[error("bad email format: {email:?}")]
    BadEmail {
        /// The rejected email.
        email: String,
    },

    /// Phone has 16 or more characters.
    #[error("phone too long ({len} characters, must be fewer than {max})")]
    PhoneTooLong {
        /// Length of the rejected phone.
        len: usize,
        /// Exclusive upper bound.
        max: usize,
    },

    /// Id is not a positive integer.
    #[error("invalid contact id {0}")]
    InvalidId(i64),

    /// Creating a contact with an id that is already taken.
    #[error("contact id {0} is already assigned")]
    IdAlreadyAssigned(i64),

    /// The highest stored id leaves no room for another contact.
    #[error("no ids left after {0}")]
    IdSpaceExhausted(i64),
}

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Contact Errors ===
    /// Proposed contact failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No contact with the given id exists.
    #[error("no contact with id {id} was found")]
    NotFound {
        /// The id that was looked up.
        id: i64,
    },

    // === Storage Errors ===
    /// A file system operation on the store failed.
    #[error("failed to {action} contact store {path}: {source}")]
    Store {
        /// What was being attempted (`open`, `read`, `write`, `remove`).
        action: &'static str,
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader or writer failed.
    #[error("CSV error in contact store {path}: {source}")]
    Csv {
        /// Path to the store file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Other I/O failure (sockets, stdout).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Presentation Errors ===
    /// A template failed to compile or render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking store call panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a not-found error for the given id.
    #[must_use]
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Wrap an I/O failure on the store file.
    pub(crate) fn store(
        action: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Store {
            action,
            path: path.into(),
            source,
        }
    }

    /// Wrap a CSV failure on the store file.
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Store { .. } | Self::Csv { .. } | Self::DirectoryCreate { .. } | Self::Io(_) => {
                ErrorKind::Io
            }
            Self::ConfigLoad(_) | Self::ConfigValidation { .. } => ErrorKind::Config,
            Self::Template(_) | Self::Json(_) | Self::Task(_) => ErrorKind::Internal,
        }
    }

    /// Check if this error is a validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    /// Check if this error means the contact does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found(7);
        assert_eq!(err.to_string(), "no contact with id 7 was found");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.is_not_found());
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: Error = ValidationError::BadEmail {
            email: "nobody".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "bad email format: \"nobody\"");
        assert!(err.is_validation());
    }

    #[test]
    fn test_name_too_long_display() {
        let err = ValidationError::NameTooLong { len: 20, max: 16 };
        let msg = err.to_string();
        assert!(msg.starts_with("name too long"));
        assert!(msg.contains("20"));
    }

    #[test]
    fn test_phone_too_long_display() {
        let err = ValidationError::PhoneTooLong { len: 16, max: 16 };
        assert!(err.to_string().starts_with("phone too long"));
    }

    #[test]
    fn test_store_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = Error::store("write", "/srv/contacts.csv", io_err);
        let msg = err.to_string();
        assert!(msg.contains("write"));
        assert!(msg.contains("/srv/contacts.csv"));
        assert!(msg.contains("access denied"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_config_validation_kind() {
        let err = Error::ConfigValidation {
            message: "bad bind".to_string(),
        };
        assert!(err.to_string().contains("bad bind"));
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn test_from_json_error() {
        let json_result: std::result::Result<i32, serde_json::Error> =
            serde_json::from_str("not valid json");
        if let Err(json_err) = json_result {
            let err: Error = json_err.into();
            assert_eq!(err.kind(), ErrorKind::Internal);
        }
    }

    #[test]
    fn test_id_space_exhausted_is_validation() {
        let err: Error = ValidationError::IdSpaceExhausted(i64::MAX).into();
        assert!(err.is_validation());
        assert!(err.to_string().contains("9223372036854775807"));
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Validation.to_string(), "validation");
        assert_eq!(ErrorKind::NotFound.to_string(), "not_found");
        assert_eq!(ErrorKind::Io.to_string(), "io");
    }
}
