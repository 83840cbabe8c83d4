//! `contactbook` - A small contact manager backed by a CSV file
//!
//! This library provides the contact store (create, read, update, delete),
//! field validation, the typeahead name filter, and a server-rendered web
//! front-end over them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod filter;
pub mod logging;
pub mod storage;
pub mod validation;
pub mod web;

pub use config::Config;
pub use contact::{Contact, IdHint, UNASSIGNED_ID};
pub use error::{Error, ErrorKind, Result, ValidationError};
pub use filter::filter_contacts;
pub use logging::init_logging;
pub use storage::ContactStore;
