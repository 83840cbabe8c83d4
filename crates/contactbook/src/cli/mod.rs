//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure and output formatting for the
//! `contactbook` binary.

mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, OutputFormat,
    ServeCommand, ShowCommand,
};

/// contactbook - Keep your contacts in a CSV file
///
/// List, search, add, edit and delete contacts from the terminal, or serve
/// them as web pages.
#[derive(Debug, Parser)]
#[command(name = "contactbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the contacts CSV file (overrides `store.path`)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List contacts, optionally filtered by name
    List(ListCommand),

    /// Show a single contact
    Show(ShowCommand),

    /// Add a new contact
    Add(AddCommand),

    /// Edit an existing contact
    Edit(EditCommand),

    /// Delete a contact
    Delete(DeleteCommand),

    /// Serve the contact pages over HTTP
    Serve(ServeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
