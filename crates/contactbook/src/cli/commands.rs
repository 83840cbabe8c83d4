//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show contacts whose name contains these characters in order
    #[arg(short = 'Q', long)]
    pub query: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Contact id
    pub id: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Contact name (fewer than 16 characters)
    #[arg(short, long)]
    pub name: String,

    /// Email address (exactly one '@')
    #[arg(short, long)]
    pub email: String,

    /// Phone number (fewer than 16 characters)
    #[arg(short, long, default_value = "")]
    pub phone: String,
}

/// Edit command arguments.
///
/// Fields that are not given keep their stored value.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Contact id
    pub id: i64,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// New phone number
    #[arg(short, long)]
    pub phone: Option<String>,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Contact id
    pub id: i64,
}

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_list_command_debug() {
        let cmd = ListCommand {
            query: Some("ed".to_string()),
            format: OutputFormat::Table,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("query"));
        assert!(debug_str.contains("ed"));
    }

    #[test]
    fn test_edit_command_debug() {
        let cmd = EditCommand {
            id: 4,
            name: None,
            email: Some("a@b".to_string()),
            phone: None,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("email"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
