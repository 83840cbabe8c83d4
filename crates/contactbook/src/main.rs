//! `contactbook` - CLI for the contact book
//!
//! This binary manages the contacts CSV file from the terminal and serves the
//! web pages.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use contactbook::cli::output::{render_contact, render_contacts};
use contactbook::cli::{
    AddCommand, Cli, Command, ConfigCommand, EditCommand, ListCommand, ServeCommand, ShowCommand,
};
use contactbook::web::{self, AppState};
use contactbook::{init_logging, Config, ContactStore, IdHint};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let Cli {
        config: config_file,
        store: store_file,
        command,
        ..
    } = cli;

    let command = match command {
        // Config commands read config files themselves, so a broken default
        // file must not stop them
        Command::Config(cmd) => return handle_config(config_file, store_file, cmd),
        command => command,
    };

    let config = load_config(config_file, store_file)?;
    let store = ContactStore::new(config.store_path());

    match command {
        Command::List(cmd) => handle_list(&store, &cmd),
        Command::Show(cmd) => handle_show(&store, &cmd),
        Command::Add(cmd) => handle_add(&store, &cmd),
        Command::Edit(cmd) => handle_edit(&store, cmd),
        Command::Delete(cmd) => {
            if store.delete(cmd.id)? {
                println!("Deleted contact {}", cmd.id);
            } else {
                println!("No contact with id {}", cmd.id);
            }
            Ok(())
        }
        Command::Serve(cmd) => handle_serve(&config, store, cmd),
        Command::Config(_) => Ok(()),
    }
}

/// Load configuration, letting --store win over the file and environment.
fn load_config(
    config_file: Option<PathBuf>,
    store_file: Option<PathBuf>,
) -> anyhow::Result<Config> {
    let mut config = Config::load_from(config_file)?;
    if let Some(path) = store_file {
        config.store.path = Some(path);
    }
    Ok(config)
}

fn handle_list(store: &ContactStore, cmd: &ListCommand) -> anyhow::Result<()> {
    let query = cmd.query.as_deref().unwrap_or_default();
    let contacts = store.search(query)?;
    print!("{}", render_contacts(&contacts, cmd.format)?);
    Ok(())
}

fn handle_show(store: &ContactStore, cmd: &ShowCommand) -> anyhow::Result<()> {
    let contact = store.get(cmd.id)?;
    print!("{}", render_contact(&contact, cmd.format)?);
    Ok(())
}

fn handle_add(store: &ContactStore, cmd: &AddCommand) -> anyhow::Result<()> {
    let contact = store.create(&cmd.name, &cmd.email, &cmd.phone, IdHint::Unassigned)?;
    println!("Added contact {} ({})", contact.id, contact.name);
    Ok(())
}

fn handle_edit(store: &ContactStore, cmd: EditCommand) -> anyhow::Result<()> {
    let current = store.get(cmd.id)?;
    let name = cmd.name.unwrap_or(current.name);
    let email = cmd.email.unwrap_or(current.email);
    let phone = cmd.phone.unwrap_or(current.phone);

    let contact = store.update(cmd.id, &name, &email, &phone)?;
    println!("Updated contact {} ({})", contact.id, contact.name);
    Ok(())
}

fn handle_serve(config: &Config, store: ContactStore, cmd: ServeCommand) -> anyhow::Result<()> {
    let addr = match cmd.bind {
        Some(bind) => bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {bind:?}"))?,
        None => config.bind_addr()?,
    };

    let state = AppState::new(store)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime.block_on(web::serve(state, addr))?;
    Ok(())
}

fn handle_config(
    config_file: Option<PathBuf>,
    store_file: Option<PathBuf>,
    cmd: ConfigCommand,
) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_file, store_file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Path:  {}", config.store_path().display());
                println!();
                println!("[Server]");
                println!("  Bind:  {}", config.server.bind);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn broken_config(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[server\nbind = ").unwrap();
        path
    }

    #[test]
    fn test_validate_ignores_broken_global_config() {
        let dir = tempfile::tempdir().unwrap();
        let broken = broken_config(&dir);
        let other = dir.path().join("other.toml");
        fs::write(&other, "[server]\nbind = \"127.0.0.1:8080\"\n").unwrap();

        let result = handle_config(
            Some(broken),
            None,
            ConfigCommand::Validate { file: Some(other) },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_path_ignores_broken_global_config() {
        let dir = tempfile::tempdir().unwrap();
        let broken = broken_config(&dir);
        assert!(handle_config(Some(broken), None, ConfigCommand::Path).is_ok());
    }

    #[test]
    fn test_show_reports_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let broken = broken_config(&dir);
        assert!(handle_config(Some(broken), None, ConfigCommand::Show { json: true }).is_err());
    }

    #[test]
    fn test_store_flag_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("elsewhere.csv");
        let config = load_config(None, Some(store.clone())).unwrap();
        assert_eq!(config.store_path(), store);
    }
}
