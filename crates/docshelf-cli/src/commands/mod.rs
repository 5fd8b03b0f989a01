//! CLI command definitions and dispatch.

pub mod admin;
pub mod document;
pub mod group;
pub mod migrate;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use docshelf_core::config::AppConfig;
use docshelf_core::error::AppError;
use docshelf_service::Shelf;

use crate::output::{ConsoleSink, OutputFormat};

/// DocShelf: ordered groups of documents
#[derive(Debug, Parser)]
#[command(name = "docshelf-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DocShelf server
    Serve(serve::ServeArgs),
    /// Run database migrations
    Migrate,
    /// Group management
    Group(group::GroupArgs),
    /// Document management
    Document(document::DocumentArgs),
    /// Admin credential helpers
    Admin(admin::AdminArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate => migrate::execute(&self.config).await,
            Commands::Group(args) => group::execute(args, &self.config, self.format).await,
            Commands::Document(args) => document::execute(args, &self.config, self.format).await,
            Commands::Admin(args) => admin::execute(args),
        }
    }
}

/// Load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}

/// Build a shelf over the configured backends and load both lists.
pub async fn open_shelf(config_path: &str) -> Result<Shelf, AppError> {
    let config = load_config(config_path)?;
    let state = docshelf_api::build_state(config).await?;
    let shelf = Shelf::new(
        state.group_service,
        state.document_service,
        state.authenticator,
        Arc::new(ConsoleSink),
    );
    if !shelf.refresh().await {
        return Err(AppError::service_unavailable("Could not load the shelf"));
    }
    Ok(shelf)
}

/// Prompt for admin credentials and start an admin session on `shelf`.
pub async fn login_admin(shelf: &Shelf) -> Result<(), AppError> {
    let username: String = dialoguer::Input::new()
        .with_prompt("Admin username")
        .default("admin".to_string())
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;
    let password = dialoguer::Password::new()
        .with_prompt("Admin password")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

    ensure(shelf.login_admin(&username, &password).await, "Admin login failed")
}

/// Turn a reported failure into a non-zero exit.
pub fn ensure(ok: bool, failure: &str) -> Result<(), AppError> {
    if ok {
        Ok(())
    } else {
        Err(AppError::internal(failure))
    }
}
