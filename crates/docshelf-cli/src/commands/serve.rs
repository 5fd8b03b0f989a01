//! Start the DocShelf server.

use clap::Args;

use docshelf_core::config::{DatabaseProvider, StorageProviderKind};
use docshelf_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Use the in-memory database and object store
    #[arg(long)]
    pub in_memory: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> Result<(), AppError> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.in_memory {
        config.database.provider = DatabaseProvider::Memory;
        config.storage.provider = StorageProviderKind::Memory;
    }

    println!("Starting DocShelf server...");
    println!("  Host: {}", config.server.host);
    println!("  Port: {}", config.server.port);

    docshelf_api::run_server(config).await
}
