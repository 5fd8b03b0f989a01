//! Application builder: wires stores, storage, auth and services into an
//! Axum app and runs it.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{info, warn};

use docshelf_auth::AdminAuthenticator;
use docshelf_core::config::{AppConfig, DatabaseProvider};
use docshelf_core::error::AppError;
use docshelf_database::repositories::{DocumentRepository, GroupRepository};
use docshelf_database::{DatabasePool, DocumentStore, GroupStore, MemoryDatabase};
use docshelf_storage::StorageManager;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connects the configured backends and wires the application state.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Step 1: Table stores ─────────────────────────────────────
    let (group_store, document_store): (Arc<dyn GroupStore>, Arc<dyn DocumentStore>) =
        match config.database.provider {
            DatabaseProvider::Postgres => {
                info!("Connecting to database...");
                let db = DatabasePool::connect(&config.database).await?;
                if config.database.run_migrations {
                    docshelf_database::migration::run_migrations(db.pool()).await?;
                }
                (
                    Arc::new(GroupRepository::new(db.pool().clone())),
                    Arc::new(DocumentRepository::new(db.pool().clone())),
                )
            }
            DatabaseProvider::Memory => {
                warn!("Using in-memory database; data is lost on exit");
                let db = MemoryDatabase::new();
                (Arc::new(db.group_store()), Arc::new(db.document_store()))
            }
        };

    // ── Step 2: Object storage ───────────────────────────────────
    let storage_manager = Arc::new(StorageManager::from_config(&config.storage).await?);

    // ── Step 3: Admin auth ───────────────────────────────────────
    let authenticator = Arc::new(AdminAuthenticator::from_config(&config.auth)?);

    Ok(AppState::new(
        config,
        group_store,
        document_store,
        storage_manager,
        authenticator,
    ))
}

/// Runs the DocShelf server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting DocShelf server...");

    let addr = config.server.bind_addr();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("DocShelf server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            })
            .await
    });

    tokio::select! {
        result = &mut server => {
            return match result {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(AppError::internal(format!("Server error: {e}"))),
                Err(e) => Err(AppError::internal(format!("Server task failed: {e}"))),
            };
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received, starting graceful shutdown...");
        }
    }

    let _ = shutdown_tx.send(true);
    match tokio::time::timeout(grace, server).await {
        Ok(Ok(Ok(()))) => info!("DocShelf server shut down gracefully"),
        Ok(Ok(Err(e))) => return Err(AppError::internal(format!("Server error: {e}"))),
        Ok(Err(e)) => return Err(AppError::internal(format!("Server task failed: {e}"))),
        Err(_) => warn!(
            grace_seconds = grace.as_secs(),
            "Grace period elapsed; dropping open connections"
        ),
    }

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
