//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docshelf_auth::AdminAuthenticator;
use docshelf_core::config::AppConfig;
use docshelf_database::{DocumentStore, GroupStore};
use docshelf_service::{DocumentService, GroupService};
use docshelf_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Group table store, also used for the database health probe
    pub group_store: Arc<dyn GroupStore>,
    /// Object storage
    pub storage_manager: Arc<StorageManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Admin credential and token checks
    pub authenticator: Arc<AdminAuthenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Group service
    pub group_service: Arc<GroupService>,
    /// Document service
    pub document_service: Arc<DocumentService>,
}

impl AppState {
    /// Wire services over the given stores.
    pub fn new(
        config: AppConfig,
        group_store: Arc<dyn GroupStore>,
        document_store: Arc<dyn DocumentStore>,
        storage_manager: Arc<StorageManager>,
        authenticator: Arc<AdminAuthenticator>,
    ) -> Self {
        let group_service = Arc::new(GroupService::new(
            Arc::clone(&group_store),
            Arc::clone(&document_store),
        ));
        let document_service = Arc::new(DocumentService::new(
            document_store,
            Arc::clone(&group_store),
            Arc::clone(&storage_manager),
        ));

        Self {
            config: Arc::new(config),
            group_store,
            storage_manager,
            authenticator,
            group_service,
            document_service,
        }
    }
}
