//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docshelf_core::ordering::OrderWrite;
use docshelf_entity::document::Document;
use docshelf_service::MoveOutcome;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` when every backend answered, `degraded` otherwise.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Table-store backend name and reachability.
    pub database: BackendHealth,
    /// Object-store backend name and reachability.
    pub storage: BackendHealth,
}

/// Reachability of one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendHealth {
    /// Backend type name.
    pub backend: String,
    /// Whether it answered.
    pub healthy: bool,
}

/// Admin login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
}

/// Document with presentation helpers.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentResponse {
    /// Stored record.
    #[serde(flatten)]
    pub document: Document,
    /// Icon category.
    pub category: String,
    /// Human readable size, e.g. `1.5 KB`.
    pub size_display: String,
    /// Whether a browser can show it inline.
    pub viewable: bool,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            category: document.category().to_string(),
            size_display: document.formatted_size(),
            viewable: document.is_viewable(),
            document,
        }
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Serialize)]
pub struct MoveResponse<Id: Serialize> {
    /// Whether the swap was applied.
    pub moved: bool,
    /// Writes issued, target first.
    pub writes: Vec<OrderWrite<Id>>,
}

impl<Id: Copy + Serialize> From<MoveOutcome<Id>> for MoveResponse<Id> {
    fn from(outcome: MoveOutcome<Id>) -> Self {
        Self {
            moved: outcome.is_moved(),
            writes: outcome.writes(),
        }
    }
}

/// Result of a renumber request.
#[derive(Debug, Clone, Serialize)]
pub struct RenumberResponse<Id: Serialize> {
    /// Entries whose position changed.
    pub updated: usize,
    /// The writes applied.
    pub writes: Vec<OrderWrite<Id>>,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
