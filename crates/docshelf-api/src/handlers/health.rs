//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, BackendHealth, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database_ok = match state.group_store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };
    let storage_ok = state.storage_manager.health_check().await;

    let status = if database_ok && storage_ok { "ok" } else { "degraded" };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: BackendHealth {
            backend: state.group_store.backend().to_string(),
            healthy: database_ok,
        },
        storage: BackendHealth {
            backend: state.storage_manager.provider().provider_type().to_string(),
            healthy: storage_ok,
        },
    }))
}
