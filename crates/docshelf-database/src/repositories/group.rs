//! Group repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::DisplayOrderWriter;
use docshelf_core::types::GroupId;
use docshelf_entity::group::{CreateGroup, Group};

use crate::store::GroupStore;

/// PostgreSQL-backed group store.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisplayOrderWriter<GroupId> for GroupRepository {
    async fn write_display_order(&self, id: GroupId, display_order: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE groups SET display_order = $2 WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update group order", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Group {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    fn backend(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }

    async fn list_ordered(&self) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at, display_order FROM groups \
             ORDER BY display_order ASC, created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT id, name, created_at, display_order FROM groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    async fn insert(&self, data: &CreateGroup) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (name, display_order) VALUES ($1, $2) \
             RETURNING id, name, created_at, display_order",
        )
        .bind(&data.name)
        .bind(data.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create group", e))
    }

    async fn delete(&self, id: GroupId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err)
                    if db_err.constraint() == Some("documents_group_id_fkey") =>
                {
                    AppError::conflict("Cannot delete a group that still contains documents")
                }
                _ => AppError::with_source(ErrorKind::Database, "Failed to delete group", e),
            })?;
        Ok(result.rows_affected() > 0)
    }
}
