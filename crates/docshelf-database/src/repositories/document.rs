//! Document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::DisplayOrderWriter;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_entity::document::{CreateDocument, Document};

use crate::store::DocumentStore;

const COLUMNS: &str =
    "id, group_id, name, file_path, file_type, file_size, created_at, display_order";

/// PostgreSQL-backed document store.
#[derive(Debug, Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DisplayOrderWriter<DocumentId> for DocumentRepository {
    async fn write_display_order(&self, id: DocumentId, display_order: i32) -> AppResult<()> {
        let result = sqlx::query("UPDATE documents SET display_order = $2 WHERE id = $1")
            .bind(id)
            .bind(display_order)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update document order", e)
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for DocumentRepository {
    async fn list_ordered(&self) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {COLUMNS} FROM documents ORDER BY display_order ASC, created_at ASC, id ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list documents", e))
    }

    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Document>> {
        sqlx::query_as::<_, Document>(&format!(
            "SELECT {COLUMNS} FROM documents WHERE group_id = $1 \
             ORDER BY display_order ASC, created_at ASC, id ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list group documents", e)
        })
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        sqlx::query_as::<_, Document>(&format!("SELECT {COLUMNS} FROM documents WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find document", e))
    }

    async fn insert(&self, data: &CreateDocument) -> AppResult<Document> {
        sqlx::query_as::<_, Document>(&format!(
            "INSERT INTO documents (group_id, name, file_path, file_type, file_size, display_order) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        ))
        .bind(data.group_id)
        .bind(&data.name)
        .bind(&data.file_path)
        .bind(&data.file_type)
        .bind(data.file_size)
        .bind(data.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("documents_group_id_fkey") =>
            {
                AppError::not_found(format!("Group {} not found", data.group_id))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("documents_file_path_key") =>
            {
                AppError::conflict(format!("Storage key '{}' already in use", data.file_path))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create document", e),
        })
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete document", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM documents WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count documents", e))
    }
}
