//! In-process table store.
//!
//! Backs the server when `database.provider = "memory"` and every test that
//! needs a store without PostgreSQL. Groups and documents share one lock so
//! the restrict rule on group deletion holds the same way the foreign key
//! does in PostgreSQL.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use docshelf_core::error::AppError;
use docshelf_core::ordering::sort_siblings;
use docshelf_core::result::AppResult;
use docshelf_core::traits::DisplayOrderWriter;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_entity::document::{CreateDocument, Document};
use docshelf_entity::group::{CreateGroup, Group};

use crate::store::{DocumentStore, GroupStore};

#[derive(Debug, Default)]
struct Tables {
    groups: HashMap<GroupId, Group>,
    documents: HashMap<DocumentId, Document>,
}

/// Shared in-memory tables. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// A group store over these tables.
    pub fn group_store(&self) -> MemoryGroupStore {
        MemoryGroupStore {
            tables: Arc::clone(&self.tables),
        }
    }

    /// A document store over these tables.
    pub fn document_store(&self) -> MemoryDocumentStore {
        MemoryDocumentStore {
            tables: Arc::clone(&self.tables),
        }
    }
}

/// Group store over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryGroupStore {
    tables: Arc<RwLock<Tables>>,
}

/// Document store over [`MemoryDatabase`].
#[derive(Debug, Clone)]
pub struct MemoryDocumentStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl DisplayOrderWriter<GroupId> for MemoryGroupStore {
    async fn write_display_order(&self, id: GroupId, display_order: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let group = tables
            .groups
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Group {id} not found")))?;
        group.display_order = display_order;
        Ok(())
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    fn backend(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list_ordered(&self) -> AppResult<Vec<Group>> {
        let tables = self.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        sort_siblings(&mut groups);
        Ok(groups)
    }

    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        Ok(self.tables.read().await.groups.get(&id).cloned())
    }

    async fn insert(&self, data: &CreateGroup) -> AppResult<Group> {
        let group = Group {
            id: GroupId::new(),
            name: data.name.clone(),
            created_at: Utc::now(),
            display_order: data.display_order,
        };
        self.tables
            .write()
            .await
            .groups
            .insert(group.id, group.clone());
        Ok(group)
    }

    async fn delete(&self, id: GroupId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        if tables.documents.values().any(|d| d.group_id == id) {
            return Err(AppError::conflict(
                "Cannot delete a group that still contains documents",
            ));
        }
        Ok(tables.groups.remove(&id).is_some())
    }
}

#[async_trait]
impl DisplayOrderWriter<DocumentId> for MemoryDocumentStore {
    async fn write_display_order(&self, id: DocumentId, display_order: i32) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let document = tables
            .documents
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;
        document.display_order = display_order;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_ordered(&self) -> AppResult<Vec<Document>> {
        let tables = self.tables.read().await;
        let mut documents: Vec<Document> = tables.documents.values().cloned().collect();
        sort_siblings(&mut documents);
        Ok(documents)
    }

    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Document>> {
        let tables = self.tables.read().await;
        let mut documents: Vec<Document> = tables
            .documents
            .values()
            .filter(|d| d.group_id == group_id)
            .cloned()
            .collect();
        sort_siblings(&mut documents);
        Ok(documents)
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        Ok(self.tables.read().await.documents.get(&id).cloned())
    }

    async fn insert(&self, data: &CreateDocument) -> AppResult<Document> {
        let mut tables = self.tables.write().await;
        if !tables.groups.contains_key(&data.group_id) {
            return Err(AppError::not_found(format!(
                "Group {} not found",
                data.group_id
            )));
        }
        if tables.documents.values().any(|d| d.file_path == data.file_path) {
            return Err(AppError::conflict(format!(
                "Storage key '{}' already in use",
                data.file_path
            )));
        }
        if data.file_size < 0 {
            return Err(AppError::validation("File size cannot be negative"));
        }

        let document = Document {
            id: DocumentId::new(),
            group_id: data.group_id,
            name: data.name.clone(),
            file_path: data.file_path.clone(),
            file_type: data.file_type.clone(),
            file_size: data.file_size,
            created_at: Utc::now(),
            display_order: data.display_order,
        };
        tables.documents.insert(document.id, document.clone());
        Ok(document)
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        Ok(self.tables.write().await.documents.remove(&id).is_some())
    }

    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64> {
        let tables = self.tables.read().await;
        let count = tables
            .documents
            .values()
            .filter(|d| d.group_id == group_id)
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }
}
