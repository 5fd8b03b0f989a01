//! Table-store seams consumed by the service layer.
//!
//! Each call is an independent single-statement operation. No method spans
//! more than one row write, and there is no transaction API: the reorder
//! manager has to live without one.

use async_trait::async_trait;

use docshelf_core::result::AppResult;
use docshelf_core::traits::DisplayOrderWriter;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_entity::document::{CreateDocument, Document};
use docshelf_entity::group::{CreateGroup, Group};

/// Persistence for groups.
#[async_trait]
pub trait GroupStore: DisplayOrderWriter<GroupId> + std::fmt::Debug {
    /// Backend type name (e.g., "postgres", "memory").
    fn backend(&self) -> &str;

    /// Check whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// All groups sorted by `display_order`, `created_at`, id.
    async fn list_ordered(&self) -> AppResult<Vec<Group>>;

    /// Find a group by id.
    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>>;

    /// Insert a group and return the stored row.
    async fn insert(&self, data: &CreateGroup) -> AppResult<Group>;

    /// Delete a group. Returns `false` when it did not exist.
    ///
    /// Fails with `Conflict` while documents still reference the group.
    async fn delete(&self, id: GroupId) -> AppResult<bool>;
}

/// Persistence for documents.
#[async_trait]
pub trait DocumentStore: DisplayOrderWriter<DocumentId> + std::fmt::Debug {
    /// All documents sorted by `display_order`, `created_at`, id.
    async fn list_ordered(&self) -> AppResult<Vec<Document>>;

    /// Documents of one group in presentation order.
    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Document>>;

    /// Find a document by id.
    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>>;

    /// Insert a document record and return the stored row.
    async fn insert(&self, data: &CreateDocument) -> AppResult<Document>;

    /// Delete a document record. Returns `false` when it did not exist.
    async fn delete(&self, id: DocumentId) -> AppResult<bool>;

    /// Number of documents owned by a group.
    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64>;
}
