//! Document upload, download, viewing, reordering and deletion.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use docshelf_auth::AdminClaims;
use docshelf_core::error::AppError;
use docshelf_core::ordering::{MoveDirection, OrderWrite};
use docshelf_core::result::AppResult;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_database::{DocumentStore, GroupStore};
use docshelf_entity::document::{CreateDocument, Document, FileCategory};
use docshelf_storage::{StorageManager, generate_storage_key, mime};

use crate::reorder::{MoveOutcome, OrderedCollectionManager};

/// A file to add to a group.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Target group.
    pub group_id: GroupId,
    /// Original filename.
    pub file_name: String,
    /// MIME type reported by the client, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

/// Bytes of a stored document plus what is needed to serve them.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    /// Original filename.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

/// Where and how a document can be opened.
#[derive(Debug, Clone, Serialize)]
pub struct ViewLink {
    /// Document ID.
    pub document_id: DocumentId,
    /// Public URL of the stored object.
    pub url: String,
    /// Icon category.
    pub category: FileCategory,
    /// Whether a browser can show it inline.
    pub viewable: bool,
}

/// Manages documents and their stored bytes.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document table.
    documents: Arc<dyn DocumentStore>,
    /// Group table, for existence checks.
    groups: Arc<dyn GroupStore>,
    /// Object store.
    storage: Arc<StorageManager>,
    /// Reorder writer over the document table.
    ordering: OrderedCollectionManager<dyn DocumentStore>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        documents: Arc<dyn DocumentStore>,
        groups: Arc<dyn GroupStore>,
        storage: Arc<StorageManager>,
    ) -> Self {
        let ordering = OrderedCollectionManager::new(Arc::clone(&documents), "document");
        Self {
            documents,
            groups,
            storage,
            ordering,
        }
    }

    /// Every document, sorted by position.
    pub async fn list_documents(&self) -> AppResult<Vec<Document>> {
        self.documents.list_ordered().await
    }

    /// Documents of one group in presentation order.
    pub async fn list_group_documents(&self, group_id: GroupId) -> AppResult<Vec<Document>> {
        self.require_group(group_id).await?;
        self.documents.list_by_group(group_id).await
    }

    /// Gets a document by ID.
    pub async fn get_document(&self, id: DocumentId) -> AppResult<Document> {
        self.documents
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
    }

    /// Stores a file and records it at the end of its group.
    ///
    /// The object is written first and the record second. If the record
    /// insert fails the object stays in storage unreferenced and the error
    /// is a `PartialFailure`.
    pub async fn upload(&self, req: UploadRequest) -> AppResult<Document> {
        let file_name = req.file_name.trim().to_string();
        if file_name.is_empty() {
            return Err(AppError::validation("File name cannot be empty"));
        }
        let size = req.data.len() as u64;
        let limit = self.storage.max_upload_size_bytes();
        if size > limit {
            return Err(AppError::validation(format!(
                "File is {size} bytes; the limit is {limit} bytes"
            )));
        }
        let file_size = i64::try_from(size)
            .map_err(|_| AppError::validation("File is too large"))?;

        self.require_group(req.group_id).await?;

        let siblings = self.documents.list_by_group(req.group_id).await?;
        let display_order = self.ordering.append_order(&siblings);

        let file_type = req
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| mime::mime_or_default(&file_name).to_string());

        let key = generate_storage_key(&file_name, Utc::now());
        self.storage.put(&key, req.data).await?;
        debug!(key = %key, bytes = size, "Object stored");

        let document = self
            .documents
            .insert(&CreateDocument {
                group_id: req.group_id,
                name: file_name,
                file_path: key.clone(),
                file_type,
                file_size,
                display_order,
            })
            .await
            .map_err(|e| {
                warn!(key = %key, error = %e, "Document record insert failed; stored object left orphaned");
                AppError::partial_failure(
                    format!("File stored as '{key}' but the document record could not be saved"),
                    e,
                )
            })?;

        info!(
            document_id = %document.id,
            group_id = %document.group_id,
            name = %document.name,
            size = document.file_size,
            display_order,
            "Document uploaded"
        );
        Ok(document)
    }

    /// Fetches the stored bytes of a document.
    pub async fn download(&self, id: DocumentId) -> AppResult<DownloadedFile> {
        let document = self.get_document(id).await?;
        let data = self.storage.get(&document.file_path).await?;
        debug!(document_id = %id, bytes = data.len(), "Document downloaded");
        Ok(DownloadedFile {
            content_type: document.content_type().to_string(),
            file_name: document.name,
            data,
        })
    }

    /// Resolves the public URL of a document.
    pub async fn view_link(&self, id: DocumentId) -> AppResult<ViewLink> {
        let document = self.get_document(id).await?;
        Ok(ViewLink {
            document_id: document.id,
            url: self.storage.public_url(&document.file_path)?,
            category: document.category(),
            viewable: document.is_viewable(),
        })
    }

    /// Moves a document one step within its group, reading the current
    /// order from the store. An unknown document is a no-op.
    pub async fn move_document(
        &self,
        id: DocumentId,
        direction: MoveDirection,
    ) -> AppResult<MoveOutcome<DocumentId>> {
        let Some(document) = self.documents.find_by_id(id).await? else {
            debug!(document_id = %id, "Document not found; ignoring move");
            return Ok(MoveOutcome::Unchanged);
        };
        let siblings = self.documents.list_by_group(document.group_id).await?;
        self.ordering.move_item(&siblings, id, direction).await
    }

    /// Moves a document one step within an already fetched list.
    ///
    /// `documents` may span several groups; only the target's group is
    /// considered.
    pub async fn move_document_in(
        &self,
        documents: &[Document],
        id: DocumentId,
        direction: MoveDirection,
    ) -> AppResult<MoveOutcome<DocumentId>> {
        let Some(target) = documents.iter().find(|d| d.id == id) else {
            debug!(document_id = %id, "Document not in cached list; ignoring move");
            return Ok(MoveOutcome::Unchanged);
        };
        let siblings: Vec<Document> = documents
            .iter()
            .filter(|d| d.group_id == target.group_id)
            .cloned()
            .collect();
        self.ordering.move_item(&siblings, id, direction).await
    }

    /// Rewrites positions within a group to `1..=n`.
    pub async fn renumber_documents(
        &self,
        admin: &AdminClaims,
        group_id: GroupId,
    ) -> AppResult<Vec<OrderWrite<DocumentId>>> {
        let siblings = self.list_group_documents(group_id).await?;
        let writes = self.ordering.renumber(&siblings).await?;
        info!(admin = admin.username(), group_id = %group_id, writes = writes.len(), "Documents renumbered");
        Ok(writes)
    }

    /// Deletes a document record, then its stored object.
    ///
    /// A failure to remove the object is logged and does not fail the call.
    pub async fn delete_document(&self, admin: &AdminClaims, id: DocumentId) -> AppResult<()> {
        let document = self.get_document(id).await?;

        if !self.documents.delete(id).await? {
            return Err(AppError::not_found(format!("Document {id} not found")));
        }

        if let Err(e) = self.storage.remove(&document.file_path).await {
            warn!(key = %document.file_path, error = %e, "Stored object could not be removed");
        }

        info!(admin = admin.username(), document_id = %id, name = %document.name, "Document deleted");
        Ok(())
    }

    async fn require_group(&self, group_id: GroupId) -> AppResult<()> {
        if self.groups.find_by_id(group_id).await?.is_none() {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }
        Ok(())
    }
}
