//! Presentation state for interactive front ends.
//!
//! A [`Shelf`] owns the cached group and document lists, the admin session,
//! and a notification sink. Every operation catches collaborator errors and
//! reports them through the sink instead of returning them. Every mutating
//! operation ends by refetching the affected list wholesale.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::RwLock;
use tracing::debug;

use docshelf_auth::{AdminAuthenticator, AdminClaims, AdminToken};
use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::ordering::{self, MoveDirection};
use docshelf_core::traits::{Notification, NotificationSink};
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_entity::document::Document;
use docshelf_entity::group::Group;

use crate::document::{DocumentService, DownloadedFile, UploadRequest, ViewLink};
use crate::group::GroupService;

#[derive(Debug, Default)]
struct ShelfState {
    groups: Vec<Group>,
    documents: Vec<Document>,
    session: Option<AdminToken>,
}

/// Cached view of the shelf plus the operations a user can trigger on it.
pub struct Shelf {
    groups: Arc<GroupService>,
    documents: Arc<DocumentService>,
    auth: Arc<AdminAuthenticator>,
    sink: Arc<dyn NotificationSink>,
    state: RwLock<ShelfState>,
}

impl Shelf {
    pub fn new(
        groups: Arc<GroupService>,
        documents: Arc<DocumentService>,
        auth: Arc<AdminAuthenticator>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            groups,
            documents,
            auth,
            sink,
            state: RwLock::new(ShelfState::default()),
        }
    }

    /// Cached groups in presentation order.
    pub async fn groups(&self) -> Vec<Group> {
        let state = self.state.read().await;
        ordering::sorted(&state.groups).into_iter().cloned().collect()
    }

    /// Cached documents of one group in presentation order.
    pub async fn documents_in(&self, group_id: GroupId) -> Vec<Document> {
        let state = self.state.read().await;
        let mut docs: Vec<Document> = state
            .documents
            .iter()
            .filter(|d| d.group_id == group_id)
            .cloned()
            .collect();
        ordering::sort_siblings(&mut docs);
        docs
    }

    /// All cached documents.
    pub async fn documents(&self) -> Vec<Document> {
        self.state.read().await.documents.clone()
    }

    /// Whether an admin session is held.
    pub async fn is_admin(&self) -> bool {
        self.state.read().await.session.is_some()
    }

    /// Refetch both lists. Returns `false` if either fetch failed; a failed
    /// fetch leaves the previous cached list in place.
    pub async fn refresh(&self) -> bool {
        let groups_ok = self.refresh_groups().await;
        let documents_ok = self.refresh_documents().await;
        groups_ok && documents_ok
    }

    async fn refresh_groups(&self) -> bool {
        match self.groups.list_groups().await {
            Ok(groups) => {
                self.state.write().await.groups = groups;
                true
            }
            Err(e) => {
                self.fail("Error fetching groups", &e);
                false
            }
        }
    }

    async fn refresh_documents(&self) -> bool {
        match self.documents.list_documents().await {
            Ok(documents) => {
                self.state.write().await.documents = documents;
                true
            }
            Err(e) => {
                self.fail("Error fetching documents", &e);
                false
            }
        }
    }

    /// Create a group at the end of the list.
    pub async fn create_group(&self, name: &str) -> Option<Group> {
        match self.groups.create_group(name).await {
            Ok(group) => {
                self.sink.notify(Notification::success("Group created successfully"));
                self.refresh_groups().await;
                Some(group)
            }
            Err(e) => {
                self.fail("Error creating group", &e);
                None
            }
        }
    }

    /// Upload a file into a group.
    ///
    /// When the object was stored but its record was not, the failure is
    /// reported as "Error saving document" and the list is still refetched.
    pub async fn upload(
        &self,
        group_id: GroupId,
        file_name: &str,
        content_type: Option<String>,
        data: Bytes,
    ) -> Option<Document> {
        let request = UploadRequest {
            group_id,
            file_name: file_name.to_string(),
            content_type,
            data,
        };
        let result = self.documents.upload(request).await;
        let document = match result {
            Ok(document) => {
                self.sink.notify(Notification::success("File uploaded successfully"));
                Some(document)
            }
            Err(e) if e.is(ErrorKind::PartialFailure) => {
                self.fail("Error saving document", &e);
                None
            }
            Err(e) => {
                self.fail("Error uploading file", &e);
                None
            }
        };
        self.refresh_documents().await;
        document
    }

    /// Fetch a document's bytes.
    pub async fn download(&self, id: DocumentId) -> Option<DownloadedFile> {
        self.documents
            .download(id)
            .await
            .inspect_err(|e| self.fail("Error downloading file", e))
            .ok()
    }

    /// Resolve where a document can be opened.
    pub async fn view(&self, id: DocumentId) -> Option<ViewLink> {
        self.documents
            .view_link(id)
            .await
            .inspect_err(|e| self.fail("Error opening file", e))
            .ok()
    }

    /// Move a group one step using the cached list, then refetch.
    ///
    /// Returns `true` when both swap writes were applied.
    pub async fn move_group(&self, id: GroupId, direction: MoveDirection) -> bool {
        let cached = self.state.read().await.groups.clone();
        let moved = match self.groups.move_group_in(&cached, id, direction).await {
            Ok(outcome) => outcome.is_moved(),
            Err(e) => {
                self.fail("Error updating group order", &e);
                false
            }
        };
        self.refresh_groups().await;
        moved
    }

    /// Move a document one step within its group using the cached list,
    /// then refetch.
    pub async fn move_document(&self, id: DocumentId, direction: MoveDirection) -> bool {
        let cached = self.state.read().await.documents.clone();
        let moved = match self.documents.move_document_in(&cached, id, direction).await {
            Ok(outcome) => outcome.is_moved(),
            Err(e) => {
                self.fail("Error updating document order", &e);
                false
            }
        };
        self.refresh_documents().await;
        moved
    }

    /// Start an admin session.
    pub async fn login_admin(&self, username: &str, password: &str) -> bool {
        match self.auth.login(username, password) {
            Ok(token) => {
                self.state.write().await.session = Some(token);
                self.sink.notify(Notification::success("Admin login successful"));
                true
            }
            Err(e) if e.is(ErrorKind::Authentication) => {
                self.sink.notify(
                    Notification::failure("Invalid credentials")
                        .with_description("Please check your username and password"),
                );
                false
            }
            Err(e) => {
                self.fail("Error logging in", &e);
                false
            }
        }
    }

    /// Drop the admin session.
    pub async fn logout(&self) {
        self.state.write().await.session = None;
    }

    /// Delete an empty group. Requires an admin session.
    pub async fn delete_group(&self, id: GroupId) -> bool {
        let Some(admin) = self.admin_claims().await else {
            return false;
        };
        let deleted = match self.groups.delete_group(&admin, id).await {
            Ok(()) => {
                self.sink.notify(Notification::success("Group deleted successfully"));
                true
            }
            Err(e) => {
                self.fail("Error deleting group", &e);
                false
            }
        };
        self.refresh_groups().await;
        deleted
    }

    /// Delete a document and its stored object. Requires an admin session.
    pub async fn delete_document(&self, id: DocumentId) -> bool {
        let Some(admin) = self.admin_claims().await else {
            return false;
        };
        let deleted = match self.documents.delete_document(&admin, id).await {
            Ok(()) => {
                self.sink.notify(Notification::success("Document deleted successfully"));
                true
            }
            Err(e) => {
                self.fail("Error deleting document", &e);
                false
            }
        };
        self.refresh_documents().await;
        deleted
    }

    /// Rewrite group positions to `1..=n`. Requires an admin session.
    pub async fn renumber_groups(&self) -> bool {
        let Some(admin) = self.admin_claims().await else {
            return false;
        };
        let ok = match self.groups.renumber_groups(&admin).await {
            Ok(writes) => {
                self.sink.notify(
                    Notification::success("Group order repaired")
                        .with_description(format!("{} group(s) updated", writes.len())),
                );
                true
            }
            Err(e) => {
                self.fail("Error repairing group order", &e);
                false
            }
        };
        self.refresh_groups().await;
        ok
    }

    /// Rewrite document positions in a group to `1..=n`. Requires an admin
    /// session.
    pub async fn renumber_documents(&self, group_id: GroupId) -> bool {
        let Some(admin) = self.admin_claims().await else {
            return false;
        };
        let ok = match self.documents.renumber_documents(&admin, group_id).await {
            Ok(writes) => {
                self.sink.notify(
                    Notification::success("Document order repaired")
                        .with_description(format!("{} document(s) updated", writes.len())),
                );
                true
            }
            Err(e) => {
                self.fail("Error repairing document order", &e);
                false
            }
        };
        self.refresh_documents().await;
        ok
    }

    async fn admin_claims(&self) -> Option<AdminClaims> {
        let token = self.state.read().await.session.clone();
        let Some(token) = token else {
            self.sink.notify(
                Notification::failure("Admin access required")
                    .with_description("Log in as admin to continue"),
            );
            return None;
        };
        match self.auth.verify(&token.access_token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!(error = %e, "Admin session rejected");
                self.state.write().await.session = None;
                self.sink.notify(
                    Notification::failure("Admin session expired")
                        .with_description("Please log in again"),
                );
                None
            }
        }
    }

    fn fail(&self, title: &str, error: &AppError) {
        self.sink
            .notify(Notification::failure(title).with_description(error.detail()));
    }
}
