//! Test doubles shared by the service tests.

use std::io;
use std::sync::{Arc, Mutex, OnceLock};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;

use docshelf_auth::AdminAuthenticator;
use docshelf_auth::password::PasswordHasher;
use docshelf_core::config::AuthConfig;
use docshelf_core::ErrorKind;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::{DisplayOrderWriter, StorageProvider};
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_database::memory::{MemoryDocumentStore, MemoryGroupStore};
use docshelf_database::{DocumentStore, GroupStore, MemoryDatabase};
use docshelf_entity::document::{CreateDocument, Document};
use docshelf_entity::group::{CreateGroup, Group};
use docshelf_storage::StorageManager;
use docshelf_storage::providers::MemoryStorageProvider;

use crate::{DocumentService, GroupService};

pub const ADMIN_PASSWORD: &str = "shelf-admin";

pub fn group_fixture(name: &str, display_order: i32) -> Group {
    Group {
        id: GroupId::new(),
        name: name.to_string(),
        created_at: Utc::now(),
        display_order,
    }
}

/// Fails the n-th write (1-based) once `fail_on` is set. Counts every call.
#[derive(Debug, Default)]
pub struct WriteFault {
    fail_on: AtomicUsize,
    calls: AtomicUsize,
}

impl WriteFault {
    pub fn fail_on(&self, n: usize) {
        self.calls.store(0, Ordering::SeqCst);
        self.fail_on.store(n, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.load(Ordering::SeqCst) == call {
            return Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to update display order",
                io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"),
            ));
        }
        Ok(())
    }
}

/// Records writes instead of persisting them.
#[derive(Debug, Default)]
pub struct FlakyWriter {
    fault: WriteFault,
    calls: Mutex<Vec<(GroupId, i32)>>,
    applied: Mutex<Vec<(GroupId, i32)>>,
}

impl FlakyWriter {
    pub fn failing_on(n: usize) -> Self {
        let writer = Self::default();
        writer.fault.fail_on(n);
        writer
    }

    pub fn calls(&self) -> Vec<(GroupId, i32)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn applied(&self) -> Vec<(GroupId, i32)> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl DisplayOrderWriter<GroupId> for FlakyWriter {
    async fn write_display_order(&self, id: GroupId, display_order: i32) -> AppResult<()> {
        self.calls.lock().unwrap().push((id, display_order));
        self.fault.check()?;
        self.applied.lock().unwrap().push((id, display_order));
        Ok(())
    }
}

/// Memory group store with injectable write failures.
#[derive(Debug)]
pub struct FlakyGroupStore {
    pub inner: MemoryGroupStore,
    pub fault: WriteFault,
}

#[async_trait]
impl DisplayOrderWriter<GroupId> for FlakyGroupStore {
    async fn write_display_order(&self, id: GroupId, display_order: i32) -> AppResult<()> {
        self.fault.check()?;
        self.inner.write_display_order(id, display_order).await
    }
}

#[async_trait]
impl GroupStore for FlakyGroupStore {
    fn backend(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list_ordered(&self) -> AppResult<Vec<Group>> {
        self.inner.list_ordered().await
    }

    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, data: &CreateGroup) -> AppResult<Group> {
        self.inner.insert(data).await
    }

    async fn delete(&self, id: GroupId) -> AppResult<bool> {
        self.inner.delete(id).await
    }
}

/// Memory document store with injectable insert and write failures.
#[derive(Debug)]
pub struct FlakyDocumentStore {
    pub inner: MemoryDocumentStore,
    pub fault: WriteFault,
    pub fail_insert: AtomicBool,
}

#[async_trait]
impl DisplayOrderWriter<DocumentId> for FlakyDocumentStore {
    async fn write_display_order(&self, id: DocumentId, display_order: i32) -> AppResult<()> {
        self.fault.check()?;
        self.inner.write_display_order(id, display_order).await
    }
}

#[async_trait]
impl DocumentStore for FlakyDocumentStore {
    async fn list_ordered(&self) -> AppResult<Vec<Document>> {
        self.inner.list_ordered().await
    }

    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Document>> {
        self.inner.list_by_group(group_id).await
    }

    async fn find_by_id(&self, id: DocumentId) -> AppResult<Option<Document>> {
        self.inner.find_by_id(id).await
    }

    async fn insert(&self, data: &CreateDocument) -> AppResult<Document> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(AppError::database("injected insert failure"));
        }
        self.inner.insert(data).await
    }

    async fn delete(&self, id: DocumentId) -> AppResult<bool> {
        self.inner.delete(id).await
    }

    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64> {
        self.inner.count_by_group(group_id).await
    }
}

/// Object store whose writes and deletes can be made to fail.
#[derive(Debug, Default)]
pub struct FlakyStorage {
    pub inner: MemoryStorageProvider,
    pub fail_write: AtomicBool,
    pub fail_delete: AtomicBool,
}

#[async_trait]
impl StorageProvider for FlakyStorage {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        self.inner.read_bytes(key).await
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        if self.fail_write.load(Ordering::SeqCst) {
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write object: {key}"),
                io::Error::other("No space left on device"),
            ));
        }
        self.inner.write(key, data).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(AppError::storage("injected delete failure"));
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}

/// A full service stack over memory stores with fault hooks.
pub struct Harness {
    pub groups_store: Arc<FlakyGroupStore>,
    pub documents_store: Arc<FlakyDocumentStore>,
    pub storage: Arc<FlakyStorage>,
    pub groups: Arc<GroupService>,
    pub documents: Arc<DocumentService>,
    pub auth: Arc<AdminAuthenticator>,
}

impl Harness {
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let groups_store = Arc::new(FlakyGroupStore {
            inner: db.group_store(),
            fault: WriteFault::default(),
        });
        let documents_store = Arc::new(FlakyDocumentStore {
            inner: db.document_store(),
            fault: WriteFault::default(),
            fail_insert: AtomicBool::new(false),
        });
        let storage = Arc::new(FlakyStorage::default());
        let manager = Arc::new(StorageManager::new(
            storage.clone(),
            "http://localhost:8080/public",
            1024 * 1024,
        ));

        let groups_dyn: Arc<dyn GroupStore> = groups_store.clone();
        let documents_dyn: Arc<dyn DocumentStore> = documents_store.clone();

        let groups = Arc::new(GroupService::new(groups_dyn.clone(), documents_dyn.clone()));
        let documents = Arc::new(DocumentService::new(documents_dyn, groups_dyn, manager));

        static HASH: OnceLock<String> = OnceLock::new();
        let hash = HASH
            .get_or_init(|| PasswordHasher::new().hash_password(ADMIN_PASSWORD).unwrap())
            .clone();
        let auth = Arc::new(
            AdminAuthenticator::from_config(&AuthConfig {
                admin_username: "admin".to_string(),
                admin_password_hash: hash,
                jwt_secret: "service-tests".to_string(),
                token_ttl_minutes: 5,
            })
            .unwrap(),
        );

        Self {
            groups_store,
            documents_store,
            storage,
            groups,
            documents,
            auth,
        }
    }

    pub fn admin(&self) -> docshelf_auth::AdminClaims {
        let token = self.auth.login("admin", ADMIN_PASSWORD).unwrap();
        self.auth.verify(&token.access_token).unwrap()
    }
}
