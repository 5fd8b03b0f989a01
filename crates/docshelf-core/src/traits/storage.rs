//! Storage provider trait for pluggable object storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for object storage backends.
///
/// Objects are addressed by an opaque key. Implementations exist for the
/// local filesystem, an in-process map, and S3-compatible buckets; they
/// live in `docshelf-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read an object into memory.
    ///
    /// Returns a `NotFound` error when no object exists under `key`.
    async fn read_bytes(&self, key: &str) -> AppResult<Bytes>;

    /// Store bytes under a new key.
    ///
    /// Keys are never overwritten: writing to an existing key fails with
    /// a `Conflict` error.
    async fn write(&self, key: &str, data: Bytes) -> AppResult<()>;

    /// Delete the object stored under `key`.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}
