//! Storage manager: provider selection, upload limits and public URLs.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use docshelf_core::config::{StorageConfig, StorageProviderKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::StorageProvider;

use crate::key::validate_key;
use crate::providers::{LocalStorageProvider, MemoryStorageProvider};

/// Front door to the configured object store.
#[derive(Debug, Clone)]
pub struct StorageManager {
    provider: Arc<dyn StorageProvider>,
    public_base_url: String,
    max_upload_size_bytes: u64,
}

impl StorageManager {
    /// Wrap an already-built provider.
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        public_base_url: impl Into<String>,
        max_upload_size_bytes: u64,
    ) -> Self {
        Self {
            provider,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            max_upload_size_bytes,
        }
    }

    /// Build the provider named in configuration.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let provider: Arc<dyn StorageProvider> = match config.provider {
            StorageProviderKind::Local => {
                Arc::new(LocalStorageProvider::new(&config.local.root_path).await?)
            }
            StorageProviderKind::Memory => Arc::new(MemoryStorageProvider::new()),
            StorageProviderKind::S3 => build_s3(config).await?,
        };

        info!(
            provider = provider.provider_type(),
            public_base_url = %config.public_base_url,
            "Storage provider ready"
        );

        Ok(Self::new(
            provider,
            config.public_base_url.clone(),
            config.max_upload_size_bytes,
        ))
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn StorageProvider> {
        &self.provider
    }

    /// Largest accepted upload in bytes.
    pub fn max_upload_size_bytes(&self) -> u64 {
        self.max_upload_size_bytes
    }

    /// Store bytes under a new key.
    pub async fn put(&self, key: &str, data: Bytes) -> AppResult<()> {
        self.provider.write(key, data).await
    }

    /// Fetch the bytes stored under `key`.
    pub async fn get(&self, key: &str) -> AppResult<Bytes> {
        self.provider.read_bytes(key).await
    }

    /// Remove the object stored under `key`.
    pub async fn remove(&self, key: &str) -> AppResult<()> {
        self.provider.delete(key).await
    }

    /// Whether an object is stored under `key`.
    pub async fn exists(&self, key: &str) -> AppResult<bool> {
        self.provider.exists(key).await
    }

    /// Stable public URL of `key`. No expiry is attached.
    pub fn public_url(&self, key: &str) -> AppResult<String> {
        validate_key(key)?;
        Ok(format!("{}/{}", self.public_base_url, key))
    }

    /// Provider reachability; errors count as unhealthy.
    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await.unwrap_or(false)
    }
}

#[cfg(feature = "s3")]
async fn build_s3(config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    let provider = crate::providers::S3StorageProvider::new(&config.s3).await?;
    Ok(Arc::new(provider))
}

#[cfg(not(feature = "s3"))]
async fn build_s3(_config: &StorageConfig) -> AppResult<Arc<dyn StorageProvider>> {
    Err(docshelf_core::error::AppError::configuration(
        "S3 storage requires docshelf-storage to be built with the `s3` feature",
    ))
}
