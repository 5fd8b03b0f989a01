//! Local filesystem storage provider.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use docshelf_core::error::{AppError, ErrorKind};
use docshelf_core::result::AppResult;
use docshelf_core::traits::StorageProvider;

use crate::key::validate_key;

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored objects.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a key to an absolute path within the root.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    /// Ensure the parent directory of a path exists.
    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

/// Writes `data` into a freshly created object. On failure the truncated
/// file is removed so the key is not left holding partial content.
async fn fill_or_discard<W>(path: &Path, mut writer: W, data: &[u8], key: &str) -> AppResult<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(data).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    let Err(e) = written else {
        return Ok(());
    };

    drop(writer);
    if let Err(cleanup) = fs::remove_file(path).await {
        warn!(key, error = %cleanup, "Failed to remove partially written object");
    }
    Err(AppError::with_source(
        ErrorKind::Storage,
        format!("Failed to write object: {key}"),
        e,
    ))
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let full_path = self.resolve(key)?;
        let data = fs::read(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {key}"))
            } else {
                AppError::with_source(ErrorKind::Storage, format!("Failed to read object: {key}"), e)
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::AlreadyExists {
                    AppError::conflict(format!("Object already exists: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create object: {key}"),
                        e,
                    )
                }
            })?;

        fill_or_discard(&full_path, file, &data, key).await?;

        debug!(key, bytes = data.len(), "Wrote object");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_path = self.resolve(key)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete object: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        Ok(fs::try_exists(&full_path).await.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path().to_str().unwrap())
            .await
            .unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, provider) = provider().await;

        let data = Bytes::from("hello world");
        provider.write("1700-abcd1234-a.txt", data.clone()).await.unwrap();
        assert!(provider.exists("1700-abcd1234-a.txt").await.unwrap());

        let read_back = provider.read_bytes("1700-abcd1234-a.txt").await.unwrap();
        assert_eq!(read_back, data);

        provider.delete("1700-abcd1234-a.txt").await.unwrap();
        assert!(!provider.exists("1700-abcd1234-a.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_write_rejects_existing_key() {
        let (_dir, provider) = provider().await;
        provider.write("k.txt", Bytes::from("one")).await.unwrap();

        let err = provider.write("k.txt", Bytes::from("two")).await.unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert_eq!(provider.read_bytes("k.txt").await.unwrap(), Bytes::from("one"));
    }

    #[tokio::test]
    async fn test_read_missing() {
        let (_dir, provider) = provider().await;
        let err = provider.read_bytes("missing.pdf").await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let (_dir, provider) = provider().await;
        let err = provider
            .write("../outside.txt", Bytes::from("x"))
            .await
            .unwrap_err();
        assert!(err.is(ErrorKind::Validation));
    }

    #[tokio::test]
    async fn test_read_failure_keeps_io_cause() {
        let (dir, provider) = provider().await;
        std::fs::create_dir(dir.path().join("1700-abcd1234-a.txt")).unwrap();

        let err = provider.read_bytes("1700-abcd1234-a.txt").await.unwrap_err();
        assert!(err.is(ErrorKind::Storage));
        let detail = err.detail();
        assert!(detail.starts_with("Failed to read object: 1700-abcd1234-a.txt: "), "{detail}");
        assert!(detail.to_lowercase().contains("directory"), "{detail}");
    }

    struct DiskFull;

    impl AsyncWrite for DiskFull {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("No space left on device")))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<std::io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_removes_truncated_object() {
        let (dir, provider) = provider().await;
        let path = dir.path().join("1700-abcd1234-big.bin");
        std::fs::write(&path, b"partial").unwrap();

        let err = fill_or_discard(&path, DiskFull, b"payload", "1700-abcd1234-big.bin")
            .await
            .unwrap_err();

        assert!(err.is(ErrorKind::Storage));
        assert!(err.detail().contains("No space left on device"));
        assert!(!provider.exists("1700-abcd1234-big.bin").await.unwrap());
        provider
            .write("1700-abcd1234-big.bin", Bytes::from("retry"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let (_dir, provider) = provider().await;
        provider.delete("never-written").await.unwrap();
        assert!(provider.health_check().await.unwrap());
    }
}
