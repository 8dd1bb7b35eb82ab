//! Directory-backed object storage for images and avatars.
//!
//! Objects are addressed by a relative path such as
//! `images/1700000000000_cat.png`. An upload returns a durable `file://`
//! download URL that can be embedded in a message record.

use std::path::{Component, Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::Blob;

/// Resolve `relative` under `base`, refusing anything that could escape it.
fn ensure_within(base: &Path, relative: &str) -> Result<PathBuf> {
    if relative.is_empty() || relative.contains('\\') {
        return Err(StoreError::InvalidBlobPath(relative.to_string()));
    }

    let mut resolved = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(c) => resolved.push(c),
            _ => return Err(StoreError::InvalidBlobPath(relative.to_string())),
        }
    }
    if !resolved.starts_with(base) || resolved == base {
        return Err(StoreError::InvalidBlobPath(relative.to_string()));
    }
    Ok(resolved)
}

#[derive(Debug, Clone)]
pub struct BlobStore {
    base_path: PathBuf,
    max_size: usize,
}

impl BlobStore {
    pub async fn new(base_path: PathBuf, max_size: usize) -> Result<Self> {
        fs::create_dir_all(&base_path).await?;
        let base_path = fs::canonicalize(&base_path).await?;

        info!(path = %base_path.display(), "Blob store initialized");

        Ok(Self {
            base_path,
            max_size,
        })
    }

    /// Write `data` at `path` and return its metadata, including the URL.
    pub async fn upload(&self, path: &str, data: &[u8]) -> Result<Blob> {
        if data.is_empty() {
            return Err(StoreError::EmptyBlob);
        }
        if data.len() > self.max_size {
            return Err(StoreError::BlobTooLarge {
                size: data.len(),
                max: self.max_size,
            });
        }

        let target = ensure_within(&self.base_path, path)?;
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, data).await?;

        let blob = Blob {
            id: Uuid::new_v4(),
            path: path.to_string(),
            url: file_url(&target)?,
            file_size: data.len() as i64,
            blake3_hash: hex::encode(blake3::hash(data).as_bytes()),
            created_at: Utc::now(),
        };

        debug!(path = %path, size = data.len(), "Stored blob");
        Ok(blob)
    }
}

/// Percent-encoded `file://` URL for an absolute path.
fn file_url(path: &Path) -> Result<String> {
    Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| StoreError::InvalidBlobPath(path.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn test_store() -> (BlobStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = BlobStore::new(dir.path().to_path_buf(), 1024).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_upload_and_read() {
        let (store, _dir) = test_store().await;
        let blob = store.upload("images/1_cat.png", b"png-bytes").await.unwrap();

        assert_eq!(blob.path, "images/1_cat.png");
        assert_eq!(blob.file_size, 9);
        assert!(blob.url.starts_with("file://"));
        assert!(blob.url.ends_with("images/1_cat.png"));
        let on_disk = Url::parse(&blob.url).unwrap().to_file_path().unwrap();
        assert_eq!(std::fs::read(on_disk).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_url_survives_reserved_characters() {
        let (store, _dir) = test_store().await;
        let blob = store
            .upload("images/1_my cat #1 100%?.png", b"png-bytes")
            .await
            .unwrap();

        let url = Url::parse(&blob.url).unwrap();
        assert!(url.fragment().is_none());
        assert!(url.query().is_none());
        let on_disk = url.to_file_path().unwrap();
        assert!(on_disk.ends_with("images/1_my cat #1 100%?.png"));
        assert_eq!(std::fs::read(on_disk).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn test_hash_is_content_addressed() {
        let (store, _dir) = test_store().await;
        let a = store.upload("images/a", b"same").await.unwrap();
        let b = store.upload("avatars/b", b"same").await.unwrap();
        assert_eq!(a.blake3_hash, b.blake3_hash);
        assert_ne!(a.url, b.url);
    }

    #[tokio::test]
    async fn test_limits() {
        let (store, _dir) = test_store().await;
        assert!(matches!(store.upload("images/e", b"").await, Err(StoreError::EmptyBlob)));
        assert!(matches!(
            store.upload("images/big", &[0u8; 2048]).await,
            Err(StoreError::BlobTooLarge { size: 2048, max: 1024 })
        ));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let (store, _dir) = test_store().await;
        for bad in ["../escape", "/etc/passwd", "images/../../x", "", "a\\b"] {
            assert!(
                matches!(store.upload(bad, b"x").await, Err(StoreError::InvalidBlobPath(_))),
                "{bad} should be rejected"
            );
        }
    }
}
