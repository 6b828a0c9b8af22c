//! Source-file blob storage
//!
//! Each dataset's original upload is kept as one blob addressed by a key
//! derived from the dataset id. The store owns the blob lifecycle: blobs are
//! written before their record commits and deleted when the record is pruned.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Byte storage for uploaded source files
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `data` under `key`, replacing any previous content atomically
    async fn put(&self, key: &str, data: &[u8]) -> io::Result<()>;

    /// Read the full content stored under `key`
    async fn get(&self, key: &str) -> io::Result<Vec<u8>>;

    /// Remove `key`; removing an absent key succeeds
    async fn delete(&self, key: &str) -> io::Result<()>;

    async fn exists(&self, key: &str) -> io::Result<bool>;
}

/// Filesystem blob store rooted at a single directory
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Create the root directory if needed and return a store over it
    pub async fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        debug!(root = %root.display(), "Blob store ready");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid blob key '{}'", key),
            ));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn put(&self, key: &str, data: &[u8]) -> io::Result<()> {
        let path = self.path_for(key)?;
        let staging = self.root.join(format!(".{}.part", key));

        tokio::fs::write(&staging, data).await?;
        if let Err(e) = tokio::fs::rename(&staging, &path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e);
        }

        debug!(path = %path.display(), "Blob written");
        Ok(())
    }

    async fn get(&self, key: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.path_for(key)?).await
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.path_for(key)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Blob already absent");
                Ok(())
            },
            Err(e) => Err(e),
        }
    }

    async fn exists(&self, key: &str) -> io::Result<bool> {
        tokio::fs::try_exists(self.path_for(key)?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::open(dir.path().join("uploads")).await.unwrap();

        blobs.put("a.csv", b"x,y\n1,2\n").await.unwrap();
        assert!(blobs.exists("a.csv").await.unwrap());
        assert_eq!(blobs.get("a.csv").await.unwrap(), b"x,y\n1,2\n");

        blobs.delete("a.csv").await.unwrap();
        assert!(!blobs.exists("a.csv").await.unwrap());
        assert_eq!(blobs.get("a.csv").await.unwrap_err().kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_absent_key_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::open(dir.path()).await.unwrap();
        blobs.delete("never-written.csv").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::open(dir.path()).await.unwrap();
        blobs.put("b.csv", b"data").await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["b.csv".to_string()]);
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let blobs = FsBlobStore::open(dir.path()).await.unwrap();
        for key in ["", "..", "../escape.csv", "nested/file.csv", ".hidden"] {
            let err = blobs.put(key, b"x").await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{key}");
        }
    }
}
