use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use uuid::Uuid;

use super::{BlobStore, StoredObject};

/// Blob store backed by a directory on local disk, served back to clients
/// under `/uploads` by the static-file layer.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn sanitized_extension(original_name: &str) -> String {
        Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }

    fn resolve(&self, handle: &str) -> anyhow::Result<PathBuf> {
        let relative = Path::new(handle);
        // Handles are generated by `put` and never contain parent
        // components; reject anything else outright.
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            anyhow::bail!("invalid storage handle: {}", handle);
        }
        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, original_name: &str, data: Bytes) -> anyhow::Result<StoredObject> {
        let ext = Self::sanitized_extension(original_name);
        let handle = format!("{}.{}", Uuid::new_v4(), ext);

        fs::create_dir_all(&self.root).await?;
        let path = self.root.join(&handle);
        fs::write(&path, &data).await?;

        Ok(StoredObject {
            original_name: original_name.to_string(),
            url: format!(
                "{}/uploads/{}",
                self.public_base_url.trim_end_matches('/'),
                handle
            ),
            handle,
        })
    }

    async fn delete(&self, handle: &str) -> anyhow::Result<()> {
        let path = self.resolve(handle)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> LocalBlobStore {
        let dir = std::env::temp_dir().join(format!("jobboard-test-{}", Uuid::new_v4()));
        LocalBlobStore::new(dir, "http://localhost:8080")
    }

    #[tokio::test]
    async fn put_then_delete_round_trip() {
        let store = temp_store();
        let stored = store
            .put("resume.pdf", Bytes::from_static(b"%PDF-1.4 test"))
            .await
            .expect("put");

        assert_eq!(stored.original_name, "resume.pdf");
        assert!(stored.handle.ends_with(".pdf"));
        assert!(stored.url.starts_with("http://localhost:8080/uploads/"));

        store.delete(&stored.handle).await.expect("delete");
        // Deleting an already-removed handle is not an error.
        store.delete(&stored.handle).await.expect("idempotent");
    }

    #[tokio::test]
    async fn delete_rejects_traversal_handles() {
        let store = temp_store();
        assert!(store.delete("../etc/passwd").await.is_err());
        assert!(store.delete("/etc/passwd").await.is_err());
    }
}
