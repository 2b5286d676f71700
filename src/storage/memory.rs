use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use super::{BlobStore, StoredObject};

/// In-memory blob store used by the test suites. Can be flipped into a
/// failing mode to exercise the upload-failure path.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    objects: Mutex<HashMap<String, Bytes>>,
    fail_puts: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let store = Self::new();
        store.fail_puts.store(true, Ordering::SeqCst);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_puts.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.objects.lock().expect("memory store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.objects
            .lock()
            .expect("memory store mutex poisoned")
            .contains_key(handle)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, original_name: &str, data: Bytes) -> anyhow::Result<StoredObject> {
        if self.fail_puts.load(Ordering::SeqCst) {
            anyhow::bail!("blob store unavailable");
        }
        let handle = format!("mem/{}", Uuid::new_v4());
        self.objects
            .lock()
            .expect("memory store mutex poisoned")
            .insert(handle.clone(), data);
        Ok(StoredObject {
            original_name: original_name.to_string(),
            url: format!("memory://{}", handle),
            handle,
        })
    }

    async fn delete(&self, handle: &str) -> anyhow::Result<()> {
        self.objects
            .lock()
            .expect("memory store mutex poisoned")
            .remove(handle);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stores_and_deletes_objects() {
        let store = MemoryBlobStore::new();
        let stored = store
            .put("logo.png", Bytes::from_static(b"\x89PNG"))
            .await
            .unwrap();
        assert!(store.contains(&stored.handle));

        store.delete(&stored.handle).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn failing_mode_rejects_puts() {
        let store = MemoryBlobStore::failing();
        assert!(store.put("x.pdf", Bytes::new()).await.is_err());
        assert!(store.is_empty());
    }
}
