pub mod local;
pub mod memory;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

/// A durably stored file: the name the client sent, the URL it is served
/// from, and the opaque handle used to delete it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredObject {
    pub original_name: String,
    pub url: String,
    pub handle: String,
}

/// Durable object storage for uploaded files. The service never keeps file
/// bytes itself; every resume and logo lives behind this seam so tests can
/// swap in [`MemoryBlobStore`].
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, original_name: &str, data: Bytes) -> anyhow::Result<StoredObject>;

    async fn delete(&self, handle: &str) -> anyhow::Result<()>;
}
