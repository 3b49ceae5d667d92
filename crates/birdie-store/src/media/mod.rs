//! In-memory object storage
//!
//! Stands in for the managed object store that holds post media. Uploads
//! return a stable URL derived from the media path; deletes can be made to
//! fail so callers' orphan handling is testable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use birdie_core::{DomainError, MediaPath, MediaStore, StoreResult};

/// In-memory implementation of [`MediaStore`]
#[derive(Debug, Clone, Default)]
pub struct MemMediaStore {
    objects: Arc<DashMap<MediaPath, Vec<u8>>>,
    fail_deletes: Arc<AtomicBool>,
}

impl MemMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delete fail. Test hook for the best-effort
    /// cleanup path of post deletion.
    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Whether an object exists at a path. Test hook.
    pub fn contains(&self, path: &MediaPath) -> bool {
        self.objects.contains_key(path)
    }

    /// Number of stored objects. Test hook.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[async_trait]
impl MediaStore for MemMediaStore {
    #[instrument(skip(self, bytes))]
    async fn put(&self, path: &MediaPath, bytes: Vec<u8>) -> StoreResult<String> {
        self.objects.insert(path.clone(), bytes);
        Ok(format!("mem://media/{path}"))
    }

    #[instrument(skip(self))]
    async fn delete(&self, path: &MediaPath) -> StoreResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(DomainError::Media(format!("delete failed for {path}")));
        }
        self.objects.remove(path);
        Ok(())
    }
}
