use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;

use crate::content_store::{ContentStore, SortOrder, TagCount};
use crate::error::StoreError;
use crate::post::{Document, Post};

/// Handle to a store shared between threads. Readers run concurrently,
/// ingest and remove are exclusive. Queries hand back owned posts so no
/// guard outlives the call.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<RwLock<ContentStore>>,
}

impl SharedStore {
    pub fn new(store: ContentStore) -> Self {
        SharedStore {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // A writer that panicked either applied its change for one id or did not
    // touch the map at all, so the data behind a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, ContentStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ContentStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn ingest(&self, post: Post) -> Result<Option<Post>, StoreError> {
        self.write().ingest(post)
    }

    pub fn ingest_document(&self, doc: Document) -> Result<Option<Post>, StoreError> {
        // Validate before taking the lock
        let post = Post::try_from(doc)?;
        self.write().ingest(post)
    }

    pub fn remove(&self, id: &str) -> Option<Post> {
        self.write().remove(id)
    }

    pub fn get(&self, id: &str) -> Result<Post, StoreError> {
        self.read().get(id).cloned()
    }

    pub fn list_all(&self, order: SortOrder) -> Vec<Post> {
        self.read().list_all(order).to_owned_posts()
    }

    pub fn list_by_tag(&self, tag: &str, order: SortOrder) -> Vec<Post> {
        self.read().list_by_tag(tag, order).to_owned_posts()
    }

    pub fn list_published(&self, as_of: NaiveDate, order: SortOrder) -> Vec<Post> {
        self.read().list_published(as_of, order).to_owned_posts()
    }

    pub fn tags(&self) -> Vec<TagCount> {
        self.read().tags()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
