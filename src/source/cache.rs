//! Thumbnail caching layer
//!
//! File buffers are never cached (they are re-read fresh from the origin on
//! every operation); only derived render output is, since re-rasterizing a
//! page on every selection repaint is pure waste.

use crate::pdf::PageThumbnail;
use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Cache key: one rendered page of one loaded file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ThumbKey {
    file: String,
    page: u32,
}

struct CacheInner {
    lru: LruCache<ThumbKey, PageThumbnail>,
    total_bytes: usize,
}

/// LRU cache for rendered page thumbnails with entry count and byte budget
/// limits
pub struct ThumbnailCache {
    inner: Mutex<CacheInner>,
    max_bytes: usize,
}

fn entry_size(thumb: &PageThumbnail) -> usize {
    thumb.data_base64.len()
}

impl ThumbnailCache {
    /// Create a cache with the specified entry capacity and byte budget
    pub fn new(capacity: usize, max_bytes: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            inner: Mutex::new(CacheInner {
                lru: LruCache::new(capacity),
                total_bytes: 0,
            }),
            max_bytes,
        }
    }

    /// Store a rendered thumbnail.
    /// Rejects entries larger than max_bytes entirely.
    /// Evicts LRU entries until the byte budget is satisfied.
    pub fn put(&self, file: &str, page: u32, thumb: PageThumbnail) {
        let new_size = entry_size(&thumb);

        // Reject single entries that exceed the entire budget
        if new_size > self.max_bytes {
            return;
        }

        let key = ThumbKey {
            file: file.to_string(),
            page,
        };

        let mut inner = self.inner.lock();

        // If updating an existing key, subtract old size first
        if let Some(old) = inner.lru.pop(&key) {
            inner.total_bytes = inner.total_bytes.saturating_sub(entry_size(&old));
        }

        // Evict LRU entries until we have room
        while inner.total_bytes + new_size > self.max_bytes {
            if let Some((_evicted_key, evicted_val)) = inner.lru.pop_lru() {
                inner.total_bytes = inner.total_bytes.saturating_sub(entry_size(&evicted_val));
            } else {
                break;
            }
        }

        inner.total_bytes += new_size;
        inner.lru.put(key, thumb);
    }

    /// Get a cached thumbnail
    pub fn get(&self, file: &str, page: u32) -> Option<PageThumbnail> {
        let key = ThumbKey {
            file: file.to_string(),
            page,
        };
        self.inner.lock().lru.get(&key).cloned()
    }

    /// Check if a thumbnail is cached
    pub fn contains(&self, file: &str, page: u32) -> bool {
        let key = ThumbKey {
            file: file.to_string(),
            page,
        };
        self.inner.lock().lru.contains(&key)
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.lru.clear();
        inner.total_bytes = 0;
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        self.inner.lock().lru.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().lru.is_empty()
    }

    /// Get total bytes currently stored in the cache
    pub fn total_bytes(&self) -> usize {
        self.inner.lock().total_bytes
    }
}
