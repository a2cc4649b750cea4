//! Response cache used for `If-Modified-Since` revalidation.

use std::collections::HashMap;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
/// A parsed payload together with the `Last-Modified` value it was served with.
///
/// Both fields are always written together.
pub struct CachedResponse {
    pub data: Value,
    pub last_modified: String,
}

/// Storage for the last successful response of each endpoint.
///
/// The client owns its cache and only touches it from `&mut self` methods, so
/// implementations need no internal locking.
pub trait ResponseCache: Send {
    fn get(&self, endpoint: &str) -> Option<&CachedResponse>;

    /// Insert or replace the entry for `endpoint`.
    fn insert(&mut self, endpoint: String, entry: CachedResponse);

    fn remove(&mut self, endpoint: &str);

    fn clear(&mut self);
}

#[derive(Debug, Clone, Default)]
/// Unbounded in-memory cache. Entries live as long as the client.
pub struct MemoryCache {
    entries: HashMap<String, CachedResponse>,
}

impl MemoryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ResponseCache for MemoryCache {
    fn get(&self, endpoint: &str) -> Option<&CachedResponse> {
        self.entries.get(endpoint)
    }

    fn insert(&mut self, endpoint: String, entry: CachedResponse) {
        self.entries.insert(endpoint, entry);
    }

    fn remove(&mut self, endpoint: &str) {
        self.entries.remove(endpoint);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
