use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::models::{MovieDetails, MovieId};

/// A cached metadata entry and when it was stored
#[derive(Debug, Clone)]
struct CacheEntry {
    details: MovieDetails,
    cached_at: DateTime<Utc>,
}

/// Size-bounded in-process LRU cache for fetched movie metadata
///
/// Keyed by movie id. Lookups refresh recency; inserting past capacity
/// evicts the least recently used entry. A capacity of zero disables
/// caching entirely.
#[derive(Clone)]
pub struct MetadataCache {
    inner: Arc<Mutex<CacheInner>>,
}

struct CacheInner {
    capacity: usize,
    entries: HashMap<MovieId, CacheEntry>,
    /// Recency order, least recently used at the front
    order: VecDeque<MovieId>,
}

impl MetadataCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner {
                capacity,
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            })),
        }
    }

    /// Retrieves cached details and marks the entry as most recently used
    pub async fn get(&self, movie_id: MovieId) -> Option<MovieDetails> {
        let mut inner = self.inner.lock().await;
        let entry = inner.entries.get(&movie_id)?;
        let details = entry.details.clone();
        let cached_at = entry.cached_at;
        inner.touch(movie_id);

        tracing::debug!(movie_id = %movie_id, cached_at = %cached_at, "Metadata cache hit");
        Some(details)
    }

    /// Stores details, evicting the least recently used entry when full
    pub async fn insert(&self, movie_id: MovieId, details: MovieDetails) {
        let mut inner = self.inner.lock().await;
        if inner.capacity == 0 {
            return;
        }

        if inner.entries.contains_key(&movie_id) {
            inner.touch(movie_id);
        } else {
            if inner.entries.len() >= inner.capacity {
                if let Some(evicted) = inner.order.pop_front() {
                    inner.entries.remove(&evicted);
                    tracing::debug!(movie_id = %evicted, "Evicted metadata cache entry");
                }
            }
            inner.order.push_back(movie_id);
        }

        inner.entries.insert(
            movie_id,
            CacheEntry {
                details,
                cached_at: Utc::now(),
            },
        );
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.entries.is_empty()
    }
}

impl CacheInner {
    /// Moves the id to the most recently used position
    fn touch(&mut self, movie_id: MovieId) {
        self.order.retain(|id| *id != movie_id);
        self.order.push_back(movie_id);
    }
}
