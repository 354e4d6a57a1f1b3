use async_trait::async_trait;
use snip_core::{CacheError, LinkCache, ShortId};

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache that caches nothing.
///
/// Every `get` misses and every `set` is dropped, so all reads fall
/// through to the durable store. Used to disable caching in tests and
/// in deployments where the store is fast enough on its own.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LinkCache for NoopCache {
    async fn get(&self, _id: &ShortId) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set(&self, _id: &ShortId, _url: &str) -> Result<()> {
        Ok(())
    }

    async fn remove(&self, _id: &ShortId) -> Result<()> {
        Ok(())
    }

    async fn contains(&self, _id: &ShortId) -> Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn never_stores_anything() {
        let cache = NoopCache::new();
        let id = ShortId::new_unchecked("abc12");

        cache.set(&id, "https://example.com").await.unwrap();

        assert!(cache.get(&id).await.unwrap().is_none());
        assert!(!cache.contains(&id).await.unwrap());

        // Removal of an entry that was never kept is still fine.
        cache.remove(&id).await.unwrap();
    }
}
