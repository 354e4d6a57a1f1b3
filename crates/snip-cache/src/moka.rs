use async_trait::async_trait;
use moka::future::Cache;
use snip_core::{CacheError, LinkCache, ShortId};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Default time-to-live for cache entries: one hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default interval for the background maintenance sweep: two hours.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(7200);

/// An in-process resolution cache backed by Moka.
///
/// Entries expire after a configured TTL. Expired entries are dropped
/// lazily on access; a periodic sweep (see [`MokaCache::spawn_sweeper`])
/// reclaims the rest. Expiry is a memory-reclamation mechanism, not a
/// correctness one.
#[derive(Debug, Clone)]
pub struct MokaCache {
    cache: Cache<String, String>,
}

impl MokaCache {
    /// Creates a cache with the default TTL and no capacity bound.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Creates a cache whose entries expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        let cache = Cache::builder().time_to_live(ttl).build();
        Self { cache }
    }

    /// Returns a builder for a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }

    /// Spawns a background task that runs the cache's pending
    /// maintenance every `interval`, evicting expired entries that no
    /// read has touched since they lapsed.
    ///
    /// Must be called from within a tokio runtime. Dropping the handle
    /// does not stop the task; abort it for a clean shutdown.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let cache = self.cache.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                trace!("running cache maintenance sweep");
                cache.run_pending_tasks().await;
            }
        })
    }

    /// Number of entries currently resident, pending maintenance aside.
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl Default for MokaCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkCache for MokaCache {
    async fn get(&self, id: &ShortId) -> Result<Option<String>> {
        let key = id.as_str().to_string();
        match self.cache.get(&key).await {
            Some(url) => {
                debug!(%id, "cache hit");
                Ok(Some(url))
            }
            None => {
                trace!(%id, "cache miss");
                Ok(None)
            }
        }
    }

    async fn set(&self, id: &ShortId, url: &str) -> Result<()> {
        trace!(%id, "caching url");
        self.cache
            .insert(id.as_str().to_string(), url.to_string())
            .await;
        Ok(())
    }

    async fn remove(&self, id: &ShortId) -> Result<()> {
        trace!(%id, "evicting cache entry");
        self.cache.invalidate(id.as_str()).await;
        Ok(())
    }

    async fn contains(&self, id: &ShortId) -> Result<bool> {
        // contains_key does not record an access, unlike get.
        Ok(self.cache.contains_key(id.as_str()))
    }
}

/// Configuration for a [`MokaCache`] with custom settings.
#[derive(Debug, TypedBuilder)]
pub struct CacheConfig {
    /// Time-to-live for cache entries.
    #[builder(default = DEFAULT_TTL)]
    ttl: Duration,
    /// Maximum number of entries, if bounded. Unbounded by default;
    /// documenting a capacity bound is an extension, not core behavior.
    #[builder(default, setter(strip_option))]
    max_capacity: Option<u64>,
}

impl From<CacheConfig> for MokaCache {
    fn from(config: CacheConfig) -> Self {
        let mut builder = Cache::builder().time_to_live(config.ttl);

        if let Some(capacity) = config.max_capacity {
            builder = builder.max_capacity(capacity);
        }

        MokaCache {
            cache: builder.build(),
        }
    }
}
