use crate::generator::IdGenerator;
use async_trait::async_trait;
use snip_core::{
    EngineError, LinkCache, LinkRecord, LinkStore, ShortId, StoreError, UrlShortener,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Type alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

/// How many candidate ids the random strategy may try per create.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// The allocation engine.
///
/// Composes a durable store, a resolution cache, and an id generator.
/// Reads consult the cache first and backfill it on a store hit;
/// creates write the cache entry before the id is handed out; deletes
/// evict only after the store confirms a row was removed. The engine's
/// own pre-insert check is an optimization: the store's primary key is
/// the uniqueness authority, and a conflict it reports is folded into
/// the same collision handling as a pre-insert hit.
#[derive(Debug)]
pub struct LinkEngine<S, C, G> {
    store: Arc<S>,
    cache: Arc<C>,
    generator: Arc<G>,
    max_attempts: u32,
}

impl<S, C, G> Clone for LinkEngine<S, C, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: Arc::clone(&self.cache),
            generator: Arc::clone(&self.generator),
            max_attempts: self.max_attempts,
        }
    }
}

impl<S: LinkStore, C: LinkCache, G: IdGenerator> LinkEngine<S, C, G> {
    /// Creates an engine with the default retry bound.
    pub fn new(store: S, cache: C, generator: G) -> Self {
        Self::with_max_attempts(store, cache, generator, DEFAULT_MAX_ATTEMPTS)
    }

    /// Creates an engine with a custom retry bound for the random
    /// strategy. Deterministic generators always get exactly one
    /// attempt.
    pub fn with_max_attempts(store: S, cache: C, generator: G, max_attempts: u32) -> Self {
        Self {
            store: Arc::new(store),
            cache: Arc::new(cache),
            generator: Arc::new(generator),
            max_attempts: max_attempts.max(1),
        }
    }

    /// The read path: cache first, store on a miss, backfilling the
    /// cache when the store has the record.
    async fn read_through(&self, id: &ShortId) -> Result<Option<String>> {
        if let Some(url) = self.cache.get(id).await? {
            trace!(%id, "resolved from cache");
            return Ok(Some(url));
        }

        match self.store.get(id).await? {
            Some(url) => {
                self.cache.set(id, &url).await?;
                trace!(%id, "resolved from store, cache backfilled");
                Ok(Some(url))
            }
            None => Ok(None),
        }
    }

    /// Handles a deterministic candidate that turned out to be taken:
    /// the same URL means an idempotent re-shorten, anything else is a
    /// final collision.
    fn settle_deterministic(id: ShortId, existing: Option<String>, url: &str) -> Result<ShortId> {
        match existing {
            Some(existing) if existing == url => {
                trace!(%id, "re-shorten of an existing url");
                Ok(id)
            }
            _ => Err(EngineError::Collision(id.to_string())),
        }
    }
}

#[async_trait]
impl<S: LinkStore, C: LinkCache, G: IdGenerator> UrlShortener for LinkEngine<S, C, G> {
    async fn shorten(&self, url: &str) -> Result<ShortId> {
        let deterministic = self.generator.deterministic();
        let max_attempts = if deterministic { 1 } else { self.max_attempts };

        for attempt in 1..=max_attempts {
            let id = self.generator.candidate(url);

            match self.read_through(&id).await? {
                Some(existing) => {
                    if deterministic {
                        return Self::settle_deterministic(id, Some(existing), url);
                    }
                    debug!(%id, attempt, "candidate id already taken, retrying");
                }
                None => match self.store.insert(&id, url).await {
                    Ok(()) => {
                        // Write-through: the cache entry must exist
                        // before the id is handed out, so the very next
                        // read is a hit.
                        self.cache.set(&id, url).await?;
                        debug!(%id, attempt, "allocated short id");
                        return Ok(id);
                    }
                    Err(StoreError::Conflict(_)) if deterministic => {
                        // Lost a check-then-insert race to a concurrent
                        // create of the same candidate.
                        warn!(%id, "concurrent insert on deterministic candidate");
                        let existing = self.store.get(&id).await?;
                        let winner = Self::settle_deterministic(id, existing, url)?;
                        self.cache.set(&winner, url).await?;
                        return Ok(winner);
                    }
                    Err(StoreError::Conflict(_)) => {
                        warn!(%id, attempt, "store rejected duplicate id, retrying");
                    }
                    Err(err) => return Err(err.into()),
                },
            }
        }

        Err(EngineError::AllocationExhausted {
            attempts: max_attempts,
        })
    }

    async fn resolve(&self, id: &ShortId) -> Result<Option<String>> {
        self.read_through(id).await
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        // Store first; the cache entry survives when nothing was
        // actually removed, since the store stays the source of truth.
        if !self.store.delete(id).await? {
            return Ok(false);
        }

        self.cache.remove(id).await?;
        debug!(%id, "deleted short id");
        Ok(true)
    }

    async fn all_links(&self) -> Result<Vec<LinkRecord>> {
        Ok(self.store.all().await?)
    }

    async fn bulk_create(&self, urls: &[String]) -> Result<Vec<ShortId>> {
        // One candidate per URL, generated independently; conflicts are
        // settled by the store's batch upsert (last write wins per id).
        let records: Vec<LinkRecord> = urls
            .iter()
            .map(|url| LinkRecord::new(self.generator.candidate(url), url.clone()))
            .collect();

        self.store.upsert_many(&records).await?;

        for record in &records {
            self.cache.set(&record.id, &record.url).await?;
        }
        debug!(count = records.len(), "bulk-created short ids");

        Ok(records.into_iter().map(|record| record.id).collect())
    }

    async fn bulk_delete(&self, ids: &[ShortId]) -> Result<u64> {
        let removed = self.store.delete_many(ids).await?;

        // Evict every listed id regardless of whether its row existed;
        // removing an absent cache entry is a harmless no-op.
        for id in ids {
            self.cache.remove(id).await?;
        }
        debug!(requested = ids.len(), removed, "bulk-deleted short ids");

        Ok(removed)
    }

    async fn is_cached(&self, id: &ShortId) -> Result<bool> {
        Ok(self.cache.contains(id).await?)
    }
}
