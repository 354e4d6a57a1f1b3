use crate::error::CacheError;
use crate::short_id::ShortId;
use async_trait::async_trait;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// The resolution cache: an in-memory mapping `id -> url` with
/// per-entry expiry.
///
/// The cache holds a derived, expendable copy of zero or more live
/// records. Losing it entirely costs a store round trip, never
/// correctness: expiry is advisory for memory reclamation. Individual
/// operations are atomic at the key level and the engine never needs
/// multi-key atomicity, so implementations require no external locking
/// beyond last-writer-wins per key.
#[async_trait]
pub trait LinkCache: Send + Sync + 'static {
    /// Returns the cached URL for an id, or `None` on a miss.
    async fn get(&self, id: &ShortId) -> Result<Option<String>>;

    /// Stores an entry under the configured time-to-live.
    async fn set(&self, id: &ShortId, url: &str) -> Result<()>;

    /// Removes an entry. Not an error if the id is absent.
    async fn remove(&self, id: &ShortId) -> Result<()>;

    /// Existence check, for diagnostic reporting.
    async fn contains(&self, id: &ShortId) -> Result<bool>;
}

#[async_trait]
impl<T: LinkCache + ?Sized> LinkCache for std::sync::Arc<T> {
    async fn get(&self, id: &ShortId) -> Result<Option<String>> {
        (**self).get(id).await
    }

    async fn set(&self, id: &ShortId, url: &str) -> Result<()> {
        (**self).set(id, url).await
    }

    async fn remove(&self, id: &ShortId) -> Result<()> {
        (**self).remove(id).await
    }

    async fn contains(&self, id: &ShortId) -> Result<bool> {
        (**self).contains(id).await
    }
}
