use crate::error::EngineError;
use crate::link::LinkRecord;
use crate::short_id::ShortId;
use async_trait::async_trait;

/// Type alias for engine results.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The allocation engine's contract, as consumed by the HTTP boundary.
///
/// All reads and writes pass through an implementation of this trait,
/// which consults the cache first on reads and updates cache and store
/// together on every mutating operation.
#[async_trait]
pub trait UrlShortener: Send + Sync + 'static {
    /// Allocates a unique id for `url` and durably records the mapping.
    ///
    /// Fails with [`EngineError::AllocationExhausted`] when the random
    /// strategy runs out of attempts, or [`EngineError::Collision`] when
    /// a deterministic candidate is bound to a different URL.
    async fn shorten(&self, url: &str) -> Result<ShortId>;

    /// Resolves an id to its URL. `Ok(None)` means the id has no live
    /// record; backend failures surface as `Err`.
    async fn resolve(&self, id: &ShortId) -> Result<Option<String>>;

    /// Deletes the record for an id. Returns `true` if it existed.
    async fn delete(&self, id: &ShortId) -> Result<bool>;

    /// Every live record, ordered by id.
    async fn all_links(&self) -> Result<Vec<LinkRecord>>;

    /// Allocates one id per input URL and records the whole batch in a
    /// single store operation. Returns ids in input order.
    async fn bulk_create(&self, urls: &[String]) -> Result<Vec<ShortId>>;

    /// Deletes every listed id in one store operation and returns the
    /// count of records actually removed.
    async fn bulk_delete(&self, ids: &[ShortId]) -> Result<u64>;

    /// Whether the id currently has a cache entry. Diagnostic only.
    async fn is_cached(&self, id: &ShortId) -> Result<bool>;
}
