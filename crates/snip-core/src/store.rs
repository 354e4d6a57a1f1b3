use crate::error::StoreError;
use crate::link::LinkRecord;
use crate::short_id::ShortId;
use async_trait::async_trait;

/// Type alias for store results.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The durable store: a persistent table `id -> url`, unique on `id`.
///
/// The store is the single source of truth and must enforce id
/// uniqueness itself (a primary-key constraint), independent of any
/// pre-insert check performed by the engine.
#[async_trait]
pub trait LinkStore: Send + Sync + 'static {
    /// Point lookup. Returns `None` if the id has no live record.
    async fn get(&self, id: &ShortId) -> Result<Option<String>>;

    /// Inserts a new record. Returns `Err(Conflict)` if the id is
    /// already taken.
    async fn insert(&self, id: &ShortId, url: &str) -> Result<()>;

    /// Inserts a batch of records in one operation, updating the `url`
    /// column when an id already exists (last write wins per id).
    async fn upsert_many(&self, records: &[LinkRecord]) -> Result<()>;

    /// Deletes the record for an id. Returns `true` if a record existed
    /// and was removed.
    async fn delete(&self, id: &ShortId) -> Result<bool>;

    /// Deletes every record whose id is in the set, in one operation.
    /// Returns the number of records actually removed, which may be
    /// less than `ids.len()`.
    async fn delete_many(&self, ids: &[ShortId]) -> Result<u64>;

    /// Full scan: every live record, ordered by id.
    async fn all(&self) -> Result<Vec<LinkRecord>>;
}

#[async_trait]
impl<T: LinkStore + ?Sized> LinkStore for std::sync::Arc<T> {
    async fn get(&self, id: &ShortId) -> Result<Option<String>> {
        (**self).get(id).await
    }

    async fn insert(&self, id: &ShortId, url: &str) -> Result<()> {
        (**self).insert(id, url).await
    }

    async fn upsert_many(&self, records: &[LinkRecord]) -> Result<()> {
        (**self).upsert_many(records).await
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        (**self).delete(id).await
    }

    async fn delete_many(&self, ids: &[ShortId]) -> Result<u64> {
        (**self).delete_many(ids).await
    }

    async fn all(&self) -> Result<Vec<LinkRecord>> {
        (**self).all().await
    }
}
