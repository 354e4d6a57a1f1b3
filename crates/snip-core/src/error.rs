use thiserror::Error;

/// Errors raised by durable store backends.
///
/// `Conflict` is the collision signal the allocation engine folds into
/// its retry logic; every other variant is a backend failure that
/// propagates to the caller.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("id already exists: {0}")]
    Conflict(String),
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out: {0}")]
    Timeout(String),
    #[error("store query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors raised by cache backends.
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),
    #[error("cache operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the allocation engine.
///
/// "Not found" is not represented here: negative lookups are a normal
/// outcome and come back as `Ok(None)` / `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The random-token strategy could not find a free id within the
    /// retry bound.
    #[error("could not allocate a unique id after {attempts} attempts")]
    AllocationExhausted { attempts: u32 },
    /// A deterministic candidate collides with a record holding a
    /// different URL. No retry is meaningful.
    #[error("id collision for '{0}': candidate is already bound to a different url")]
    Collision(String),
    /// The supplied id is malformed (boundary validation).
    #[error("invalid short id: {0}")]
    InvalidId(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),
}
