//! Resolution-cache implementations shared across snip services.
//!
//! The production adapter is [`MokaCache`], an in-process TTL cache.
//! [`NoopCache`] disables caching entirely; every read becomes a store
//! round trip, which is always correct, only slower.

pub mod moka;
pub mod noop;

pub use moka::{CacheConfig, MokaCache, DEFAULT_SWEEP_INTERVAL, DEFAULT_TTL};
pub use noop::NoopCache;
