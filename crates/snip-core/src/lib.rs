//! Core types and traits for the snip URL shortener.
//!
//! This crate provides the domain model (`ShortId`, `LinkRecord`), the
//! seams the allocation engine is built against (`LinkStore`, `LinkCache`,
//! `UrlShortener`), and the per-layer error taxonomy shared by every
//! other crate in the workspace.

pub mod cache;
pub mod error;
pub mod link;
pub mod short_id;
pub mod shortener;
pub mod store;

pub use cache::LinkCache;
pub use error::{CacheError, EngineError, StoreError};
pub use link::LinkRecord;
pub use short_id::ShortId;
pub use shortener::UrlShortener;
pub use store::LinkStore;
