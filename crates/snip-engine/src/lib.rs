//! The allocation engine of the snip URL shortener.
//!
//! [`LinkEngine`] generates candidate ids, resolves collisions, and
//! keeps the resolution cache coherent with the durable store on every
//! mutating operation. The two supported id strategies live behind the
//! [`IdGenerator`] seam.

pub mod engine;
pub mod generator;

pub use engine::{LinkEngine, DEFAULT_MAX_ATTEMPTS};
pub use generator::{ContentHashGenerator, IdGenerator, RandomTokenGenerator};
