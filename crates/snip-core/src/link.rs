use crate::short_id::ShortId;
use serde::{Deserialize, Serialize};

/// A stored short-link record: one id maps to exactly one URL.
///
/// The mapping is mutable only by delete-then-recreate; there is no
/// update-in-place for changing the URL under a fixed id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// The short identifier, primary key of the durable store.
    pub id: ShortId,
    /// The original URL. Stored verbatim, no canonicalization.
    pub url: String,
}

impl LinkRecord {
    pub fn new(id: ShortId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}
