use crate::generator::IdGenerator;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use snip_core::short_id::DEFAULT_LENGTH;
use snip_core::ShortId;

/// Derives the id deterministically from the URL: SHA-256, base64,
/// non-alphanumerics stripped, truncated to the configured length.
///
/// Re-shortening the same URL is idempotent. The flip side is that only
/// a few characters of digest entropy survive the truncation, so two
/// different URLs can genuinely collide; the engine fails such creates
/// outright, since retrying a deterministic function cannot help.
#[derive(Debug, Clone)]
pub struct ContentHashGenerator {
    length: usize,
}

impl ContentHashGenerator {
    /// Creates a generator producing ids of the default length.
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    /// Creates a generator producing ids of the given length.
    pub fn with_length(length: usize) -> Self {
        debug_assert!((3..=32).contains(&length));
        Self { length }
    }
}

impl Default for ContentHashGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for ContentHashGenerator {
    fn candidate(&self, url: &str) -> ShortId {
        let digest = Sha256::digest(url.as_bytes());
        let token: String = STANDARD
            .encode(digest)
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .take(self.length)
            .collect();
        ShortId::new_unchecked(token)
    }

    fn deterministic(&self) -> bool {
        true
    }
}
