use crate::generator::IdGenerator;
use snip_core::short_id::DEFAULT_LENGTH;
use snip_core::ShortId;
use std::iter;

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Draws fixed-length tokens uniformly from the 62-symbol alphanumeric
/// alphabet.
///
/// Collisions are possible but statistically rare (62^5 tokens at the
/// default length); the engine resolves them by retry.
#[derive(Debug, Clone)]
pub struct RandomTokenGenerator {
    length: usize,
}

impl RandomTokenGenerator {
    /// Creates a generator producing tokens of the default length.
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    /// Creates a generator producing tokens of the given length.
    pub fn with_length(length: usize) -> Self {
        debug_assert!((3..=32).contains(&length));
        Self { length }
    }
}

impl Default for RandomTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for RandomTokenGenerator {
    fn candidate(&self, _url: &str) -> ShortId {
        let token: String =
            iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
                .take(self.length)
                .collect();
        ShortId::new_unchecked(token)
    }

    fn deterministic(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_have_the_configured_length() {
        let generator = RandomTokenGenerator::new();
        assert_eq!(generator.candidate("https://example.com").as_str().len(), 5);

        let generator = RandomTokenGenerator::with_length(8);
        assert_eq!(generator.candidate("https://example.com").as_str().len(), 8);
    }

    #[test]
    fn tokens_are_alphanumeric() {
        let generator = RandomTokenGenerator::new();
        for _ in 0..100 {
            let id = generator.candidate("https://example.com");
            assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn candidates_ignore_the_url() {
        // Two draws for the same URL should (overwhelmingly) differ;
        // sampling a few keeps the flake probability negligible.
        let generator = RandomTokenGenerator::new();
        let candidates: Vec<String> = (0..8)
            .map(|_| generator.candidate("https://example.com").to_string())
            .collect();
        let first = &candidates[0];
        assert!(candidates.iter().any(|c| c != first));
    }

    #[test]
    fn not_deterministic() {
        assert!(!RandomTokenGenerator::new().deterministic());
    }
}
