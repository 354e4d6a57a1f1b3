use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::Display;

/// A validated short identifier for a shortened URL.
///
/// Short ids are 3-32 characters long and contain only ASCII
/// alphanumerics. Generated ids have a fixed length (see
/// [`DEFAULT_LENGTH`]); the wider bound exists so that lookups for ids
/// minted under a different configuration still parse.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShortId(SmolStr);

/// The id length observed throughout this system.
pub const DEFAULT_LENGTH: usize = 5;

const MIN_LENGTH: usize = 3;
const MAX_LENGTH: usize = 32;

impl ShortId {
    /// Creates a new `ShortId` after validating the input.
    pub fn new(id: impl Into<SmolStr>) -> Result<Self, EngineError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Creates a `ShortId` without validation.
    ///
    /// Use this only for ids produced by trusted internal sources
    /// (the generators are guaranteed to emit valid output).
    pub fn new_unchecked(id: impl Into<SmolStr>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    fn validate(id: &str) -> Result<(), EngineError> {
        if id.len() < MIN_LENGTH || id.len() > MAX_LENGTH {
            return Err(EngineError::InvalidId(format!(
                "length must be between {} and {}, got {}",
                MIN_LENGTH,
                MAX_LENGTH,
                id.len()
            )));
        }

        if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(EngineError::InvalidId(format!(
                "must contain only ASCII alphanumeric characters: '{}'",
                id
            )));
        }

        Ok(())
    }
}

impl Display for ShortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ShortId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = SmolStr::deserialize(deserializer)?;
        ShortId::new(s).map_err(serde::de::Error::custom)
    }
}
