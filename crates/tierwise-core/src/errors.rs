//! Error types for Tierwise

use thiserror::Error;

/// Core errors that can occur in Tierwise
#[derive(Debug, Error)]
pub enum Error {
    #[error("Tier error: {0}")]
    Tier(#[from] TierError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Index lookups against the tier registry.
///
/// Rejected whitelist insertions are not errors; they come back as an
/// outcome value and leave the list untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierError {
    #[error("Tier index {index} out of range ({len} tiers)")]
    InvalidTierIndex { index: usize, len: usize },

    #[error("Whitelist index {index} out of range for tier {tier} ({len} entries)")]
    InvalidWhitelistIndex {
        tier: usize,
        index: usize,
        len: usize,
    },
}

impl TierError {
    /// Get a stable error code for callers that surface it to users
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTierIndex { .. } => "invalid_tier_index",
            Self::InvalidWhitelistIndex { .. } => "invalid_whitelist_index",
        }
    }
}

/// Result type alias for Tierwise operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_error_codes() {
        let err = TierError::InvalidTierIndex { index: 3, len: 1 };
        assert_eq!(err.error_code(), "invalid_tier_index");
        assert_eq!(err.to_string(), "Tier index 3 out of range (1 tiers)");

        let err = TierError::InvalidWhitelistIndex {
            tier: 0,
            index: 10,
            len: 10,
        };
        assert_eq!(err.error_code(), "invalid_whitelist_index");
    }

    #[test]
    fn test_tier_error_converts_into_core_error() {
        let err: Error = TierError::InvalidTierIndex { index: 0, len: 0 }.into();
        assert!(matches!(err, Error::Tier(_)));
    }
}
