//! Configuration types for Tierwise

use serde::{Deserialize, Serialize};

use crate::constants::{MS_PER_DAY, MS_PER_MINUTE};
use crate::{Timestamp, TokenAmount};

/// Values used when seeding a fresh tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierDefaults {
    /// Seeded tiers are named "{prefix} {position}"
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,

    /// Delay between "now" and the first tier's start
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: Timestamp,

    /// Length of each seeded tier
    #[serde(default = "default_duration_ms")]
    pub duration_ms: Timestamp,

    #[serde(default)]
    pub rate: u64,

    #[serde(default)]
    pub supply: TokenAmount,

    #[serde(default)]
    pub min_cap: TokenAmount,

    #[serde(default)]
    pub updatable: bool,

    #[serde(default)]
    pub whitelist_enabled: bool,
}

fn default_name_prefix() -> String {
    "Tier".to_string()
}

fn default_start_delay_ms() -> Timestamp {
    5 * MS_PER_MINUTE
}

fn default_duration_ms() -> Timestamp {
    4 * MS_PER_DAY
}

impl Default for TierDefaults {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            start_delay_ms: default_start_delay_ms(),
            duration_ms: default_duration_ms(),
            rate: 0,
            supply: 0,
            min_cap: 0,
            updatable: false,
            whitelist_enabled: false,
        }
    }
}

/// Whitelist submission settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhitelistConfig {
    /// Maximum entries per admission transaction
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    50
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

/// Wizard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub tier_defaults: TierDefaults,

    #[serde(default)]
    pub whitelist: WhitelistConfig,

    /// Buffered change notifications per subscriber
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_event_capacity() -> usize {
    64
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            tier_defaults: TierDefaults::default(),
            whitelist: WhitelistConfig::default(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl WizardConfig {
    /// Parse a JSON config, rejecting settings the engine cannot run with
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: WizardConfig = serde_json::from_str(json)?;
        if config.whitelist.batch_size == 0 {
            return Err(crate::Error::Config(
                "whitelist.batch_size must be at least 1".to_string(),
            ));
        }
        if config.event_capacity == 0 {
            return Err(crate::Error::Config(
                "event_capacity must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WizardConfig::default();
        assert_eq!(config.tier_defaults.name_prefix, "Tier");
        assert_eq!(config.tier_defaults.start_delay_ms, 300_000);
        assert_eq!(config.tier_defaults.duration_ms, 345_600_000);
        assert!(!config.tier_defaults.whitelist_enabled);
        assert_eq!(config.whitelist.batch_size, 50);
        assert_eq!(config.event_capacity, 64);
    }

    #[test]
    fn test_config_serialization() {
        let config = WizardConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: WizardConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tier_defaults.name_prefix, config.tier_defaults.name_prefix);
        assert_eq!(parsed.whitelist.batch_size, config.whitelist.batch_size);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config =
            WizardConfig::from_json(r#"{"tier_defaults": {"whitelist_enabled": true}}"#).unwrap();
        assert!(config.tier_defaults.whitelist_enabled);
        assert_eq!(config.tier_defaults.name_prefix, "Tier");
        assert_eq!(config.whitelist.batch_size, 50);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let err = WizardConfig::from_json(r#"{"whitelist": {"batch_size": 0}}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_malformed_config_is_serialization_error() {
        let err = WizardConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }
}
