//! Tier State Types
//!
//! Data structures for tiers, whitelist entries, and mutation outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use tierwise_core::{Address, Timestamp, TokenAmount};

use crate::whitelist::Whitelist;

/// One phase of the sale
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tier {
    /// Display name (e.g. "Tier 1")
    #[serde(default)]
    pub name: String,
    /// Tokens per unit of contributed currency
    #[serde(default)]
    pub rate: u64,
    /// Tokens sold in this tier
    #[serde(default)]
    pub supply: TokenAmount,
    /// Minimum contribution when the whitelist is disabled
    #[serde(default)]
    pub min_cap: TokenAmount,
    /// Inclusive start of the sale window
    #[serde(default)]
    pub start_time: Timestamp,
    /// Exclusive end of the sale window
    #[serde(default)]
    pub end_time: Timestamp,
    /// Whether the tier duration may still be changed after deployment
    #[serde(default)]
    pub updatable: bool,
    #[serde(default)]
    pub whitelist_enabled: bool,
    #[serde(default)]
    pub whitelist: Whitelist,
}

impl Tier {
    pub fn new(name: impl Into<String>, supply: TokenAmount) -> Self {
        Self {
            name: name.into(),
            supply,
            ..Default::default()
        }
    }

    /// Builder-style toggle for the whitelist flag
    pub fn with_whitelist_enabled(mut self, enabled: bool) -> Self {
        self.whitelist_enabled = enabled;
        self
    }

    pub fn with_window(mut self, start_time: Timestamp, end_time: Timestamp) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | supply: {} | whitelist: {} entries",
            self.name,
            self.supply,
            self.whitelist.len()
        )
    }
}

/// An address admitted to contribute in one tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistEntry {
    pub addr: Address,
    pub min: TokenAmount,
    pub max: TokenAmount,
    /// Already committed on-chain
    #[serde(default)]
    pub stored: bool,
    /// Address currently collides with another entry of the same tier
    #[serde(default)]
    pub duplicated: bool,
}

impl WhitelistEntry {
    /// A pending entry
    pub fn new(addr: impl Into<Address>, min: TokenAmount, max: TokenAmount) -> Self {
        Self {
            addr: addr.into(),
            min,
            max,
            stored: false,
            duplicated: false,
        }
    }

    /// An entry already committed on-chain
    pub fn stored(addr: impl Into<Address>, min: TokenAmount, max: TokenAmount) -> Self {
        Self {
            stored: true,
            ..Self::new(addr, min, max)
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.stored
    }
}

/// A settable tier field with its new value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierProperty {
    Name(String),
    Rate(u64),
    Supply(TokenAmount),
    MinCap(TokenAmount),
    StartTime(Timestamp),
    EndTime(Timestamp),
    Updatable(bool),
    WhitelistEnabled(bool),
    Whitelist(Whitelist),
}

impl TierProperty {
    /// Field name, as reported in change events
    pub fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Rate(_) => "rate",
            Self::Supply(_) => "supply",
            Self::MinCap(_) => "minCap",
            Self::StartTime(_) => "startTime",
            Self::EndTime(_) => "endTime",
            Self::Updatable(_) => "updatable",
            Self::WhitelistEnabled(_) => "whitelistEnabled",
            Self::Whitelist(_) => "whitelist",
        }
    }

    /// Replace the matching field on `tier`
    pub(crate) fn apply(self, tier: &mut Tier) {
        match self {
            Self::Name(v) => tier.name = v,
            Self::Rate(v) => tier.rate = v,
            Self::Supply(v) => tier.supply = v,
            Self::MinCap(v) => tier.min_cap = v,
            Self::StartTime(v) => tier.start_time = v,
            Self::EndTime(v) => tier.end_time = v,
            Self::Updatable(v) => tier.updatable = v,
            Self::WhitelistEnabled(v) => tier.whitelist_enabled = v,
            Self::Whitelist(v) => tier.whitelist = v,
        }
    }
}

/// Why a whitelist insertion left the list unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// The address matches an entry that is itself still pending
    PendingAddress,
    /// The stored address already has its one pending duplicate
    DuplicateAlreadyStaged,
    /// The tier does not use a whitelist
    WhitelistDisabled,
}

/// Result of `add_whitelist_item`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    /// New address appended
    Inserted,
    /// Appended as the pending duplicate of a stored entry; both are flagged
    InsertedDuplicate,
    Rejected(Rejection),
}

impl AddOutcome {
    pub fn is_inserted(&self) -> bool {
        !matches!(self, Self::Rejected(_))
    }
}

/// Pending whitelist entries laid out for one admission transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistBatch {
    pub tier_index: usize,
    pub addrs: Vec<Address>,
    pub mins: Vec<TokenAmount>,
    pub maxs: Vec<TokenAmount>,
}

impl WhitelistBatch {
    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }
}

/// Counts from a bulk whitelist import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub inserted: usize,
    pub duplicated: usize,
    pub rejected: usize,
    pub invalid: usize,
}

/// Which tier fields the manage screen may still edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPermissions {
    pub can_edit_duration: bool,
    pub can_edit_whitelist: bool,
    pub can_edit_min_cap: bool,
}
