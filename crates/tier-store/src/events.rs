//! Change notifications
//!
//! Every accepted mutation of a `TierStore` publishes one `TierEvent` on a
//! tokio broadcast channel before the mutator returns. Rejected mutations
//! publish nothing.

use serde::Serialize;

/// What changed in the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierEvent {
    TierAdded { index: usize },
    TiersCleared,
    Reset,
    PropertyChanged { index: usize, property: &'static str },
    WhitelistSorted { tier: usize },
    WhitelistItemAdded { tier: usize, index: usize, duplicate: bool },
    WhitelistItemRemoved { tier: usize, index: usize },
    WhitelistEmptied { tier: usize, removed: usize },
    WhitelistStored { tier: usize, marked: usize },
}

impl TierEvent {
    /// Tier the event concerns, if it is about a single tier
    pub fn tier_index(&self) -> Option<usize> {
        match self {
            Self::TierAdded { index } | Self::PropertyChanged { index, .. } => Some(*index),
            Self::WhitelistSorted { tier }
            | Self::WhitelistItemAdded { tier, .. }
            | Self::WhitelistItemRemoved { tier, .. }
            | Self::WhitelistEmptied { tier, .. }
            | Self::WhitelistStored { tier, .. } => Some(*tier),
            Self::TiersCleared | Self::Reset => None,
        }
    }
}
