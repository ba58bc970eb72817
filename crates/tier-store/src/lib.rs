//! Tier and Whitelist Engine
//!
//! Owns the ordered list of sale tiers, each tier's address whitelist, and
//! the aggregate values derived from them. The engine never talks to a
//! chain: it hands out sorted submission batches and is told when they
//! landed.

pub mod calculator;
pub mod events;
pub mod import;
pub mod registry;
pub mod schedule;
pub mod shared;
pub mod state;
pub mod submission;
pub mod whitelist;

// Re-exports
pub use calculator::{
    deployed_contract, has_min_cap, has_whitelist, max_supply, modified_stored_whitelist,
    modified_stored_whitelist_by_tier, tiers_supply_remaining, whitelist_max_cap_sum,
    whitelisted_tier_count,
};
pub use events::TierEvent;
pub use registry::TierStore;
pub use schedule::tier_permissions;
pub use shared::SharedTierStore;
pub use state::{
    AddOutcome, ImportSummary, Rejection, Tier, TierPermissions, TierProperty, WhitelistBatch,
    WhitelistEntry,
};
pub use whitelist::Whitelist;
