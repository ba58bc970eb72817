//! Tier Aggregates
//!
//! Pure derivations over the current tier list. Nothing is cached; every
//! value is recomputed from the tiers passed in.

use num_bigint::{BigInt, BigUint};
use tierwise_core::TokenAmount;

use crate::state::Tier;

/// Largest `supply` across tiers, 0 when there are none
pub fn max_supply(tiers: &[Tier]) -> TokenAmount {
    tiers.iter().map(|t| t.supply).max().unwrap_or(0)
}

/// Per tier, the sum of `max` over its whitelist
pub fn whitelist_max_cap_sum(tiers: &[Tier]) -> Vec<BigUint> {
    tiers.iter().map(|t| t.whitelist.max_cap_sum()).collect()
}

/// Per tier, `supply - whitelist max cap sum`.
///
/// Not clamped: an over-committed whitelist yields a negative value.
pub fn tiers_supply_remaining(tiers: &[Tier]) -> Vec<BigInt> {
    tiers
        .iter()
        .map(|t| BigInt::from(t.supply) - BigInt::from(t.whitelist.max_cap_sum()))
        .collect()
}

/// Per tier, whether pending entries sit on top of stored ones
pub fn modified_stored_whitelist_by_tier(tiers: &[Tier]) -> Vec<bool> {
    tiers
        .iter()
        .map(|t| t.whitelist.is_modified_stored())
        .collect()
}

/// Any tier has pending whitelist changes over a stored baseline
pub fn modified_stored_whitelist(tiers: &[Tier]) -> bool {
    tiers.iter().any(|t| t.whitelist.is_modified_stored())
}

/// Any whitelist entry in any tier is already on-chain
pub fn deployed_contract(tiers: &[Tier]) -> bool {
    tiers.iter().any(|t| t.whitelist.has_stored())
}

/// Any tier restricts contributions to its whitelist
pub fn has_whitelist(tiers: &[Tier]) -> bool {
    tiers.iter().any(|t| t.whitelist_enabled)
}

/// Any tier sets a non-zero minimum contribution
pub fn has_min_cap(tiers: &[Tier]) -> bool {
    tiers.iter().any(|t| t.min_cap != 0)
}

/// Tiers that will need a whitelist transaction at deployment
pub fn whitelisted_tier_count(tiers: &[Tier]) -> usize {
    tiers
        .iter()
        .filter(|t| t.whitelist_enabled && !t.whitelist.is_empty())
        .count()
}
