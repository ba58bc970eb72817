//! Tier Schedule
//!
//! Sale windows, what the manage screen may still edit, and seeding of
//! default tiers. "Now" is always supplied by the caller.

use tierwise_core::{TierDefaults, Timestamp};

use crate::registry::TierStore;
use crate::state::{Tier, TierPermissions};
use crate::whitelist::Whitelist;

impl Tier {
    pub fn has_started(&self, now: Timestamp) -> bool {
        now >= self.start_time
    }

    pub fn has_ended(&self, now: Timestamp) -> bool {
        now >= self.end_time
    }

    /// Active within `[start_time, end_time)`
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.has_started(now) && !self.has_ended(now)
    }
}

/// Fields of a deployed tier that may still be edited at `now`.
///
/// `can_edit_tiers` is the caller's own gate (e.g. the connected account
/// owns the sale).
pub fn tier_permissions(tier: &Tier, can_edit_tiers: bool, now: Timestamp) -> TierPermissions {
    let ended = tier.has_ended(now);
    let started = tier.has_started(now);

    TierPermissions {
        can_edit_duration: can_edit_tiers && tier.updatable && !ended && !started,
        can_edit_whitelist: can_edit_tiers && !ended,
        can_edit_min_cap: !tier.whitelist_enabled && can_edit_tiers && tier.updatable && !ended,
    }
}

/// Build the tier that would be appended after `previous`
fn seeded_tier(
    defaults: &TierDefaults,
    position: usize,
    previous: Option<&Tier>,
    now: Timestamp,
) -> Tier {
    let start_time = match previous {
        Some(tier) => tier.end_time,
        None => now.saturating_add(defaults.start_delay_ms),
    };

    Tier {
        name: format!("{} {}", defaults.name_prefix, position),
        rate: defaults.rate,
        supply: defaults.supply,
        min_cap: defaults.min_cap,
        start_time,
        end_time: start_time.saturating_add(defaults.duration_ms),
        updatable: defaults.updatable,
        whitelist_enabled: defaults.whitelist_enabled,
        whitelist: Whitelist::new(),
    }
}

impl TierStore {
    /// Append a tier built from the configured defaults.
    ///
    /// The first tier opens `start_delay_ms` after `now`; later tiers open
    /// when the previous one closes.
    pub fn add_default_tier(&mut self, now: Timestamp) -> usize {
        let tier = seeded_tier(
            &self.config().tier_defaults,
            self.len() + 1,
            self.tiers().last(),
            now,
        );
        tracing::debug!(
            name = %tier.name,
            start = tier.start_time,
            end = tier.end_time,
            "Seeding default tier"
        );
        self.add_tier(tier)
    }

    /// Edit permissions for every tier, in tier order
    pub fn tier_permissions(&self, can_edit_tiers: bool, now: Timestamp) -> Vec<TierPermissions> {
        self.tiers()
            .iter()
            .map(|t| tier_permissions(t, can_edit_tiers, now))
            .collect()
    }
}
