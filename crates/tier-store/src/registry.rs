//! Tier Registry
//!
//! Owns the ordered tier list. Tier indices are plain positions and are
//! never reordered by the registry itself.

use num_bigint::{BigInt, BigUint};
use tierwise_core::{TierError, TokenAmount, WizardConfig};
use tokio::sync::broadcast;

use crate::calculator;
use crate::events::TierEvent;
use crate::state::{AddOutcome, Rejection, Tier, TierProperty, WhitelistEntry};

/// Ordered tiers with their whitelists
#[derive(Debug)]
pub struct TierStore {
    tiers: Vec<Tier>,
    config: WizardConfig,
    events: broadcast::Sender<TierEvent>,
}

impl Default for TierStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TierStore {
    /// Create an empty registry with default config
    pub fn new() -> Self {
        Self::with_config(WizardConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: WizardConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            tiers: Vec::new(),
            config,
            events,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Receive one event per accepted mutation from now on
    pub fn subscribe(&self) -> broadcast::Receiver<TierEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: TierEvent) {
        tracing::debug!(?event, "Tier store changed");
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tier(&self, index: usize) -> Result<&Tier, TierError> {
        let len = self.tiers.len();
        self.tiers.get(index).ok_or_else(|| {
            tracing::warn!("Tier index {} out of range ({} tiers)", index, len);
            TierError::InvalidTierIndex { index, len }
        })
    }

    /// Mutable access to one tier.
    ///
    /// Changes made through this reference bypass the duplicate rules and
    /// are not announced to subscribers.
    pub fn tier_mut(&mut self, index: usize) -> Result<&mut Tier, TierError> {
        let len = self.tiers.len();
        self.tiers.get_mut(index).ok_or_else(|| {
            tracing::warn!("Tier index {} out of range ({} tiers)", index, len);
            TierError::InvalidTierIndex { index, len }
        })
    }

    /// Append a tier and return its index
    pub fn add_tier(&mut self, tier: Tier) -> usize {
        self.tiers.push(tier);
        let index = self.tiers.len() - 1;
        self.notify(TierEvent::TierAdded { index });
        index
    }

    /// Remove every tier, e.g. before rebuilding for another strategy
    pub fn empty_list(&mut self) {
        self.tiers.clear();
        self.notify(TierEvent::TiersCleared);
    }

    /// Back to a fresh registry, abandoning the session
    pub fn reset(&mut self) {
        tracing::info!("Resetting tier store ({} tiers)", self.tiers.len());
        self.tiers = Vec::new();
        self.notify(TierEvent::Reset);
    }

    /// Replace one field of the tier at `tier_index`
    pub fn set_tier_property(
        &mut self,
        property: TierProperty,
        tier_index: usize,
    ) -> Result<(), TierError> {
        let name = property.name();
        property.apply(self.tier_mut(tier_index)?);
        self.notify(TierEvent::PropertyChanged {
            index: tier_index,
            property: name,
        });
        Ok(())
    }

    // ─── Whitelist ──────────────────────────────────────────────────────────

    /// Sort the tier's whitelist ascending by address (case-insensitive)
    pub fn sort_whitelist(&mut self, tier_index: usize) -> Result<(), TierError> {
        self.tier_mut(tier_index)?.whitelist.sort();
        self.notify(TierEvent::WhitelistSorted { tier: tier_index });
        Ok(())
    }

    /// Try to add `item` to the tier's whitelist.
    ///
    /// Duplicate handling is reported through the outcome; the whitelist is
    /// untouched whenever the outcome is `Rejected`.
    pub fn add_whitelist_item(
        &mut self,
        item: WhitelistEntry,
        tier_index: usize,
    ) -> Result<AddOutcome, TierError> {
        let tier = self.tier_mut(tier_index)?;
        if !tier.whitelist_enabled {
            return Ok(AddOutcome::Rejected(Rejection::WhitelistDisabled));
        }

        let outcome = tier.whitelist.add(item);
        let len = tier.whitelist.len();
        match outcome {
            AddOutcome::Inserted | AddOutcome::InsertedDuplicate => {
                self.notify(TierEvent::WhitelistItemAdded {
                    tier: tier_index,
                    index: len - 1,
                    duplicate: outcome == AddOutcome::InsertedDuplicate,
                });
            }
            AddOutcome::Rejected(reason) => {
                tracing::debug!(?reason, tier = tier_index, "Whitelist item rejected");
            }
        }
        Ok(outcome)
    }

    /// Remove the entry at `item_index` from the tier's whitelist
    pub fn remove_whitelist_item(
        &mut self,
        item_index: usize,
        tier_index: usize,
    ) -> Result<WhitelistEntry, TierError> {
        let tier = self.tier_mut(tier_index)?;
        let len = tier.whitelist.len();
        let removed = tier.whitelist.remove(item_index).ok_or_else(|| {
            tracing::warn!(
                "Whitelist index {} out of range for tier {} ({} entries)",
                item_index,
                tier_index,
                len
            );
            TierError::InvalidWhitelistIndex {
                tier: tier_index,
                index: item_index,
                len,
            }
        })?;
        self.notify(TierEvent::WhitelistItemRemoved {
            tier: tier_index,
            index: item_index,
        });
        Ok(removed)
    }

    /// True when nothing in the tier's whitelist is waiting to be submitted
    pub fn is_whitelist_empty(&self, tier_index: usize) -> Result<bool, TierError> {
        Ok(!self.tier(tier_index)?.whitelist.has_pending())
    }

    /// Discard pending whitelist edits, keeping stored entries.
    ///
    /// Returns the number of entries removed.
    pub fn empty_whitelist(&mut self, tier_index: usize) -> Result<usize, TierError> {
        let removed = self.tier_mut(tier_index)?.whitelist.discard_pending();
        self.notify(TierEvent::WhitelistEmptied {
            tier: tier_index,
            removed,
        });
        Ok(removed)
    }

    pub fn whitelist_address_already_added(
        &self,
        tier_index: usize,
        address: &str,
    ) -> Result<bool, TierError> {
        Ok(self.tier(tier_index)?.whitelist.contains(address))
    }

    // ─── Aggregates ─────────────────────────────────────────────────────────

    pub fn max_supply(&self) -> TokenAmount {
        calculator::max_supply(&self.tiers)
    }

    pub fn whitelist_max_cap_sum(&self) -> Vec<BigUint> {
        calculator::whitelist_max_cap_sum(&self.tiers)
    }

    pub fn tiers_supply_remaining(&self) -> Vec<BigInt> {
        calculator::tiers_supply_remaining(&self.tiers)
    }

    pub fn modified_stored_whitelist(&self) -> bool {
        calculator::modified_stored_whitelist(&self.tiers)
    }

    pub fn modified_stored_whitelist_by_tier(&self) -> Vec<bool> {
        calculator::modified_stored_whitelist_by_tier(&self.tiers)
    }

    pub fn deployed_contract(&self) -> bool {
        calculator::deployed_contract(&self.tiers)
    }

    pub fn has_whitelist(&self) -> bool {
        calculator::has_whitelist(&self.tiers)
    }

    pub fn has_min_cap(&self) -> bool {
        calculator::has_min_cap(&self.tiers)
    }

    pub fn whitelisted_tier_count(&self) -> usize {
        calculator::whitelisted_tier_count(&self.tiers)
    }
}
