//! Tier store shared across tasks
//!
//! The duplicate rules are not safe under interleaved mutation, so every
//! write goes through one exclusive lock per registry.

use std::sync::Arc;

use num_bigint::BigInt;
use tierwise_core::{TierError, TokenAmount, WizardConfig};
use tokio::sync::{broadcast, RwLock};

use crate::events::TierEvent;
use crate::registry::TierStore;
use crate::state::{AddOutcome, Tier, TierProperty, WhitelistEntry};

/// Cloneable handle to one `TierStore`
#[derive(Clone, Default)]
pub struct SharedTierStore {
    inner: Arc<RwLock<TierStore>>,
}

impl SharedTierStore {
    pub fn new(store: TierStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Create with a specific config
    pub fn with_config(config: WizardConfig) -> Self {
        Self::new(TierStore::with_config(config))
    }

    /// Run `f` under the read lock
    pub async fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&TierStore) -> R,
    {
        let store = self.inner.read().await;
        f(&store)
    }

    /// Run `f` under the write lock; no other reader or writer interleaves
    pub async fn update<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut TierStore) -> R,
    {
        let mut store = self.inner.write().await;
        f(&mut store)
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<TierEvent> {
        self.inner.read().await.subscribe()
    }

    /// Copy of the current tiers
    pub async fn snapshot(&self) -> Vec<Tier> {
        self.inner.read().await.tiers().to_vec()
    }

    pub async fn add_tier(&self, tier: Tier) -> usize {
        self.inner.write().await.add_tier(tier)
    }

    pub async fn set_tier_property(
        &self,
        property: TierProperty,
        tier_index: usize,
    ) -> Result<(), TierError> {
        self.inner
            .write()
            .await
            .set_tier_property(property, tier_index)
    }

    pub async fn add_whitelist_item(
        &self,
        item: WhitelistEntry,
        tier_index: usize,
    ) -> Result<AddOutcome, TierError> {
        self.inner
            .write()
            .await
            .add_whitelist_item(item, tier_index)
    }

    pub async fn remove_whitelist_item(
        &self,
        item_index: usize,
        tier_index: usize,
    ) -> Result<WhitelistEntry, TierError> {
        self.inner
            .write()
            .await
            .remove_whitelist_item(item_index, tier_index)
    }

    pub async fn reset(&self) {
        self.inner.write().await.reset()
    }

    pub async fn max_supply(&self) -> TokenAmount {
        self.inner.read().await.max_supply()
    }

    pub async fn tiers_supply_remaining(&self) -> Vec<BigInt> {
        self.inner.read().await.tiers_supply_remaining()
    }

    pub async fn deployed_contract(&self) -> bool {
        self.inner.read().await.deployed_contract()
    }
}
