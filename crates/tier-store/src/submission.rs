//! Whitelist Submission
//!
//! Lays out pending whitelist entries for the admission transaction and
//! records the result once the caller reports the submission succeeded.
//! No chain access happens here.

use tierwise_core::TierError;

use crate::events::TierEvent;
use crate::registry::TierStore;
use crate::state::{WhitelistBatch, WhitelistEntry};

/// Split sorted pending entries into batches of at most `batch_size`
fn build_batches<'a>(
    tier_index: usize,
    pending: impl Iterator<Item = &'a WhitelistEntry>,
    batch_size: usize,
) -> Vec<WhitelistBatch> {
    let pending: Vec<&WhitelistEntry> = pending.collect();
    pending
        .chunks(batch_size.max(1))
        .map(|chunk| WhitelistBatch {
            tier_index,
            addrs: chunk.iter().map(|e| e.addr.clone()).collect(),
            mins: chunk.iter().map(|e| e.min).collect(),
            maxs: chunk.iter().map(|e| e.max).collect(),
        })
        .collect()
}

impl TierStore {
    /// Sort the tier's whitelist and return its pending entries in
    /// submission batches. Empty when nothing is pending.
    pub fn whitelist_submission(
        &mut self,
        tier_index: usize,
    ) -> Result<Vec<WhitelistBatch>, TierError> {
        self.sort_whitelist(tier_index)?;

        let batch_size = self.config().whitelist.batch_size;
        let whitelist = &self.tier(tier_index)?.whitelist;
        let batches = build_batches(tier_index, whitelist.pending(), batch_size);

        tracing::debug!(
            tier = tier_index,
            batches = batches.len(),
            "Prepared whitelist submission"
        );
        Ok(batches)
    }

    /// Record that the tier's pending whitelist is now on-chain.
    ///
    /// Returns the number of entries newly marked stored.
    pub fn mark_whitelist_stored(&mut self, tier_index: usize) -> Result<usize, TierError> {
        let marked = self.tier_mut(tier_index)?.whitelist.mark_stored();
        tracing::info!(
            "Marked {} whitelist entries stored for tier {}",
            marked,
            tier_index
        );
        self.notify(TierEvent::WhitelistStored {
            tier: tier_index,
            marked,
        });
        Ok(marked)
    }
}
