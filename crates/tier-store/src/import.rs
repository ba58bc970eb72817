//! Bulk whitelist import (e.g. from an uploaded CSV)

use tierwise_core::{AddressValidator, TierError};

use crate::registry::TierStore;
use crate::state::{AddOutcome, ImportSummary, WhitelistEntry};

impl TierStore {
    /// Add `items` one by one, skipping addresses `validator` refuses.
    ///
    /// Each accepted item goes through the same duplicate rules as
    /// `add_whitelist_item`.
    pub fn import_whitelist<V, I>(
        &mut self,
        tier_index: usize,
        items: I,
        validator: &V,
    ) -> Result<ImportSummary, TierError>
    where
        V: AddressValidator + ?Sized,
        I: IntoIterator<Item = WhitelistEntry>,
    {
        // fail before touching anything
        self.tier(tier_index)?;

        let mut summary = ImportSummary::default();
        for item in items {
            if !validator.is_valid(&item.addr) {
                tracing::debug!(addr = %item.addr, "Skipping invalid whitelist address");
                summary.invalid += 1;
                continue;
            }
            match self.add_whitelist_item(item, tier_index)? {
                AddOutcome::Inserted => summary.inserted += 1,
                AddOutcome::InsertedDuplicate => summary.duplicated += 1,
                AddOutcome::Rejected(_) => summary.rejected += 1,
            }
        }

        tracing::info!(
            tier = tier_index,
            inserted = summary.inserted,
            duplicated = summary.duplicated,
            rejected = summary.rejected,
            invalid = summary.invalid,
            "Whitelist import finished"
        );
        Ok(summary)
    }
}
