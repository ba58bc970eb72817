//! Whitelist Engine
//!
//! One tier's ordered whitelist and the rules that keep it consistent:
//! case-insensitive address identity, the stored/pending distinction, and
//! the single pending-duplicate slot per stored address.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::state::{AddOutcome, Rejection, WhitelistEntry};

/// Ordered whitelist of one tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Whitelist(Vec<WhitelistEntry>);

impl Whitelist {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn entries(&self) -> &[WhitelistEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&WhitelistEntry> {
        self.0.get(index)
    }

    /// Direct access for callers recording on-chain state
    pub fn get_mut(&mut self, index: usize) -> Option<&mut WhitelistEntry> {
        self.0.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WhitelistEntry> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, WhitelistEntry> {
        self.0.iter_mut()
    }

    /// Sort ascending by address, ignoring case.
    ///
    /// Stable: entries sharing an address keep their relative order.
    pub fn sort(&mut self) {
        self.0.sort_by(|a, b| a.addr.cmp_ignore_case(&b.addr));
    }

    /// Try to append `item`.
    ///
    /// A new address is appended as pending. An address that matches a
    /// stored entry is appended as its pending duplicate, flagging both,
    /// unless that address already carries a duplicate. An address that
    /// matches a pending entry is never appended.
    pub fn add(&mut self, item: WhitelistEntry) -> AddOutcome {
        let item = WhitelistEntry::new(item.addr, item.min, item.max);

        let found = self
            .0
            .iter()
            .position(|e| e.addr.same_as(item.addr.as_str()));
        let Some(existing) = found else {
            self.0.push(item);
            return AddOutcome::Inserted;
        };

        if !self.0[existing].stored {
            return AddOutcome::Rejected(Rejection::PendingAddress);
        }

        let already_staged = self
            .0
            .iter()
            .any(|e| e.duplicated && e.addr.same_as(item.addr.as_str()));
        if already_staged {
            return AddOutcome::Rejected(Rejection::DuplicateAlreadyStaged);
        }

        self.0[existing].duplicated = true;
        self.0.push(WhitelistEntry {
            duplicated: true,
            ..item
        });
        AddOutcome::InsertedDuplicate
    }

    /// Remove the entry at `index`.
    ///
    /// Removing one side of a duplicate pair clears the flag on the entry
    /// left behind.
    pub fn remove(&mut self, index: usize) -> Option<WhitelistEntry> {
        if index >= self.0.len() {
            return None;
        }
        let removed = self.0.remove(index);
        if removed.duplicated {
            for entry in self
                .0
                .iter_mut()
                .filter(|e| e.addr.same_as(removed.addr.as_str()))
            {
                entry.duplicated = false;
            }
        }
        Some(removed)
    }

    /// True when at least one entry still needs to be submitted
    pub fn has_pending(&self) -> bool {
        self.0.iter().any(WhitelistEntry::is_pending)
    }

    pub fn has_stored(&self) -> bool {
        self.0.iter().any(|e| e.stored)
    }

    /// Pending entries layered on top of a stored baseline
    pub fn is_modified_stored(&self) -> bool {
        self.has_stored() && self.has_pending()
    }

    /// Drop every pending entry, keeping stored ones in place.
    ///
    /// Returns the number of entries removed.
    pub fn discard_pending(&mut self) -> usize {
        let before = self.0.len();
        self.0.retain(|e| e.stored);
        // with the pending side gone no stored entry collides anymore
        for entry in self.0.iter_mut() {
            entry.duplicated = false;
        }
        before - self.0.len()
    }

    /// Case-insensitive membership, regardless of entry flags
    pub fn contains(&self, address: &str) -> bool {
        self.0.iter().any(|e| e.addr.same_as(address))
    }

    pub fn pending(&self) -> impl Iterator<Item = &WhitelistEntry> {
        self.0.iter().filter(|e| e.is_pending())
    }

    /// Sum of `max` over every entry
    pub fn max_cap_sum(&self) -> BigUint {
        self.0.iter().map(|e| BigUint::from(e.max)).sum()
    }

    /// Record that every pending entry is now on-chain.
    ///
    /// A pending duplicate replaces the stored entry it shadowed. Returns
    /// the number of entries newly marked stored.
    pub fn mark_stored(&mut self) -> usize {
        let superseded: Vec<String> = self
            .0
            .iter()
            .filter(|e| e.is_pending() && e.duplicated)
            .map(|e| e.addr.normalized())
            .collect();

        self.0.retain(|e| {
            !(e.stored && e.duplicated && superseded.contains(&e.addr.normalized()))
        });

        let mut marked = 0;
        for entry in self.0.iter_mut() {
            if entry.is_pending() {
                entry.stored = true;
                marked += 1;
            }
            entry.duplicated = false;
        }
        marked
    }
}

impl From<Vec<WhitelistEntry>> for Whitelist {
    fn from(entries: Vec<WhitelistEntry>) -> Self {
        Self(entries)
    }
}

impl FromIterator<WhitelistEntry> for Whitelist {
    fn from_iter<I: IntoIterator<Item = WhitelistEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Whitelist {
    type Item = WhitelistEntry;
    type IntoIter = std::vec::IntoIter<WhitelistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Whitelist {
    type Item = &'a WhitelistEntry;
    type IntoIter = std::slice::Iter<'a, WhitelistEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_pair() -> Whitelist {
        Whitelist::from(vec![
            WhitelistEntry::stored("0x22d491bde2303f2f43325b2108d26f1eaba1e32b", 1, 10),
            WhitelistEntry::stored("0xffcf8fdee72ac11b5c542428b35eef5769c409f0", 2, 20),
        ])
    }

    #[test]
    fn test_add_new_address_is_pending() {
        let mut list = Whitelist::new();
        let outcome = list.add(WhitelistEntry::stored("0xabc", 1, 2));

        // flags on the incoming item are ignored
        assert_eq!(outcome, AddOutcome::Inserted);
        assert!(list.entries()[0].is_pending());
        assert!(!list.entries()[0].duplicated);
    }

    #[test]
    fn test_duplicate_of_pending_rejected_every_time() {
        let mut list = Whitelist::new();
        list.add(WhitelistEntry::new("0xabc", 1, 2));

        for _ in 0..3 {
            assert_eq!(
                list.add(WhitelistEntry::new("0xABC", 5, 6)),
                AddOutcome::Rejected(Rejection::PendingAddress)
            );
        }
        assert_eq!(list.len(), 1);
        assert!(!list.entries()[0].duplicated);
    }

    #[test]
    fn test_duplicate_of_stored_accepted_once() {
        let mut list = stored_pair();

        let first = list.add(WhitelistEntry::new(
            "0xFFCF8FDEE72AC11B5C542428B35EEF5769C409F0",
            7,
            70,
        ));
        assert_eq!(first, AddOutcome::InsertedDuplicate);
        assert_eq!(list.len(), 3);
        assert!(list.entries()[1].duplicated);
        assert!(list.entries()[2].duplicated);

        let second = list.add(WhitelistEntry::new(
            "0xffcf8fdee72ac11b5c542428b35eef5769c409f0",
            8,
            80,
        ));
        assert_eq!(
            second,
            AddOutcome::Rejected(Rejection::DuplicateAlreadyStaged)
        );
        assert_eq!(list.len(), 3);
        assert_eq!(list.entries()[2].min, 7);
    }

    #[test]
    fn test_remove_clears_sibling_flag() {
        let mut list = stored_pair();
        list.add(WhitelistEntry::new(
            "0x22d491bde2303f2f43325b2108d26f1eaba1e32b",
            3,
            30,
        ));

        let removed = list.remove(2).unwrap();
        assert!(removed.duplicated);
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|e| !e.duplicated));

        // slot is free again
        assert_eq!(
            list.add(WhitelistEntry::new(
                "0x22d491bde2303f2f43325b2108d26f1eaba1e32b",
                4,
                40
            )),
            AddOutcome::InsertedDuplicate
        );
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut list = stored_pair();
        assert!(list.remove(2).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_sort_is_case_insensitive_and_stable() {
        let mut list = Whitelist::from(vec![
            WhitelistEntry::new("0xBB", 1, 1),
            WhitelistEntry::stored("0xaa", 2, 2),
            WhitelistEntry::new("0xAA", 3, 3),
            WhitelistEntry::new("0xab", 4, 4),
        ]);
        list.sort();

        let mins: Vec<_> = list.iter().map(|e| e.min).collect();
        assert_eq!(mins, vec![2, 3, 4, 1]);

        let once = list.clone();
        list.sort();
        assert_eq!(list, once);
    }

    #[test]
    fn test_discard_pending_keeps_stored_in_order() {
        let mut list = Whitelist::from(vec![
            WhitelistEntry::stored("0x03", 3, 30),
            WhitelistEntry::new("0x02", 2, 20),
            WhitelistEntry::stored("0x01", 1, 10),
        ]);
        assert_eq!(list.discard_pending(), 1);
        assert_eq!(
            list.entries(),
            &[
                WhitelistEntry::stored("0x03", 3, 30),
                WhitelistEntry::stored("0x01", 1, 10),
            ]
        );
    }

    #[test]
    fn test_discard_pending_resolves_duplicate() {
        let mut list = stored_pair();
        list.add(WhitelistEntry::new(
            "0x22d491bde2303f2f43325b2108d26f1eaba1e32b",
            3,
            30,
        ));
        assert_eq!(list.discard_pending(), 1);
        assert_eq!(list, stored_pair());
    }

    #[test]
    fn test_contains_ignores_flags_and_case() {
        let mut list = stored_pair();
        list.add(WhitelistEntry::new("0xabc", 1, 1));
        assert!(list.contains("0x22D491BDE2303F2F43325B2108D26F1EABA1E32B"));
        assert!(list.contains("0xABC"));
        assert!(!list.contains("0x1293871293872148623495781263489713264782"));
    }

    #[test]
    fn test_modified_stored() {
        let mut list = stored_pair();
        assert!(!list.is_modified_stored());
        list.add(WhitelistEntry::new("0xabc", 1, 1));
        assert!(list.is_modified_stored());

        let pending_only = Whitelist::from(vec![WhitelistEntry::new("0xabc", 1, 1)]);
        assert!(!pending_only.is_modified_stored());
    }

    #[test]
    fn test_mark_stored_replaces_shadowed_entry() {
        let mut list = stored_pair();
        list.add(WhitelistEntry::new(
            "0xffcf8fdee72ac11b5c542428b35eef5769c409f0",
            9,
            90,
        ));
        list.add(WhitelistEntry::new("0xabc", 1, 1));

        assert_eq!(list.mark_stored(), 2);
        assert_eq!(list.len(), 3);
        assert!(list.iter().all(|e| e.stored && !e.duplicated));

        let revised: Vec<_> = list
            .iter()
            .filter(|e| e.addr.same_as("0xffcf8fdee72ac11b5c542428b35eef5769c409f0"))
            .collect();
        assert_eq!(revised.len(), 1);
        assert_eq!(revised[0].max, 90);
    }

    #[test]
    fn test_max_cap_sum() {
        let list = stored_pair();
        assert_eq!(list.max_cap_sum(), BigUint::from(30u32));
        assert_eq!(Whitelist::new().max_cap_sum(), BigUint::from(0u32));
    }
}
