//! Reconciliation of stored words with a freshly parsed word list.
//!
//! Words are matched by [`WordEntry::key`] (prefix, root and reflexive flag).
//! Matched words keep their statistics and flags; only their display fields
//! are refreshed, and only when the translation or example text changed.

use std::collections::{HashMap, HashSet};

use drill_core::word::{Word, WordEntry, WordId};

/// Store mutations that bring the stored words in line with a word list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncPlan {
    pub delete: Vec<WordId>,
    pub insert: Vec<WordEntry>,
    pub update: Vec<Word>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.insert.is_empty() && self.update.is_empty()
    }
}

/// Computes the plan. Repeated keys in `incoming` are imported once (first
/// occurrence wins).
pub fn plan_sync(existing: &[Word], incoming: &[WordEntry]) -> SyncPlan {
    let mut fresh: HashMap<String, &WordEntry> = HashMap::with_capacity(incoming.len());
    let mut order: Vec<String> = Vec::with_capacity(incoming.len());
    for entry in incoming {
        let key = entry.key();
        if !fresh.contains_key(&key) {
            fresh.insert(key.clone(), entry);
            order.push(key);
        }
    }

    let stored: HashSet<String> = existing.iter().map(Word::key).collect();

    let mut plan = SyncPlan::default();

    for word in existing {
        match fresh.get(&word.key()) {
            None => plan.delete.push(word.id),
            Some(entry) if word.differs_from(entry) => {
                let mut updated = word.clone();
                updated.apply_entry(entry);
                plan.update.push(updated);
            }
            Some(_) => {}
        }
    }

    plan.insert = order
        .into_iter()
        .filter(|key| !stored.contains(key))
        .filter_map(|key| fresh.get(&key).map(|entry| (*entry).clone()))
        .collect();

    plan
}
