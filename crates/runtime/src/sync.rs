//! Startup import of the bundled word list.

use drill_content::{WordList, plan_sync};
use tracing::{info, warn};

use crate::repository::{Result, WordStore};

/// What a sync run changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub previous_version: Option<u32>,
    pub version: u32,
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        self.inserted == 0 && self.updated == 0 && self.deleted == 0
    }
}

/// Brings `store` in line with `list`.
///
/// An empty store gets every entry. A populated store is reconciled only when
/// the list version differs from the recorded one (an unrecorded version
/// counts as 0); words are matched by key so statistics and flags survive.
pub async fn sync_word_list(store: &dyn WordStore, list: &WordList) -> Result<SyncReport> {
    for row in &list.skipped {
        warn!(
            line = row.line,
            fields = row.fields,
            "skipping malformed word-list row: {}",
            row.text
        );
    }

    let previous_version = store.word_list_version().await?;
    let mut report = SyncReport {
        previous_version,
        version: list.version,
        ..SyncReport::default()
    };

    if store.is_empty().await? {
        let plan = plan_sync(&[], &list.entries);
        report.inserted = store.insert_many(plan.insert).await?.len();
        store.set_word_list_version(list.version).await?;
        info!(
            inserted = report.inserted,
            version = list.version,
            "imported word list into empty store"
        );
        return Ok(report);
    }

    if previous_version.unwrap_or(0) == list.version {
        return Ok(report);
    }

    let existing = store.all_words().await?;
    let plan = plan_sync(&existing, &list.entries);

    if !plan.delete.is_empty() {
        report.deleted = store.delete_many(&plan.delete).await?;
    }
    if !plan.insert.is_empty() {
        report.inserted = store.insert_many(plan.insert).await?.len();
    }
    if !plan.update.is_empty() {
        report.updated = plan.update.len();
        store.update_many(plan.update).await?;
    }
    store.set_word_list_version(list.version).await?;

    info!(
        from = previous_version.unwrap_or(0),
        to = list.version,
        inserted = report.inserted,
        updated = report.updated,
        deleted = report.deleted,
        "synced word list"
    );

    Ok(report)
}
