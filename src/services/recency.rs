use crate::error::AppResult;
use crate::store::{read_list, write_list, KvStore, StoreKey};

/// How many recently-sent ids the ledger retains
pub const RECENT_LIMIT: usize = 30;

/// Merges freshly-sent ids ahead of the previous ledger, deduplicated,
/// capped at [`RECENT_LIMIT`]
pub fn merge_recent(sent: &[String], previous: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(RECENT_LIMIT);
    for id in sent.iter().chain(previous.iter()) {
        if !merged.contains(id) {
            merged.push(id.clone());
        }
    }
    merged.truncate(RECENT_LIMIT);
    merged
}

/// Reads the ledger; an absent key yields an empty list
pub async fn load_recent(store: &dyn KvStore) -> AppResult<Vec<String>> {
    read_list(store, StoreKey::RecentRecommendations).await
}

/// Writes the merged ledger back to the store
pub async fn record_recent(
    store: &dyn KvStore,
    sent: &[String],
    previous: &[String],
) -> AppResult<()> {
    let merged = merge_recent(sent, previous);
    write_list(store, StoreKey::RecentRecommendations, &merged).await
}
