use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

/// Keys under which user state is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    CustomDates,
    Favorites,
    Completed,
    RecentRecommendations,
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreKey::CustomDates => write!(f, "customDates"),
            StoreKey::Favorites => write!(f, "favorites"),
            StoreKey::Completed => write!(f, "completed"),
            StoreKey::RecentRecommendations => write!(f, "recentRecommendations"),
        }
    }
}

/// Persistence port for user state
///
/// Each key holds one serialized JSON document. An absent key is
/// equivalent to an empty collection; writes are plain last-writer-wins
/// replacements with no transactional guarantee.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    async fn get_raw(&self, key: StoreKey) -> AppResult<Option<String>>;
    async fn put_raw(&self, key: StoreKey, value: String) -> AppResult<()>;
}

/// Reads a JSON list from the store; an absent key yields an empty list
pub async fn read_list<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: StoreKey,
) -> AppResult<Vec<T>> {
    match store.get_raw(key).await? {
        Some(json) => serde_json::from_str(&json).map_err(|e| {
            AppError::Internal(format!("Store deserialization error for {}: {}", key, e))
        }),
        None => Ok(Vec::new()),
    }
}

/// Serializes and writes a list to the store
pub async fn write_list<T: Serialize>(
    store: &dyn KvStore,
    key: StoreKey,
    items: &[T],
) -> AppResult<()> {
    let json = serde_json::to_string(items).map_err(|e| {
        AppError::Internal(format!("Store serialization error for {}: {}", key, e))
    })?;
    store.put_raw(key, json).await
}

/// In-memory store backing tests and local development
#[derive(Debug, Default, Clone)]
pub struct MemoryKvStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryKvStore {
    async fn get_raw(&self, key: StoreKey) -> AppResult<Option<String>> {
        Ok(self.entries.read().await.get(&key.to_string()).cloned())
    }

    async fn put_raw(&self, key: StoreKey, value: String) -> AppResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_display_custom_dates() {
        assert_eq!(format!("{}", StoreKey::CustomDates), "customDates");
    }

    #[test]
    fn test_store_key_display_favorites() {
        assert_eq!(format!("{}", StoreKey::Favorites), "favorites");
    }

    #[test]
    fn test_store_key_display_completed() {
        assert_eq!(format!("{}", StoreKey::Completed), "completed");
    }

    #[test]
    fn test_store_key_display_recent_recommendations() {
        assert_eq!(
            format!("{}", StoreKey::RecentRecommendations),
            "recentRecommendations"
        );
    }

    #[tokio::test]
    async fn test_read_list_absent_key_is_empty() {
        let store = MemoryKvStore::new();
        let ids: Vec<String> = read_list(&store, StoreKey::Favorites).await.unwrap();
        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read_list() {
        let store = MemoryKvStore::new();
        let ids = vec!["a".to_string(), "b".to_string()];
        write_list(&store, StoreKey::Favorites, &ids).await.unwrap();

        let read: Vec<String> = read_list(&store, StoreKey::Favorites).await.unwrap();
        assert_eq!(read, ids);

        // Stored as plain JSON
        let raw = store.get_raw(StoreKey::Favorites).await.unwrap().unwrap();
        assert_eq!(raw, r#"["a","b"]"#);
    }

    #[tokio::test]
    async fn test_read_list_corrupt_value_is_internal_error() {
        let store = MemoryKvStore::new();
        store
            .put_raw(StoreKey::Completed, "not json".to_string())
            .await
            .unwrap();

        let result: AppResult<Vec<String>> = read_list(&store, StoreKey::Completed).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = MemoryKvStore::new();
        write_list(&store, StoreKey::Favorites, &["a".to_string()])
            .await
            .unwrap();

        let completed: Vec<String> = read_list(&store, StoreKey::Completed).await.unwrap();
        assert!(completed.is_empty());
    }
}
