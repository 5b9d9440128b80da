use std::fs;

use serde::Deserialize;

use crate::error::AppResult;
use crate::models::Activity;

use super::kv::{read_list, KvStore, StoreKey};

/// Wire shape of the static catalog document
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    posts: Vec<Activity>,
}

/// Curated activity catalog loaded once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    activities: Vec<Activity>,
}

impl Catalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    /// Loads the catalog document from disk
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read catalog {}: {}", path, e))?;
        let document: CatalogDocument = serde_json::from_str(&raw)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog {}: {}", path, e))?;
        Ok(Self::new(document.posts))
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Static entries followed by user-authored entries from the store
    pub async fn merged(&self, store: &dyn KvStore) -> AppResult<Vec<Activity>> {
        let custom: Vec<Activity> = read_list(store, StoreKey::CustomDates).await?;
        let mut all = self.activities.clone();
        all.extend(custom);
        Ok(all)
    }
}
