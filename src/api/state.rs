use std::sync::Arc;

use crate::services::RecommendationService;
use crate::store::{Catalog, KvStore};

/// Shared application state
///
/// Everything is behind an `Arc` so the state clones cheaply per request.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<dyn KvStore>,
    pub recommender: Arc<RecommendationService>,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KvStore>,
        recommender: Arc<RecommendationService>,
    ) -> Self {
        Self {
            catalog,
            store,
            recommender,
        }
    }
}
