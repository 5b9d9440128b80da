use std::sync::Arc;

use chrono::Local;

use crate::error::{AppError, AppResult};
use crate::models::{Activity, QueryContext, Recommendation};
use crate::services::providers::{GenerativeProvider, WeatherProvider};
use crate::services::{filter, interpret, prompt, recency};
use crate::store::{Catalog, KvStore};

/// Tunables for the recommendation pipeline
#[derive(Debug, Clone)]
pub struct RecommendOptions {
    /// Human-readable area name shown in the prompt context
    pub location_label: String,
    /// Rebuild an emptied candidate set from the full catalog
    pub relax_empty_results: bool,
}

/// What a recommendation request produced
#[derive(Debug, Clone)]
pub struct RecommendReply {
    pub outcome: RecommendOutcome,
    /// The candidates that were offered to the generative service, used
    /// to resolve recommended ids back to full activities
    pub candidates: Vec<Activity>,
}

#[derive(Debug, Clone)]
pub enum RecommendOutcome {
    /// The reply parsed as structured recommendations
    Structured(Recommendation),
    /// The reply was unusable as JSON; carries its text verbatim
    Fallback { text: String },
}

/// Orchestrates one recommendation request end to end: weather lookup,
/// catalog narrowing, recency bookkeeping, prompt, generative call, and
/// reply interpretation
pub struct RecommendationService {
    catalog: Arc<Catalog>,
    store: Arc<dyn KvStore>,
    generative: Arc<dyn GenerativeProvider>,
    weather: Arc<dyn WeatherProvider>,
    options: RecommendOptions,
}

impl RecommendationService {
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn KvStore>,
        generative: Arc<dyn GenerativeProvider>,
        weather: Arc<dyn WeatherProvider>,
        options: RecommendOptions,
    ) -> Self {
        Self {
            catalog,
            store,
            generative,
            weather,
            options,
        }
    }

    pub async fn recommend(&self, query: &str) -> AppResult<RecommendReply> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Query must not be empty".to_string(),
            ));
        }

        let weather = self.weather.current().await;
        let context = QueryContext::for_moment(Local::now().naive_local(), weather);
        let activities = self.catalog.merged(self.store.as_ref()).await?;
        let recent = recency::load_recent(self.store.as_ref()).await?;

        let selection = filter::filter_candidates(
            query,
            &activities,
            &context,
            &recent,
            self.options.relax_empty_results,
        );
        tracing::info!(
            total = activities.len(),
            filtered = selection.filtered_count,
            sending = selection.candidates.len(),
            fresh = selection.fresh_count.min(selection.candidates.len()),
            "Narrowed catalog for query"
        );
        if !selection.matched_categories.is_empty() {
            tracing::debug!(
                categories = ?selection.matched_categories,
                "Query matched categories"
            );
        }

        // Record the outgoing ids before the generative call so a failed
        // call still rotates future candidate sets
        let sent_ids: Vec<String> = selection.candidates.iter().map(|a| a.id.clone()).collect();
        recency::record_recent(self.store.as_ref(), &sent_ids, &recent).await?;

        let prompt = prompt::build_prompt(
            query,
            &selection.candidates,
            &context,
            &self.options.location_label,
        );
        let reply = self.generative.complete(&prompt).await?;

        let outcome = match interpret::interpret(&reply) {
            Ok(recommendation) => RecommendOutcome::Structured(recommendation),
            Err(e) => {
                tracing::warn!(
                    detail = %e.detail,
                    "Generative reply was not structured, falling back to its text"
                );
                RecommendOutcome::Fallback { text: e.raw }
            }
        };

        Ok(RecommendReply {
            outcome,
            candidates: selection.candidates,
        })
    }
}
