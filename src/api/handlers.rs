use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Activity, ActivityDetails, Category, CostInfo, CostLevel, Location, Seasonal, TimeInfo,
    WeatherTraits,
};
use crate::services::{RecommendOutcome, RecommendReply};
use crate::store::{read_list, write_list, KvStore, StoreKey};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub cost_level: CostLevel,
    #[serde(default)]
    pub indoor: bool,
    #[serde(default)]
    pub outdoor: bool,
    #[serde(default)]
    pub is_seasonal_event: bool,
}

impl From<CreateActivityRequest> for Activity {
    fn from(request: CreateActivityRequest) -> Self {
        let seasonal = Seasonal {
            is_event: request.is_seasonal_event,
            event_notes: request
                .is_seasonal_event
                .then(|| "Custom seasonal event".to_string()),
            best_seasons: Vec::new(),
            year_round: !request.is_seasonal_event,
        };

        Activity {
            id: format!("custom-{}", Uuid::new_v4()),
            url: String::new(),
            ai: ActivityDetails {
                title: request.title.trim().to_string(),
                summary: request.summary.trim().to_string(),
                categories: request.categories,
                location: Location {
                    city: request.city,
                    state: request.state,
                    ..Location::default()
                },
                time: TimeInfo::default(),
                cost: CostInfo {
                    level: request.cost_level,
                },
                weather: WeatherTraits {
                    indoor: request.indoor,
                    outdoor: request.outdoor,
                    weather_dependent: false,
                },
                seasonal: Some(seasonal),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub favorites: Vec<String>,
    pub completed: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct CompletedResponse {
    pub completed: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
}

/// Either structured recommendations or the raw reply text when the
/// generative service ignored the JSON contract
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecommendResponse {
    Structured(StructuredRecommendations),
    Fallback(FallbackText),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredRecommendations {
    pub message: String,
    pub recommendations: Vec<RecommendedActivity>,
    pub candidate_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackText {
    pub error: bool,
    pub text: String,
    pub candidate_count: usize,
}

/// One recommended entry with its catalog record attached
///
/// `activity` is null when the recommended id matches none of the
/// candidates that were offered.
#[derive(Debug, Serialize)]
pub struct RecommendedActivity {
    pub id: String,
    pub reason: String,
    pub activity: Option<Activity>,
}

impl From<RecommendReply> for RecommendResponse {
    fn from(reply: RecommendReply) -> Self {
        let RecommendReply {
            outcome,
            candidates,
        } = reply;
        let candidate_count = candidates.len();

        match outcome {
            RecommendOutcome::Structured(recommendation) => {
                let recommendations = recommendation
                    .recommendations
                    .into_iter()
                    .map(|entry| {
                        let activity = candidates.iter().find(|a| a.id == entry.id).cloned();
                        RecommendedActivity {
                            id: entry.id,
                            reason: entry.reason,
                            activity,
                        }
                    })
                    .collect();
                RecommendResponse::Structured(StructuredRecommendations {
                    message: recommendation.message,
                    recommendations,
                    candidate_count,
                })
            }
            RecommendOutcome::Fallback { text } => RecommendResponse::Fallback(FallbackText {
                error: true,
                text,
                candidate_count,
            }),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Get the full catalog, static entries plus custom ones
pub async fn get_activities(State(state): State<AppState>) -> AppResult<Json<Vec<Activity>>> {
    let activities = state.catalog.merged(state.store.as_ref()).await?;
    Ok(Json(activities))
}

/// Create a custom activity
pub async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> AppResult<(StatusCode, Json<Activity>)> {
    if request.title.trim().is_empty() || request.summary.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Title and summary are required".to_string(),
        ));
    }

    let activity = Activity::from(request);

    let mut custom: Vec<Activity> = read_list(state.store.as_ref(), StoreKey::CustomDates).await?;
    custom.push(activity.clone());
    write_list(state.store.as_ref(), StoreKey::CustomDates, &custom).await?;

    tracing::info!(activity_id = %activity.id, "Created custom activity");
    Ok((StatusCode::CREATED, Json(activity)))
}

/// Get favorite and completed markings
pub async fn get_preferences(
    State(state): State<AppState>,
) -> AppResult<Json<PreferencesResponse>> {
    let favorites = read_list(state.store.as_ref(), StoreKey::Favorites).await?;
    let completed = read_list(state.store.as_ref(), StoreKey::Completed).await?;
    Ok(Json(PreferencesResponse {
        favorites,
        completed,
    }))
}

/// Toggle an activity in the favorites list
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> AppResult<Json<FavoritesResponse>> {
    let favorites = toggle_id(state.store.as_ref(), StoreKey::Favorites, &request.id).await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// Toggle an activity in the completed list
pub async fn toggle_completed(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> AppResult<Json<CompletedResponse>> {
    let completed = toggle_id(state.store.as_ref(), StoreKey::Completed, &request.id).await?;
    Ok(Json(CompletedResponse { completed }))
}

/// Request recommendations for a free-text query
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendRequest>,
) -> AppResult<Json<RecommendResponse>> {
    let reply = state.recommender.recommend(&request.query).await?;
    Ok(Json(RecommendResponse::from(reply)))
}

/// Adds the id to the list if absent, removes it if present, and persists
/// the updated list
async fn toggle_id(store: &dyn KvStore, key: StoreKey, id: &str) -> AppResult<Vec<String>> {
    if id.trim().is_empty() {
        return Err(AppError::InvalidInput("Id must not be empty".to_string()));
    }

    let mut ids: Vec<String> = read_list(store, key).await?;
    match ids.iter().position(|existing| existing == id) {
        Some(index) => {
            ids.remove(index);
        }
        None => ids.push(id.to_string()),
    }
    write_list(store, key, &ids).await?;
    Ok(ids)
}
