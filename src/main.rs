use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use date_ideas_api::api::{create_router, AppState};
use date_ideas_api::config::Config;
use date_ideas_api::services::providers::{AnthropicProvider, OpenWeatherProvider};
use date_ideas_api::services::{RecommendOptions, RecommendationService};
use date_ideas_api::store::{create_redis_client, Catalog, RedisKvStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "date_ideas_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog = Catalog::load(&config.catalog_path)?;
    tracing::info!(
        activities = catalog.len(),
        path = %config.catalog_path,
        "Loaded activity catalog"
    );

    let redis_client = create_redis_client(&config.redis_url)?;
    let store = Arc::new(RedisKvStore::new(redis_client));

    let generative = Arc::new(AnthropicProvider::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
        config.anthropic_model.clone(),
    ));
    let weather = Arc::new(OpenWeatherProvider::new(
        config.weather_api_key.clone(),
        config.weather_api_url.clone(),
        config.weather_location.clone(),
    ));

    let catalog = Arc::new(catalog);
    let recommender = Arc::new(RecommendationService::new(
        catalog.clone(),
        store.clone(),
        generative,
        weather,
        RecommendOptions {
            location_label: config.location_label.clone(),
            relax_empty_results: config.relax_empty_results,
        },
    ));

    let state = AppState::new(catalog, store, recommender);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
