//! External service provider abstractions
//!
//! The recommendation pipeline talks to two upstreams through these traits:
//! a generative text service that turns a prompt into a reply, and a weather
//! service that reports current conditions. Both are injected as trait
//! objects so tests can swap in mocks.

use crate::error::AppResult;
use crate::models::WeatherSnapshot;

pub mod anthropic;
pub mod open_weather;

pub use anthropic::AnthropicProvider;
pub use open_weather::OpenWeatherProvider;

/// Trait for generative text providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Sends a prompt and returns the reply text verbatim
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Trait for current-weather providers
///
/// Weather is advisory: a failed lookup degrades to `None` rather than
/// failing the recommendation request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches current conditions, or `None` when the lookup fails
    async fn current(&self) -> Option<WeatherSnapshot>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
