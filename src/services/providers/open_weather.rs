//! OpenWeatherMap current-conditions provider
//!
//! Queries the `/weather` endpoint for a fixed location in imperial units.
//! Lookups are best-effort: any failure is logged and reported as `None`
//! so recommendations proceed without weather context.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::WeatherSnapshot;
use crate::services::providers::WeatherProvider;

#[derive(Clone)]
pub struct OpenWeatherProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    location: String,
}

#[derive(Debug, Deserialize)]
struct WeatherDocument {
    main: MainReading,
    weather: Vec<ConditionReading>,
}

#[derive(Debug, Deserialize)]
struct MainReading {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionReading {
    main: String,
    description: String,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, api_url: String, location: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            location,
        }
    }

    async fn fetch(&self) -> AppResult<WeatherSnapshot> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("q", self.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Weather API returned status {}: {}",
                status, body
            )));
        }

        let document: WeatherDocument = response.json().await?;
        let condition = document
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalApi("Weather report had no conditions".to_string()))?;

        Ok(WeatherSnapshot::from_observation(
            document.main.temp,
            condition.main,
            condition.description,
        ))
    }
}

#[async_trait::async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self) -> Option<WeatherSnapshot> {
        match self.fetch().await {
            Ok(snapshot) => {
                tracing::debug!(
                    provider = self.name(),
                    temp = snapshot.temp,
                    condition = %snapshot.condition,
                    "Fetched current weather"
                );
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(
                    provider = self.name(),
                    error = %e,
                    "Weather lookup failed, continuing without it"
                );
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "open_weather"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenWeatherProvider {
        OpenWeatherProvider::new(
            "test-key".to_string(),
            format!("{}/data/2.5/weather", server.uri()),
            "Princeton,NJ,US".to_string(),
        )
    }

    #[tokio::test]
    async fn test_current_rounds_temp_and_derives_flags() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("q", "Princeton,NJ,US"))
            .and(query_param("appid", "test-key"))
            .and(query_param("units", "imperial"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": {"temp": 71.6, "humidity": 40},
                "weather": [{"main": "Clear", "description": "clear sky"}],
                "name": "Princeton"
            })))
            .mount(&server)
            .await;

        let snapshot = provider_for(&server).current().await.unwrap();
        assert_eq!(snapshot.temp, 72);
        assert_eq!(snapshot.condition, "Clear");
        assert_eq!(snapshot.description, "clear sky");
        assert!(snapshot.is_nice);
        assert!(!snapshot.is_raining);
        assert!(!snapshot.is_cold);
    }

    #[tokio::test]
    async fn test_current_returns_none_on_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        assert!(provider_for(&server).current().await.is_none());
    }

    #[tokio::test]
    async fn test_current_returns_none_on_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
            .mount(&server)
            .await;

        assert!(provider_for(&server).current().await.is_none());
    }

    #[tokio::test]
    async fn test_current_returns_none_on_empty_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "main": {"temp": 50.0},
                "weather": []
            })))
            .mount(&server)
            .await;

        assert!(provider_for(&server).current().await.is_none());
    }
}
