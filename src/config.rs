use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Redis connection URL
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Path to the static activity catalog document
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Anthropic API key
    pub anthropic_api_key: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_api_url")]
    pub anthropic_api_url: String,

    /// Model used for recommendation generation
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,

    /// OpenWeather API key
    pub weather_api_key: String,

    /// OpenWeather current-weather endpoint URL
    #[serde(default = "default_weather_api_url")]
    pub weather_api_url: String,

    /// Location query sent to the weather provider
    #[serde(default = "default_weather_location")]
    pub weather_location: String,

    /// Human-readable area label rendered into prompts
    #[serde(default = "default_location_label")]
    pub location_label: String,

    /// Rebuild an empty candidate set from the full catalog
    #[serde(default)]
    pub relax_empty_results: bool,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_catalog_path() -> String {
    "data/dates.json".to_string()
}

fn default_anthropic_api_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_weather_api_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_weather_location() -> String {
    "Princeton,NJ,US".to_string()
}

fn default_location_label() -> String {
    "Princeton, NJ area".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
