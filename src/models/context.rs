use chrono::{Datelike, NaiveDateTime, Weekday};

use super::Season;

/// Current weather reading used to ground recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Rounded temperature in °F
    pub temp: i32,
    /// Provider condition group, e.g. "Rain", "Clear", "Clouds"
    pub condition: String,
    /// Provider free-text description, e.g. "light rain"
    pub description: String,
    pub is_raining: bool,
    pub is_cold: bool,
    pub is_nice: bool,
}

impl WeatherSnapshot {
    /// Derives display and comfort flags from a raw observation
    pub fn from_observation(temp: f64, condition: String, description: String) -> Self {
        let is_raining = condition == "Rain";
        let is_cold = temp < 45.0;
        let is_nice = temp > 60.0 && temp < 85.0 && condition == "Clear";
        Self {
            temp: temp.round() as i32,
            condition,
            description,
            is_raining,
            is_cold,
            is_nice,
        }
    }
}

/// Ambient signals computed once per recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
    /// Long-form date, e.g. "Saturday, June 14, 2025"
    pub date_label: String,
    /// Calendar month, 1-12
    pub month: u32,
    pub season: Season,
    pub is_weekend: bool,
    /// Clock time, e.g. "7:30 PM"
    pub time_label: String,
    /// Absent when the weather provider is unreachable
    pub weather: Option<WeatherSnapshot>,
}

impl QueryContext {
    /// Builds the context for a given moment
    pub fn for_moment(now: NaiveDateTime, weather: Option<WeatherSnapshot>) -> Self {
        let month = now.month();
        Self {
            date_label: now.format("%A, %B %-d, %Y").to_string(),
            month,
            season: Season::from_month(month),
            is_weekend: matches!(now.weekday(), Weekday::Sat | Weekday::Sun),
            time_label: now.format("%-I:%M %p").to_string(),
            weather,
        }
    }
}
