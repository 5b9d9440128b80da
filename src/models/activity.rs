use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One catalog entry representing a date-idea venue or event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique stable identifier
    pub id: String,
    /// Optional external link (empty string if none)
    #[serde(default)]
    pub url: String,
    pub ai: ActivityDetails,
}

/// Curated attributes of an activity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityDetails {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub time: TimeInfo,
    #[serde(default)]
    pub cost: CostInfo,
    #[serde(default)]
    pub weather: WeatherTraits,
    /// Absent for entries that predate seasonal curation
    #[serde(default)]
    pub seasonal: Option<Seasonal>,
}

/// Fixed category vocabulary
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Outdoor,
    Cultural,
    Active,
    Romantic,
    Creative,
    Nightlife,
    Seasonal,
    Entertainment,
    Educational,
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Food => "food",
            Category::Outdoor => "outdoor",
            Category::Cultural => "cultural",
            Category::Active => "active",
            Category::Romantic => "romantic",
            Category::Creative => "creative",
            Category::Nightlife => "nightlife",
            Category::Seasonal => "seasonal",
            Category::Entertainment => "entertainment",
            Category::Educational => "educational",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub is_local: bool,
    #[serde(default)]
    pub drive_time: DriveTime,
}

/// How far the venue is from home base
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DriveTime {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "day-trip")]
    DayTrip,
    #[serde(rename = "weekend-trip")]
    WeekendTrip,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeInfo {
    #[serde(default)]
    pub duration: Duration,
    #[serde(default)]
    pub time_of_day: Vec<String>,
    #[serde(default)]
    pub best_time: String,
}

/// How long the activity takes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Duration {
    #[serde(rename = "quick")]
    Quick,
    #[serde(rename = "1-2 hours")]
    OneToTwoHours,
    #[serde(rename = "half-day")]
    HalfDay,
    #[serde(rename = "full-day")]
    FullDay,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CostInfo {
    #[serde(default)]
    pub level: CostLevel,
}

/// Cost bracket
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CostLevel {
    #[serde(rename = "free")]
    Free,
    #[serde(rename = "$")]
    Budget,
    #[serde(rename = "$$")]
    Moderate,
    #[serde(rename = "$$$")]
    Splurge,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl Display for CostLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CostLevel::Free => "free",
            CostLevel::Budget => "$",
            CostLevel::Moderate => "$$",
            CostLevel::Splurge => "$$$",
            CostLevel::Unspecified => "",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherTraits {
    #[serde(default)]
    pub indoor: bool,
    #[serde(default)]
    pub outdoor: bool,
    #[serde(default)]
    pub weather_dependent: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Seasonal {
    #[serde(default)]
    pub is_event: bool,
    #[serde(default)]
    pub event_notes: Option<String>,
    #[serde(default)]
    pub best_seasons: Vec<Season>,
    #[serde(default)]
    pub year_round: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    /// Maps a calendar month (1-12) to its season
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            9..=11 => Season::Fall,
            _ => Season::Winter,
        }
    }
}

impl Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        write!(f, "{}", name)
    }
}
