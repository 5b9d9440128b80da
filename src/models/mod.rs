pub mod activity;
pub mod context;
pub mod recommendation;

pub use activity::{
    Activity, ActivityDetails, Category, CostInfo, CostLevel, DriveTime, Duration, Location,
    Season, Seasonal, TimeInfo, WeatherTraits,
};
pub use context::{QueryContext, WeatherSnapshot};
pub use recommendation::{Recommendation, RecommendationEntry};
