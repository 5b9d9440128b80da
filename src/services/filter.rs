use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Activity, Category, CostLevel, DriveTime, Duration, QueryContext, Season};

/// Maximum number of candidates forwarded to the generative service
pub const MAX_CANDIDATES: usize = 15;

/// Minimum size a category subset must reach before it replaces the
/// working set; narrower matches keep the full catalog
pub const MIN_CATEGORY_MATCHES: usize = 10;

/// Trigger phrases per category, matched as substrings of the query
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "food",
            "restaurant",
            "dinner",
            "lunch",
            "breakfast",
            "brunch",
            "eat",
            "cuisine",
            "meal",
            "dining",
        ],
    ),
    (
        Category::Outdoor,
        &[
            "outdoor", "outside", "hike", "park", "nature", "walk", "trail", "fresh air",
        ],
    ),
    (
        Category::Romantic,
        &[
            "romantic",
            "date night",
            "couple",
            "anniversary",
            "special",
            "intimate",
        ],
    ),
    (
        Category::Active,
        &[
            "active",
            "exercise",
            "sport",
            "physical",
            "workout",
            "adventure",
            "energetic",
        ],
    ),
    (
        Category::Creative,
        &[
            "creative", "art", "craft", "make", "create", "diy", "paint", "draw", "pottery",
        ],
    ),
    (
        Category::Cultural,
        &[
            "museum", "art", "cultural", "history", "exhibit", "gallery", "theater",
        ],
    ),
    (
        Category::Nightlife,
        &[
            "night",
            "bar",
            "drinks",
            "cocktail",
            "evening",
            "nightlife",
            "club",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "show",
            "movie",
            "theater",
            "performance",
            "concert",
            "entertainment",
            "comedy",
        ],
    ),
    (
        Category::Educational,
        &[
            "learn",
            "class",
            "workshop",
            "educational",
            "lesson",
            "tutorial",
        ],
    ),
];

const BAD_WEATHER_TERMS: &[&str] = &[
    "rain",
    "rainy",
    "cold",
    "snow",
    "bad weather",
    "indoor",
    "inside",
];
const GOOD_WEATHER_TERMS: &[&str] = &[
    "sunny",
    "nice weather",
    "beautiful day",
    "outdoor",
    "outside",
];
const CHEAP_TERMS: &[&str] = &["cheap", "free", "budget", "inexpensive"];
const EXPENSIVE_TERMS: &[&str] = &["expensive", "fancy", "splurge", "upscale"];
const LOCAL_TERMS: &[&str] = &["local", "nearby", "close"];
const DAY_TRIP_TERMS: &[&str] = &["day trip", "drive", "away"];
const QUICK_TERMS: &[&str] = &["quick", "short", "fast"];
const FULL_DAY_TERMS: &[&str] = &["all day", "full day", "long"];
const EXCLUDABLE_CITIES: &[&str] = &[
    "nyc",
    "new york",
    "philadelphia",
    "philly",
    "boston",
    "dc",
    "baltimore",
];
const EXCLUSION_PATTERNS: &[&str] = &["no", "not", "avoid", "skip", "except"];

/// Result of narrowing the catalog for one query
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// Final candidate set, at most [`MAX_CANDIDATES`] entries, fresh first
    pub candidates: Vec<Activity>,
    /// Categories inferred from the query
    pub matched_categories: Vec<Category>,
    /// Working-set size after all narrowing stages, before the cap
    pub filtered_count: usize,
    /// Size of the fresh partition before the cap
    pub fresh_count: usize,
}

/// Narrows the catalog to a bounded, non-repetitive candidate set
///
/// Stages run in a fixed order and each narrows the working set; there is
/// no rollback when a stage empties it. Only the category stage carries a
/// size threshold. With `relax_empty` set, an empty final set is rebuilt
/// from the full catalog with only the seasonal stage applied.
pub fn filter_candidates(
    query: &str,
    catalog: &[Activity],
    context: &QueryContext,
    recent_ids: &[String],
    relax_empty: bool,
) -> FilterOutcome {
    filter_candidates_with_rng(
        query,
        catalog,
        context,
        recent_ids,
        relax_empty,
        &mut rand::thread_rng(),
    )
}

/// Same as [`filter_candidates`] with a caller-supplied RNG, so shuffles
/// can be made deterministic
pub fn filter_candidates_with_rng<R: Rng + ?Sized>(
    query: &str,
    catalog: &[Activity],
    context: &QueryContext,
    recent_ids: &[String],
    relax_empty: bool,
    rng: &mut R,
) -> FilterOutcome {
    let query = query.to_lowercase();
    let mut working: Vec<Activity> = catalog.to_vec();

    // 1. Category intent
    let matched_categories = matched_categories(&query);
    if !matched_categories.is_empty() {
        let narrowed: Vec<Activity> = working
            .iter()
            .filter(|a| {
                a.ai.categories
                    .iter()
                    .any(|c| matched_categories.contains(c))
            })
            .cloned()
            .collect();
        if narrowed.len() >= MIN_CATEGORY_MATCHES {
            working = narrowed;
        }
    }

    // 2. Weather; a bad-weather term suppresses the good-weather branch
    let wants_shelter = contains_any(&query, BAD_WEATHER_TERMS);
    if wants_shelter {
        working.retain(|a| a.ai.weather.indoor || !a.ai.weather.weather_dependent);
    }
    if contains_any(&query, GOOD_WEATHER_TERMS) && !wants_shelter {
        working.retain(|a| a.ai.weather.outdoor);
    }

    // 3. Budget; both checks run, so an expensive term wins last
    if contains_any(&query, CHEAP_TERMS) {
        working.retain(|a| matches!(a.ai.cost.level, CostLevel::Free | CostLevel::Budget));
    }
    if contains_any(&query, EXPENSIVE_TERMS) {
        working.retain(|a| matches!(a.ai.cost.level, CostLevel::Moderate | CostLevel::Splurge));
    }

    // 4. Drive time
    if contains_any(&query, LOCAL_TERMS) {
        working.retain(|a| a.ai.location.drive_time == DriveTime::Local);
    }
    if contains_any(&query, DAY_TRIP_TERMS) {
        working.retain(|a| {
            matches!(
                a.ai.location.drive_time,
                DriveTime::DayTrip | DriveTime::Local
            )
        });
    }

    // 5. Negated cities
    let excluded = excluded_cities(&query);
    if !excluded.is_empty() {
        working.retain(|a| {
            let city = a.ai.location.city.to_lowercase();
            !excluded.iter().any(|ex| city.contains(ex))
        });
    }

    // 6. Duration
    if contains_any(&query, QUICK_TERMS) {
        working.retain(|a| {
            matches!(
                a.ai.time.duration,
                Duration::Quick | Duration::OneToTwoHours
            )
        });
    }
    if contains_any(&query, FULL_DAY_TERMS) {
        working.retain(|a| {
            matches!(a.ai.time.duration, Duration::FullDay | Duration::HalfDay)
        });
    }

    // 7. Off-season events
    working.retain(|a| in_season(a, context.season));

    if relax_empty && working.is_empty() {
        working = catalog
            .iter()
            .filter(|a| in_season(a, context.season))
            .cloned()
            .collect();
    }

    let filtered_count = working.len();

    // 8. Freshness-biased shuffle: unseen entries first, each partition
    // uniformly permuted
    let (mut fresh, mut recent): (Vec<Activity>, Vec<Activity>) = working
        .into_iter()
        .partition(|a| !recent_ids.contains(&a.id));
    let fresh_count = fresh.len();
    fresh.shuffle(rng);
    recent.shuffle(rng);

    let mut candidates = fresh;
    candidates.extend(recent);
    candidates.truncate(MAX_CANDIDATES);

    FilterOutcome {
        candidates,
        matched_categories,
        filtered_count,
        fresh_count,
    }
}

/// Categories whose trigger phrases appear in the lower-cased query
fn matched_categories(query: &str) -> Vec<Category> {
    CATEGORY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(query, keywords))
        .map(|(category, _)| *category)
        .collect()
}

fn contains_any(query: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| query.contains(term))
}

/// Cities negated in the query, e.g. "no nyc" or "avoid boston"
fn excluded_cities(query: &str) -> Vec<&'static str> {
    EXCLUDABLE_CITIES
        .iter()
        .copied()
        .filter(|city| {
            EXCLUSION_PATTERNS
                .iter()
                .any(|pattern| query.contains(&format!("{} {}", pattern, city)))
        })
        .collect()
}

/// Non-events and year-round events always pass; other events must list
/// the current season
fn in_season(activity: &Activity, season: Season) -> bool {
    match &activity.ai.seasonal {
        Some(s) if s.is_event => s.year_round || s.best_seasons.contains(&season),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityDetails, CostInfo, Location, Seasonal, TimeInfo, WeatherTraits};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn activity(id: &str) -> Activity {
        Activity {
            id: id.to_string(),
            url: String::new(),
            ai: ActivityDetails {
                title: format!("Activity {}", id),
                summary: String::new(),
                categories: Vec::new(),
                location: Location::default(),
                time: TimeInfo::default(),
                cost: CostInfo::default(),
                weather: WeatherTraits::default(),
                seasonal: None,
            },
        }
    }

    fn context(season: Season) -> QueryContext {
        QueryContext {
            date_label: "Saturday, June 14, 2025".to_string(),
            month: 6,
            season,
            is_weekend: true,
            time_label: "7:30 PM".to_string(),
            weather: None,
        }
    }

    fn ids(outcome: &FilterOutcome) -> Vec<&str> {
        outcome.candidates.iter().map(|a| a.id.as_str()).collect()
    }

    fn run(query: &str, catalog: &[Activity], recent: &[String]) -> FilterOutcome {
        let mut rng = StdRng::seed_from_u64(7);
        filter_candidates_with_rng(query, catalog, &context(Season::Summer), recent, false, &mut rng)
    }

    #[test]
    fn test_every_trigger_phrase_matches_its_category() {
        for (category, keywords) in CATEGORY_KEYWORDS {
            for keyword in *keywords {
                let matched = matched_categories(keyword);
                assert!(
                    matched.contains(category),
                    "{} should trigger {:?}",
                    keyword,
                    category
                );
            }
        }
    }

    #[test]
    fn test_overlapping_triggers_match_multiple_categories() {
        let matched = matched_categories("art");
        assert!(matched.contains(&Category::Creative));
        assert!(matched.contains(&Category::Cultural));
    }

    #[test]
    fn test_category_narrowing_applies_at_threshold() {
        let mut catalog = Vec::new();
        for i in 0..12 {
            let mut a = activity(&format!("food-{}", i));
            a.ai.categories = vec![Category::Food];
            catalog.push(a);
        }
        for i in 0..5 {
            let mut a = activity(&format!("outdoor-{}", i));
            a.ai.categories = vec![Category::Outdoor];
            catalog.push(a);
        }

        let outcome = run("somewhere for dinner", &catalog, &[]);
        assert_eq!(outcome.matched_categories, vec![Category::Food]);
        assert_eq!(outcome.filtered_count, 12);
        assert!(ids(&outcome).iter().all(|id| id.starts_with("food-")));
    }

    #[test]
    fn test_category_narrowing_skipped_below_threshold() {
        let mut catalog = Vec::new();
        for i in 0..5 {
            let mut a = activity(&format!("outdoor-{}", i));
            a.ai.categories = vec![Category::Outdoor];
            catalog.push(a);
        }
        for i in 0..4 {
            let mut a = activity(&format!("food-{}", i));
            a.ai.categories = vec![Category::Food];
            catalog.push(a);
        }

        // Only 5 outdoor entries, below the threshold: keep everything
        let outcome = run("hike somewhere", &catalog, &[]);
        assert_eq!(outcome.matched_categories, vec![Category::Outdoor]);
        assert_eq!(outcome.filtered_count, 9);
    }

    #[test]
    fn test_bad_weather_keeps_sheltered_activities() {
        let mut indoor = activity("indoor");
        indoor.ai.weather = WeatherTraits {
            indoor: true,
            outdoor: false,
            weather_dependent: false,
        };
        let mut hardy = activity("hardy");
        hardy.ai.weather = WeatherTraits {
            indoor: false,
            outdoor: true,
            weather_dependent: false,
        };
        let mut exposed = activity("exposed");
        exposed.ai.weather = WeatherTraits {
            indoor: false,
            outdoor: true,
            weather_dependent: true,
        };

        let outcome = run("rainy day ideas", &[indoor, hardy, exposed], &[]);
        for candidate in &outcome.candidates {
            assert!(candidate.ai.weather.indoor || !candidate.ai.weather.weather_dependent);
        }
        let result = ids(&outcome);
        assert!(result.contains(&"indoor"));
        assert!(result.contains(&"hardy"));
        assert!(!result.contains(&"exposed"));
    }

    #[test]
    fn test_good_weather_keeps_outdoor_activities() {
        let mut indoor = activity("indoor");
        indoor.ai.weather.indoor = true;
        let mut outdoor = activity("outdoor");
        outdoor.ai.weather.outdoor = true;

        let outcome = run("sunny afternoon", &[indoor, outdoor], &[]);
        assert_eq!(ids(&outcome), vec!["outdoor"]);
    }

    #[test]
    fn test_bad_weather_term_suppresses_good_weather_branch() {
        let mut indoor = activity("indoor");
        indoor.ai.weather = WeatherTraits {
            indoor: true,
            outdoor: false,
            weather_dependent: false,
        };
        let mut exposed = activity("exposed");
        exposed.ai.weather = WeatherTraits {
            indoor: false,
            outdoor: true,
            weather_dependent: true,
        };

        // "outside" is a good-weather term but "cold" takes precedence
        let outcome = run("outside but cold", &[indoor, exposed], &[]);
        assert_eq!(ids(&outcome), vec!["indoor"]);
    }

    #[test]
    fn test_cheap_keeps_free_and_budget() {
        let mut free = activity("free");
        free.ai.cost.level = CostLevel::Free;
        let mut budget = activity("budget");
        budget.ai.cost.level = CostLevel::Budget;
        let mut splurge = activity("splurge");
        splurge.ai.cost.level = CostLevel::Splurge;

        let outcome = run("budget options", &[free, budget, splurge], &[]);
        let result = ids(&outcome);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&"free"));
        assert!(result.contains(&"budget"));
    }

    #[test]
    fn test_expensive_keeps_upper_brackets() {
        let mut budget = activity("budget");
        budget.ai.cost.level = CostLevel::Budget;
        let mut moderate = activity("moderate");
        moderate.ai.cost.level = CostLevel::Moderate;
        let mut splurge = activity("splurge");
        splurge.ai.cost.level = CostLevel::Splurge;

        let outcome = run("somewhere fancy", &[budget, moderate, splurge], &[]);
        let result = ids(&outcome);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&"moderate"));
        assert!(result.contains(&"splurge"));
    }

    #[test]
    fn test_contradictory_budget_terms_apply_sequentially() {
        let mut free = activity("free");
        free.ai.cost.level = CostLevel::Free;
        let mut splurge = activity("splurge");
        splurge.ai.cost.level = CostLevel::Splurge;

        // Both stages narrow in order, so the expensive filter runs last
        // over the cheap survivors and nothing satisfies both
        let outcome = run("cheap but fancy", &[free, splurge], &[]);
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.filtered_count, 0);
    }

    #[test]
    fn test_local_keeps_only_local_drive_time() {
        let mut near = activity("near");
        near.ai.location.drive_time = DriveTime::Local;
        let mut far = activity("far");
        far.ai.location.drive_time = DriveTime::DayTrip;

        let outcome = run("something nearby", &[near, far], &[]);
        assert_eq!(ids(&outcome), vec!["near"]);
    }

    #[test]
    fn test_day_trip_keeps_local_and_day_trip() {
        let mut near = activity("near");
        near.ai.location.drive_time = DriveTime::Local;
        let mut far = activity("far");
        far.ai.location.drive_time = DriveTime::DayTrip;
        let mut weekend = activity("weekend");
        weekend.ai.location.drive_time = DriveTime::WeekendTrip;

        let outcome = run("a day trip somewhere", &[near, far, weekend], &[]);
        let result = ids(&outcome);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&"near"));
        assert!(result.contains(&"far"));
    }

    #[test]
    fn test_city_exclusion_patterns() {
        assert_eq!(excluded_cities("no nyc please"), vec!["nyc"]);
        assert_eq!(excluded_cities("avoid philadelphia"), vec!["philadelphia"]);
        assert_eq!(excluded_cities("skip boston, except dc too"), vec!["boston", "dc"]);
        assert!(excluded_cities("i love new york").is_empty());
    }

    #[test]
    fn test_excluded_city_drops_matching_activities() {
        let mut princeton = activity("princeton");
        princeton.ai.location.city = "Princeton".to_string();
        let mut philadelphia = activity("philadelphia");
        philadelphia.ai.location.city = "Philadelphia".to_string();

        let outcome = run(
            "museums but not philadelphia",
            &[princeton, philadelphia],
            &[],
        );
        assert_eq!(ids(&outcome), vec!["princeton"]);
    }

    #[test]
    fn test_excluded_city_is_substring_match() {
        let mut metro = activity("metro");
        metro.ai.location.city = "Greater NYC Area".to_string();
        let mut home = activity("home");
        home.ai.location.city = "Princeton".to_string();

        let outcome = run("anything, skip nyc", &[metro, home], &[]);
        assert_eq!(ids(&outcome), vec!["home"]);
    }

    #[test]
    fn test_quick_keeps_short_durations() {
        let mut quick = activity("quick");
        quick.ai.time.duration = Duration::Quick;
        let mut hour = activity("hour");
        hour.ai.time.duration = Duration::OneToTwoHours;
        let mut half = activity("half");
        half.ai.time.duration = Duration::HalfDay;

        let outcome = run("something quick", &[quick, hour, half], &[]);
        let result = ids(&outcome);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&"quick"));
        assert!(result.contains(&"hour"));
    }

    #[test]
    fn test_full_day_keeps_long_durations() {
        let mut hour = activity("hour");
        hour.ai.time.duration = Duration::OneToTwoHours;
        let mut half = activity("half");
        half.ai.time.duration = Duration::HalfDay;
        let mut full = activity("full");
        full.ai.time.duration = Duration::FullDay;

        let outcome = run("make an all day thing of it", &[hour, half, full], &[]);
        let result = ids(&outcome);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&"half"));
        assert!(result.contains(&"full"));
    }

    #[test]
    fn test_off_season_event_is_excluded() {
        let mut festival = activity("festival");
        festival.ai.seasonal = Some(Seasonal {
            is_event: true,
            event_notes: Some("Summer concert series".to_string()),
            best_seasons: vec![Season::Summer],
            year_round: false,
        });

        let mut rng = StdRng::seed_from_u64(7);
        let winter = filter_candidates_with_rng(
            "anything goes",
            std::slice::from_ref(&festival),
            &context(Season::Winter),
            &[],
            false,
            &mut rng,
        );
        assert!(winter.candidates.is_empty());

        let summer = run("anything goes", &[festival], &[]);
        assert_eq!(ids(&summer), vec!["festival"]);
    }

    #[test]
    fn test_year_round_event_passes_any_season() {
        let mut market = activity("market");
        market.ai.seasonal = Some(Seasonal {
            is_event: true,
            event_notes: None,
            best_seasons: Vec::new(),
            year_round: true,
        });

        let mut rng = StdRng::seed_from_u64(7);
        let winter = filter_candidates_with_rng(
            "anything goes",
            &[market],
            &context(Season::Winter),
            &[],
            false,
            &mut rng,
        );
        assert_eq!(winter.candidates.len(), 1);
    }

    #[test]
    fn test_missing_seasonal_block_passes() {
        let plain = activity("plain");
        let outcome = run("anything goes", &[plain], &[]);
        assert_eq!(outcome.candidates.len(), 1);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let catalog: Vec<Activity> = (0..12).map(|i| activity(&format!("a{}", i))).collect();
        let recent: Vec<String> = vec!["a0".to_string(), "a1".to_string(), "a2".to_string()];

        let outcome = run("anything goes", &catalog, &recent);
        assert_eq!(outcome.candidates.len(), 12);
        assert_eq!(outcome.fresh_count, 9);

        let mut output: Vec<&str> = ids(&outcome);
        output.sort_unstable();
        let mut input: Vec<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        input.sort_unstable();
        assert_eq!(output, input);
    }

    #[test]
    fn test_fresh_candidates_precede_recent_ones() {
        let catalog: Vec<Activity> = (0..10).map(|i| activity(&format!("a{}", i))).collect();
        let recent: Vec<String> = vec!["a3".to_string(), "a7".to_string()];

        let outcome = run("anything goes", &catalog, &recent);
        let result = ids(&outcome);
        for (position, id) in result.iter().enumerate() {
            let is_recent = recent.iter().any(|r| r == id);
            if position < 8 {
                assert!(!is_recent, "fresh slot {} held recent id {}", position, id);
            } else {
                assert!(is_recent, "recent slot {} held fresh id {}", position, id);
            }
        }
    }

    #[test]
    fn test_caps_at_fifteen_candidates() {
        let catalog: Vec<Activity> = (0..20).map(|i| activity(&format!("a{}", i))).collect();
        let outcome = run("anything goes", &catalog, &[]);
        assert_eq!(outcome.candidates.len(), MAX_CANDIDATES);
        assert_eq!(outcome.filtered_count, 20);
        assert_eq!(outcome.fresh_count, 20);
    }

    #[test]
    fn test_single_activity_cheap_indoor_food() {
        let catalog: Vec<Activity> = serde_json::from_str(
            r#"[{
                "id": "a",
                "ai": {
                    "categories": ["food"],
                    "cost": {"level": "$"},
                    "weather": {"indoor": true, "outdoor": false, "weatherDependent": false},
                    "location": {"city": "Princeton", "driveTime": "local"},
                    "time": {"duration": "quick"},
                    "seasonal": {"isEvent": false}
                }
            }]"#,
        )
        .unwrap();

        let outcome = run("cheap indoor food", &catalog, &[]);
        assert_eq!(ids(&outcome), vec!["a"]);
    }

    #[test]
    fn test_empty_result_stays_empty_without_relax() {
        let mut splurge = activity("splurge");
        splurge.ai.cost.level = CostLevel::Splurge;

        let outcome = run("cheap ideas", &[splurge], &[]);
        assert!(outcome.candidates.is_empty());
        assert_eq!(outcome.filtered_count, 0);
    }

    #[test]
    fn test_relax_rebuilds_from_catalog_with_seasonal_stage() {
        let mut splurge = activity("splurge");
        splurge.ai.cost.level = CostLevel::Splurge;
        let mut off_season = activity("off-season");
        off_season.ai.cost.level = CostLevel::Splurge;
        off_season.ai.seasonal = Some(Seasonal {
            is_event: true,
            event_notes: None,
            best_seasons: vec![Season::Winter],
            year_round: false,
        });

        let mut rng = StdRng::seed_from_u64(7);
        let outcome = filter_candidates_with_rng(
            "cheap ideas",
            &[splurge, off_season],
            &context(Season::Summer),
            &[],
            true,
            &mut rng,
        );
        // The budget stage emptied the set; the rebuild keeps everything
        // in season regardless of cost
        assert_eq!(ids(&outcome), vec!["splurge"]);
        assert_eq!(outcome.filtered_count, 1);
    }

    #[test]
    fn test_neutral_query_narrows_nothing() {
        let catalog: Vec<Activity> = (0..5).map(|i| activity(&format!("a{}", i))).collect();
        let outcome = run("anything goes", &catalog, &[]);
        assert!(outcome.matched_categories.is_empty());
        assert_eq!(outcome.filtered_count, 5);
    }
}
