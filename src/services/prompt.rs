use std::fmt::Write;

use crate::models::{Activity, QueryContext};

/// Builds the instruction block sent to the generative service
///
/// The output is deterministic for a given input: same candidates in the
/// same order produce the same string. Candidate ids are wrapped in
/// `[ID: ...]` markers the reply must echo back.
pub fn build_prompt(
    query: &str,
    candidates: &[Activity],
    context: &QueryContext,
    location_label: &str,
) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "You are a helpful date planning assistant.");
    let _ = writeln!(
        prompt,
        "CRITICAL: You MUST respond with valid JSON only. No conversational text before or after the JSON."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "CURRENT CONTEXT:");
    match &context.weather {
        Some(weather) => {
            let _ = writeln!(
                prompt,
                "- Weather: {} ({}°F), {}",
                weather.condition, weather.temp, weather.description
            );
        }
        None => {
            let _ = writeln!(prompt, "- Weather: unavailable");
        }
    }
    let _ = writeln!(prompt, "- Today is: {}", context.date_label);
    let _ = writeln!(prompt, "- Season: {}", context.season);
    let _ = writeln!(
        prompt,
        "- {}",
        if context.is_weekend { "Weekend" } else { "Weekday" }
    );
    let _ = writeln!(prompt, "- Current time: {}", context.time_label);
    let _ = writeln!(prompt, "- Location: {}", location_label);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "User query: \"{}\"", query);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Here are {} relevant date ideas:", candidates.len());
    let _ = writeln!(prompt);

    for (index, activity) in candidates.iter().enumerate() {
        let _ = writeln!(
            prompt,
            "{}. [ID: {}] {}",
            index + 1,
            activity.id,
            activity.ai.title
        );
        let _ = writeln!(prompt, "   {}", activity.ai.summary);
        let _ = writeln!(
            prompt,
            "   Location: {}, {}",
            activity.ai.location.city, activity.ai.location.state
        );
        let _ = writeln!(prompt, "   Cost: {}", activity.ai.cost.level);
        let _ = writeln!(
            prompt,
            "   Indoor: {}",
            if activity.ai.weather.indoor { "Yes" } else { "No" }
        );
        let _ = writeln!(
            prompt,
            "   Weather-dependent: {}",
            if activity.ai.weather.weather_dependent {
                "Yes"
            } else {
                "No"
            }
        );
        let categories: Vec<String> = activity
            .ai
            .categories
            .iter()
            .map(|c| c.to_string())
            .collect();
        let _ = writeln!(prompt, "   Categories: {}", categories.join(", "));
        if activity
            .ai
            .seasonal
            .as_ref()
            .is_some_and(|s| s.is_event)
        {
            let _ = writeln!(prompt, "   Seasonal event - verify dates");
        }
        let _ = writeln!(prompt);
    }

    let _ = writeln!(prompt, "YOU MUST RESPOND ONLY WITH VALID JSON. NO OTHER TEXT.");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Required JSON format:");
    let _ = writeln!(prompt, "{{");
    let _ = writeln!(prompt, "\"message\": \"Brief 1-2 sentence intro\",");
    let _ = writeln!(prompt, "\"recommendations\": [");
    let _ = writeln!(
        prompt,
        "    {{\"id\": \"DQ5M5VKEcw2\", \"reason\": \"Why this is perfect\"}}"
    );
    let _ = writeln!(prompt, "]");
    let _ = writeln!(prompt, "}}");
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "CRITICAL: Use the EXACT ID shown in [ID: ...] brackets, not the list numbers!"
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Rules:");
    let _ = writeln!(prompt, "- Return 3-5 recommendations");
    let _ = writeln!(prompt, "- Use EXACT IDs from the numbered list above");
    let _ = writeln!(prompt, "- NO markdown, NO code blocks, NO explanation");
    let _ = writeln!(prompt, "- ONLY the raw JSON object");
    let _ = writeln!(prompt, "- Start with {{ and end with }}");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Example of what I want:");
    let _ = writeln!(
        prompt,
        "{{\"message\":\"Great ideas for today!\",\"recommendations\":[{{\"id\":\"DQ5M5VKEcw2\",\"reason\":\"Perfect indoor activity\"}},{{\"id\":\"DOM7i2QjPfQ\",\"reason\":\"Fun fall experience\"}}]}}"
    );
    let _ = writeln!(prompt);
    let _ = write!(prompt, "NOW RESPOND WITH JSON ONLY:");

    prompt
}
