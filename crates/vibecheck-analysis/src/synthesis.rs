//! Witty profile summary generation.

use serde::Deserialize;
use vibecheck_core::{AnalysisResult, Handle, VibeProfile};

use crate::fallback::generate_json_or;
use crate::gemini::{GeminiClient, Part};

const DEFAULT_TAGLINE: &str = "Living life in full color 🌈";

#[derive(Debug, Default, Deserialize)]
struct SummaryReply {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    tagline: Option<String>,
}

fn default_profile_text(handle: &Handle) -> String {
    format!(
        "@{handle} is serving authentic vibes with that perfect balance of chaos and charm. The main character energy is strong with this one! ✨"
    )
}

fn summary_prompt(analysis: &AnalysisResult, bio: &str) -> String {
    format!(
        r#"Create a fun vibe profile based on this data. Return ONLY a valid JSON object:

{{
  "summary": "A witty, Gen Z style roast of the user's vibe",
  "tagline": "A short catchy tagline"
}}

Data:
- Sentiment: {sentiment}
- Topics: {topics}
- Style: {style}
- Bio: {bio}

Make it funny but not mean. Return only the JSON:"#,
        sentiment = analysis.dominant_sentiment,
        topics = analysis.topics.join(", "),
        style = analysis.style,
    )
}

/// Builds the profile summary in one model call.
///
/// A missing or blank `summary`/`tagline` falls back individually.
/// Sentiment, topics, and style are always copied from `analysis`.
pub async fn create_vibe_profile(
    client: &GeminiClient,
    analysis: &AnalysisResult,
    bio: &str,
    handle: &Handle,
) -> VibeProfile {
    let parts = [Part::text(summary_prompt(analysis, bio))];
    let reply: SummaryReply =
        generate_json_or(client, "vibe_profile", &parts, SummaryReply::default).await;

    VibeProfile {
        profile_text: non_blank(reply.summary).unwrap_or_else(|| default_profile_text(handle)),
        tagline: non_blank(reply.tagline).unwrap_or_else(|| DEFAULT_TAGLINE.to_string()),
        handle: handle.clone(),
        dominant_sentiment: analysis.dominant_sentiment,
        topics: analysis.topics.clone(),
        style: analysis.style.clone(),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use vibecheck_core::Sentiment;

    use super::*;

    #[test]
    fn default_text_names_handle() {
        let handle = Handle::extract("coffee.page");
        assert!(default_profile_text(&handle).starts_with("@coffee.page is serving"));
    }

    #[test]
    fn prompt_lists_analysis() {
        let analysis = AnalysisResult {
            dominant_sentiment: Sentiment::Negative,
            topics: vec!["mondays".to_string(), "rain".to_string()],
            style: "dry".to_string(),
            keywords: Vec::new(),
        };
        let prompt = summary_prompt(&analysis, "just a bio");
        assert!(prompt.contains("- Sentiment: negative"));
        assert!(prompt.contains("- Topics: mondays, rain"));
        assert!(prompt.contains("- Bio: just a bio"));
    }
}
