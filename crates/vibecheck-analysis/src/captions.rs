//! Sentiment, topic, and style analysis of post captions.

use serde::Deserialize;
use vibecheck_core::{AnalysisResult, Sentiment};

use crate::fallback::generate_json_or;
use crate::gemini::{GeminiClient, Part};

/// Result for a profile with no caption text at all.
#[must_use]
pub fn minimal_analysis() -> AnalysisResult {
    AnalysisResult {
        dominant_sentiment: Sentiment::Neutral,
        topics: Vec::new(),
        style: "minimal".to_string(),
        keywords: Vec::new(),
    }
}

/// Result used when the model call or its reply fails.
#[must_use]
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        dominant_sentiment: Sentiment::Positive,
        topics: vec!["lifestyle".to_string(), "personal".to_string()],
        style: "authentic and relatable".to_string(),
        keywords: vec!["life".to_string(), "vibes".to_string(), "moments".to_string()],
    }
}

#[derive(Debug, Default, Deserialize)]
struct CaptionReply {
    #[serde(default)]
    dominant_sentiment: Option<Sentiment>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

impl CaptionReply {
    /// Missing or blank fields take their value from [`fallback_analysis`].
    fn into_analysis(self) -> AnalysisResult {
        let fallback = fallback_analysis();
        let parsed = AnalysisResult {
            dominant_sentiment: self
                .dominant_sentiment
                .unwrap_or(fallback.dominant_sentiment),
            topics: self.topics.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            keywords: self.keywords.unwrap_or_default(),
        }
        .normalized();

        AnalysisResult {
            dominant_sentiment: parsed.dominant_sentiment,
            topics: non_empty(parsed.topics).unwrap_or(fallback.topics),
            style: Some(parsed.style)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback.style),
            keywords: non_empty(parsed.keywords).unwrap_or(fallback.keywords),
        }
    }
}

fn non_empty(items: Vec<String>) -> Option<Vec<String>> {
    (!items.is_empty()).then_some(items)
}

fn caption_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following social media captions and return ONLY a valid JSON object with no additional text:

{{
  "dominant_sentiment": "positive", "negative", or "neutral",
  "topics": ["topic1", "topic2", "topic3"],
  "style": "description of writing style",
  "keywords": ["keyword1", "keyword2", "keyword3"]
}}

Captions to analyze: {text}

Return only the JSON object:"#
    )
}

/// Analyzes captions in one model call.
///
/// Blank captions are dropped; if nothing remains the model is not called
/// and [`minimal_analysis`] is returned.
pub async fn analyze_captions(client: &GeminiClient, captions: &[&str]) -> AnalysisResult {
    let joined = captions
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        tracing::debug!("no caption text; skipping caption analysis");
        return minimal_analysis();
    }

    let parts = [Part::text(caption_prompt(&joined))];
    let reply: CaptionReply =
        generate_json_or(client, "caption_analysis", &parts, CaptionReply::default).await;
    reply.into_analysis()
}
