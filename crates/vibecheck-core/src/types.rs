//! Per-request domain types shared by the source chain, the analysis stages,
//! and the HTTP layer.

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::Handle;

/// A single post, normalized from whichever source produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Caption text. Empty when the provider returned none.
    pub caption: String,
    pub permalink: Option<String>,
    pub image_url: Option<String>,
    pub media_type: String,
    /// Provider timestamp, passed through verbatim (ISO-8601 for Graph API).
    pub timestamp: Option<String>,
    pub like_count: u64,
    pub comment_count: u64,
}

impl Post {
    /// A post carrying only a caption and optional links, as used by the
    /// static demo and fallback content.
    #[must_use]
    pub fn simple(caption: &str, permalink: Option<String>, image_url: Option<&str>) -> Self {
        Self {
            caption: caption.to_string(),
            permalink,
            image_url: image_url.map(ToOwned::to_owned),
            media_type: "IMAGE".to_string(),
            timestamp: None,
            like_count: 0,
            comment_count: 0,
        }
    }
}

/// Which strategy produced the returned snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    BusinessApi,
    Demo,
    Fallback,
}

/// Every strategy the source chain knows about, including ones that can
/// never be the final [`SourceTag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    BusinessApi,
    AppTokenSearch,
    Demo,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptOutcome {
    Used,
    SkippedUnconfigured,
    CredentialInvalid,
    PermissionDenied,
    Empty,
    Unsupported,
    Failed,
}

/// Record of one strategy considered while building a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAttempt {
    pub source: SourceKind,
    pub outcome: AttemptOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl SourceAttempt {
    #[must_use]
    pub fn new(source: SourceKind, outcome: AttemptOutcome) -> Self {
        Self {
            source,
            outcome,
            detail: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Bio plus posts for one handle, in a single shape regardless of source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub handle: Handle,
    pub bio: String,
    pub posts: Vec<Post>,
    pub source: SourceTag,
    pub note: String,
    #[serde(default)]
    pub attempts: Vec<SourceAttempt>,
}

impl ProfileSnapshot {
    pub fn captions(&self) -> impl Iterator<Item = &str> {
        self.posts.iter().map(|p| p.caption.as_str())
    }

    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.posts
            .iter()
            .filter_map(|p| p.image_url.as_deref())
            .filter(|url| !url.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Lenient parse: case-insensitive, unknown labels map to `Neutral`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Self::Positive,
            "negative" => Self::Negative,
            _ => Self::Neutral,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }

    /// Label with the first letter upper-cased, for display text.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
        }
    }
}

impl<'de> Deserialize<'de> for Sentiment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::from_label(&label))
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub dominant_sentiment: Sentiment,
    pub topics: Vec<String>,
    pub style: String,
    pub keywords: Vec<String>,
}

impl AnalysisResult {
    /// Trims entries and removes blanks and case-insensitive duplicates from
    /// `topics` and `keywords`, keeping first occurrences in order.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        self.topics = ordered_set(self.topics);
        self.keywords = ordered_set(self.keywords);
        self.style = self.style.trim().to_string();
        self
    }

    #[must_use]
    pub fn first_topic(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }
}

fn ordered_set(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Mood, palette, and content tags for one analyzed image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageTag {
    pub mood: String,
    pub colors: Vec<String>,
    pub objects: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeProfile {
    pub profile_text: String,
    pub tagline: String,
    pub handle: Handle,
    pub dominant_sentiment: Sentiment,
    pub topics: Vec<String>,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemeCard {
    pub caption: String,
    pub meme_text: String,
    pub image_url: String,
    pub original_caption: String,
    pub permalink: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_parses_leniently() {
        let s: Sentiment = serde_json::from_str("\"Positive\"").unwrap();
        assert_eq!(s, Sentiment::Positive);
        let s: Sentiment = serde_json::from_str("\"meh\"").unwrap();
        assert_eq!(s, Sentiment::Neutral);
    }

    #[test]
    fn sentiment_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Sentiment::Negative).unwrap(),
            "\"negative\""
        );
    }

    #[test]
    fn normalized_dedupes_topics_in_order() {
        let result = AnalysisResult {
            dominant_sentiment: Sentiment::Positive,
            topics: vec![
                "Travel".to_string(),
                " food ".to_string(),
                "travel".to_string(),
                String::new(),
            ],
            style: " breezy ".to_string(),
            keywords: vec!["sun".to_string(), "Sun".to_string()],
        }
        .normalized();
        assert_eq!(result.topics, vec!["Travel".to_string(), "food".to_string()]);
        assert_eq!(result.keywords, vec!["sun".to_string()]);
        assert_eq!(result.style, "breezy");
    }

    #[test]
    fn image_urls_skip_absent_and_blank() {
        let snapshot = ProfileSnapshot {
            handle: Handle::extract("user"),
            bio: String::new(),
            posts: vec![
                Post::simple("a", None, Some("https://img/1.jpg")),
                Post::simple("b", None, None),
                Post::simple("c", None, Some("  ")),
            ],
            source: SourceTag::Demo,
            note: String::new(),
            attempts: Vec::new(),
        };
        assert_eq!(
            snapshot.image_urls().collect::<Vec<_>>(),
            vec!["https://img/1.jpg"]
        );
    }

    #[test]
    fn absent_optionals_serialize_as_null() {
        let json = serde_json::to_value(Post::simple("hi", None, None)).unwrap();
        assert!(json["permalink"].is_null());
        assert!(json["image_url"].is_null());
        assert_eq!(json["caption"], "hi");
    }

    #[test]
    fn attempt_detail_is_omitted_when_absent() {
        let json = serde_json::to_value(SourceAttempt::new(
            SourceKind::AppTokenSearch,
            AttemptOutcome::Unsupported,
        ))
        .unwrap();
        assert_eq!(json["source"], "app_token_search");
        assert_eq!(json["outcome"], "unsupported");
        assert!(json.get("detail").is_none());
    }
}
