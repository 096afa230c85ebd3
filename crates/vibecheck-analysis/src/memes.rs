//! Meme captions paired with the profile's own images.

use serde::Deserialize;
use vibecheck_core::{AnalysisResult, MemeCard, Post};

use crate::fallback::generate_json_or;
use crate::gemini::{GeminiClient, Part};

pub const MAX_MEMES: usize = 2;

#[derive(Debug, Default, Deserialize)]
struct MemeReply {
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    meme_text: Option<String>,
}

/// Deterministic caption and overlay text for meme `slot`.
#[must_use]
pub fn template_meme(slot: usize, analysis: &AnalysisResult) -> (String, String) {
    if slot == 0 {
        (
            format!("Vibe Check Result: {}", analysis.dominant_sentiment.title()),
            format!(
                "POV: You're living your {} {} era ✨",
                analysis.dominant_sentiment,
                analysis.first_topic().unwrap_or("boss")
            ),
        )
    } else {
        let style = if analysis.style.trim().is_empty() {
            "authentic"
        } else {
            analysis.style.as_str()
        };
        (
            format!("Mood: {}", analysis.first_topic().unwrap_or("Aesthetic")),
            format!("When someone asks about your {style} energy 💫"),
        )
    }
}

fn meme_prompt(analysis: &AnalysisResult, count: usize) -> String {
    format!(
        r#"Create meme captions. Return ONLY a valid JSON array:

[
  {{
    "caption": "Meme description",
    "meme_text": "Funny overlay text"
  }}
]

User vibe:
- Sentiment: {sentiment}
- Topics: {topics}
- Style: {style}

Make exactly {count} funny Gen Z memes. Return only the JSON array:"#,
        sentiment = analysis.dominant_sentiment,
        topics = analysis.topics.join(", "),
        style = analysis.style,
    )
}

/// Composes one meme per image-bearing post, for the first [`MAX_MEMES`]
/// such posts in order.
///
/// With no images the model is not called. Missing model entries or fields
/// are filled from [`template_meme`], so the output length is always
/// `min(MAX_MEMES, image-bearing posts)`.
pub async fn compose_memes(
    client: &GeminiClient,
    analysis: &AnalysisResult,
    posts: &[Post],
) -> Vec<MemeCard> {
    let selected: Vec<(&Post, &str)> = posts
        .iter()
        .filter_map(|post| {
            post.image_url
                .as_deref()
                .filter(|url| !url.trim().is_empty())
                .map(|url| (post, url))
        })
        .take(MAX_MEMES)
        .collect();

    if selected.is_empty() {
        tracing::debug!("no image-bearing posts; skipping meme generation");
        return Vec::new();
    }

    let parts = [Part::text(meme_prompt(analysis, selected.len()))];
    let mut replies: Vec<MemeReply> =
        generate_json_or(client, "memes", &parts, Vec::new).await;
    replies.resize_with(selected.len(), MemeReply::default);

    selected
        .into_iter()
        .zip(replies)
        .enumerate()
        .map(|(slot, ((post, image_url), reply))| {
            let (caption, meme_text) = template_meme(slot, analysis);
            MemeCard {
                caption: non_blank(reply.caption).unwrap_or(caption),
                meme_text: non_blank(reply.meme_text).unwrap_or(meme_text),
                image_url: image_url.to_string(),
                original_caption: post.caption.clone(),
                permalink: post.permalink.clone(),
            }
        })
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
