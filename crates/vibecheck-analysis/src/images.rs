//! Per-image mood and content tagging.

use serde::Deserialize;
use vibecheck_core::ImageTag;

use crate::error::AnalysisError;
use crate::fallback::generate_json_or;
use crate::gemini::{GeminiClient, Part};

/// At most this many images are analyzed per request.
pub const MAX_IMAGES: usize = 5;

const DEFAULT_MIME: &str = "image/jpeg";

const IMAGE_PROMPT: &str = r##"Analyze this social media image and return ONLY a valid JSON object with no additional text:

{
  "mood": "overall mood or vibe of the image",
  "colors": ["#hex1", "#hex2", "#hex3"],
  "objects": ["object1", "object2"],
  "description": "one sentence description"
}

Return only the JSON object:"##;

/// Tag used for any image that could not be downloaded or analyzed.
#[must_use]
pub fn fallback_image_tag() -> ImageTag {
    ImageTag {
        mood: "vibrant / aesthetic".to_string(),
        colors: vec![
            "#4a5568".to_string(),
            "#2d3748".to_string(),
            "#1a202c".to_string(),
        ],
        objects: vec!["visual_content".to_string()],
        description: "Beautiful visual content with good aesthetic appeal".to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ImageReply {
    #[serde(default)]
    mood: Option<String>,
    #[serde(default)]
    colors: Option<Vec<String>>,
    #[serde(default)]
    objects: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
}

impl ImageReply {
    /// Missing or blank fields take their value from [`fallback_image_tag`].
    fn into_tag(self) -> ImageTag {
        let fallback = fallback_image_tag();
        ImageTag {
            mood: non_blank(self.mood).unwrap_or(fallback.mood),
            colors: non_blank_list(self.colors).unwrap_or(fallback.colors),
            objects: non_blank_list(self.objects).unwrap_or(fallback.objects),
            description: non_blank(self.description).unwrap_or(fallback.description),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_blank_list(values: Option<Vec<String>>) -> Option<Vec<String>> {
    let values: Vec<String> = values?
        .into_iter()
        .filter_map(|v| non_blank(Some(v)))
        .collect();
    (!values.is_empty()).then_some(values)
}

/// Tags up to [`MAX_IMAGES`] non-blank URLs, in input order.
///
/// Each image is analyzed independently; a failed image yields
/// [`fallback_image_tag`] and the rest continue.
pub async fn analyze_images(client: &GeminiClient, urls: &[&str]) -> Vec<ImageTag> {
    let mut tags = Vec::new();
    for url in urls
        .iter()
        .map(|u| u.trim())
        .filter(|u| !u.is_empty())
        .take(MAX_IMAGES)
    {
        tags.push(analyze_image(client, url).await);
    }
    tags
}

async fn analyze_image(client: &GeminiClient, url: &str) -> ImageTag {
    let (mime, bytes) = match download_image(client.http(), url).await {
        Ok(image) => image,
        Err(e) => {
            tracing::warn!(url, error = %e, "image download failed; using fallback tag");
            return fallback_image_tag();
        }
    };

    let parts = [Part::image(&mime, &bytes), Part::text(IMAGE_PROMPT)];
    let reply: ImageReply =
        generate_json_or(client, "image_analysis", &parts, ImageReply::default).await;
    reply.into_tag()
}

/// Fetches image bytes and their MIME type.
///
/// The type comes from `Content-Type` when it names an image, else
/// `image/jpeg`.
async fn download_image(
    http: &reqwest::Client,
    url: &str,
) -> Result<(String, Vec<u8>), AnalysisError> {
    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AnalysisError::ImageDownload {
            url: url.to_string(),
            reason: format!("HTTP {status}"),
        });
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(image_mime)
        .unwrap_or(DEFAULT_MIME)
        .to_string();
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Err(AnalysisError::ImageDownload {
            url: url.to_string(),
            reason: "empty body".to_string(),
        });
    }
    Ok((mime, bytes.to_vec()))
}

fn image_mime(content_type: &str) -> Option<&str> {
    let mime = content_type.split(';').next()?.trim();
    mime.starts_with("image/").then_some(mime)
}
