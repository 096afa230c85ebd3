use axum::{body::Bytes, extract::State, Extension, Json};
use serde::Deserialize;
use vibecheck_analysis::{run_vibe_check, VibeReport};
use vibecheck_core::Handle;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

const DEFAULT_MAX_POSTS: i64 = 12;
const MAX_POSTS_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub(super) struct VibeCheckRequest {
    #[serde(default)]
    insta_link: Option<String>,
    #[serde(default)]
    max_posts: Option<i64>,
}

pub(super) fn normalize_max_posts(max_posts: Option<i64>) -> usize {
    let clamped = max_posts
        .unwrap_or(DEFAULT_MAX_POSTS)
        .clamp(0, MAX_POSTS_LIMIT);
    usize::try_from(clamped).unwrap_or(0)
}

/// Parses the body by hand so that empty or malformed bodies get the same
/// 400 envelope as a missing `insta_link`.
fn parse_request(request_id: &str, body: &[u8]) -> Result<(String, usize), ApiError> {
    let missing_link = || ApiError::new(request_id, "bad_request", "Provide insta_link");

    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(missing_link());
    }

    let request: VibeCheckRequest = serde_json::from_slice(body).map_err(|e| {
        ApiError::new(
            request_id,
            "bad_request",
            format!("invalid request body: {e}"),
        )
    })?;

    let link = request
        .insta_link
        .filter(|l| !l.trim().is_empty())
        .ok_or_else(missing_link)?;

    Ok((link, normalize_max_posts(request.max_posts)))
}

pub(super) async fn vibecheck(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<Json<VibeReport>, ApiError> {
    let (link, max_posts) = parse_request(&req_id.0, &body)?;

    if state.config.gemini_api_key().is_err() {
        tracing::error!("GEMINI_API_KEY is not set");
        return Err(ApiError::new(
            req_id.0,
            "config_error",
            "Gemini API key not configured",
        ));
    }
    let Some(gemini) = state.gemini.as_ref() else {
        return Err(ApiError::new(
            req_id.0,
            "config_error",
            "Gemini client unavailable; check GEMINI_BASE_URL and GEMINI_MODEL",
        ));
    };

    let handle = Handle::extract(&link);
    if handle.is_empty() {
        tracing::info!(link = %link, "no valid handle in link; using demo profile");
    }

    let report = run_vibe_check(&state.fetcher, gemini, &handle, max_posts).await;
    Ok(Json(report))
}
