use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use vibecheck_instagram::InstagramStatus;

use super::AppState;

const SERVICE_STATUS: &str = "Vibe Check AI Backend running";
const API_VERSION: &str = "1.0.0";

#[derive(Debug, Serialize)]
pub(super) struct RootInfo {
    status: &'static str,
    version: &'static str,
    endpoints: [&'static str; 3],
    instagram_api: &'static str,
}

#[derive(Debug, Serialize)]
pub(super) struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

pub(super) async fn root(State(state): State<AppState>) -> Json<RootInfo> {
    let instagram_api = if state.config.instagram.has_business_credentials() {
        "Instagram Business API configured; demo data used when it yields nothing"
    } else {
        "Instagram Business API not configured; using demo data"
    };
    Json(RootInfo {
        status: SERVICE_STATUS,
        version: API_VERSION,
        endpoints: ["/vibecheck/", "/health", "/instagram-status"],
        instagram_api,
    })
}

pub(super) async fn health() -> Json<HealthData> {
    Json(HealthData {
        status: "healthy",
        timestamp: Utc::now(),
    })
}

pub(super) async fn instagram_status(State(state): State<AppState>) -> Json<InstagramStatus> {
    Json(state.fetcher.status().await)
}
