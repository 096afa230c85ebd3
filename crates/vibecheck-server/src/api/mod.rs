mod status;
mod vibecheck;

use std::any::Any;
use std::sync::Arc;

use axum::{
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use vibecheck_analysis::GeminiClient;
use vibecheck_core::AppConfig;
use vibecheck_instagram::ProfileFetcher;

use crate::middleware::{request_id, REQUEST_ID_HEADER};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub fetcher: ProfileFetcher,
    /// `None` when no API key is configured or the client could not be built.
    pub gemini: Option<GeminiClient>,
}

impl AppState {
    /// Builds the long-lived HTTP clients once from `config`.
    pub fn from_config(config: Arc<AppConfig>) -> Self {
        let fetcher = ProfileFetcher::new(Arc::clone(&config));
        let gemini = config.gemini.api_key.as_deref().and_then(|key| {
            GeminiClient::new(
                &config.gemini,
                key,
                config.http_timeout_secs,
                &config.user_agent,
            )
            .map_err(|e| tracing::warn!(error = %e, "Gemini client unavailable"))
            .ok()
        });
        Self {
            config,
            fetcher,
            gemini,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// CORS from the configured origin list; `*` allows any origin.
fn build_cors(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ]);

    if origins.iter().any(|o| o == "*") {
        return layer.allow_origin(tower_http::cors::Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(allowed).allow_credentials(true)
}

/// Converts a panic inside a handler into the standard 500 error envelope.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "request handler panicked");
    // The request id is not reachable from here; the header is still set by
    // the outer middleware.
    ApiError::new(
        "unavailable",
        "internal_error",
        format!("Analysis failed: {detail}. Please check your API configuration."),
    )
    .into_response()
}

/// Wraps `router` in the shared middleware stack.
fn with_layers(router: Router, config: &AppConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(build_cors(&config.cors_origins))
            .layer(axum::middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

pub fn build_app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let router = Router::new()
        .route("/", get(status::root))
        .route("/health", get(status::health))
        .route("/instagram-status", get(status::instagram_status))
        .route("/vibecheck", post(vibecheck::vibecheck))
        .route("/vibecheck/", post(vibecheck::vibecheck))
        .with_state(state);
    with_layers(router, &config)
}

#[cfg(test)]
mod tests;
