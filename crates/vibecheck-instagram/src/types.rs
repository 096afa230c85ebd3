//! Instagram Graph API response types.
//!
//! Only the fields vibecheck reads are modelled. Everything the API may omit
//! is `Option` or `#[serde(default)]` so partial payloads still deserialize.

use serde::{Deserialize, Serialize};

/// `GET /me?fields=id,name`: identity probe used to validate a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphIdentity {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /{ig-user-id}/media` envelope.
#[derive(Debug, Deserialize)]
pub struct MediaResponse {
    #[serde(default)]
    pub data: Vec<GraphMedia>,
}

/// One media object from the business account's media edge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GraphMedia {
    #[serde(default)]
    pub caption: Option<String>,
    /// `IMAGE`, `VIDEO`, or `CAROUSEL_ALBUM`.
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    /// Present for videos; used when `media_url` is missing.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub like_count: Option<u64>,
    #[serde(default)]
    pub comments_count: Option<u64>,
}

/// `GET /oauth/access_token?grant_type=client_credentials`.
#[derive(Debug, Deserialize)]
pub struct AppTokenResponse {
    pub access_token: String,
}

/// Error envelope: `{"error": {"message": ..., "type": ..., "code": 190}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorEnvelope {
    pub(crate) error: GraphErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphErrorBody {
    #[serde(default)]
    pub(crate) message: Option<String>,
    #[serde(default)]
    pub(crate) code: Option<i64>,
}
