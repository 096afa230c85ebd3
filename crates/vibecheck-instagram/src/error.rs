use thiserror::Error;

/// Errors returned by the Instagram Graph API client.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Graph API answered with a non-2xx status.
    #[error("Graph API error (HTTP {status}, code {code:?}): {message}")]
    Graph {
        status: u16,
        code: Option<i64>,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Graph API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl InstagramError {
    /// Graph error code 190: expired, revoked, or malformed access token.
    #[must_use]
    pub fn is_token_invalid(&self) -> bool {
        match self {
            Self::Graph { status, code, .. } => *code == Some(190) || *status == 401,
            _ => false,
        }
    }

    /// HTTP 403 or Graph permission codes (10, 200–299).
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::Graph { status, code, .. } => {
                *status == 403 || matches!(code, Some(10 | 200..=299))
            }
            _ => false,
        }
    }

    /// Any other 4xx answer from the Graph API.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Graph { status, .. } if (400..500).contains(status))
    }
}
