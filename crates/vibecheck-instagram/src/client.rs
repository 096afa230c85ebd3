//! HTTP client for the Instagram Graph API.
//!
//! Wraps `reqwest` with Graph-specific error decoding (`{"error": {...}}`
//! envelopes), base URL handling, and typed response deserialization.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::InstagramError;
use crate::types::{AppTokenResponse, GraphErrorEnvelope, GraphIdentity, GraphMedia, MediaResponse};

const MEDIA_FIELDS: &str =
    "id,caption,media_type,media_url,permalink,thumbnail_url,timestamp,like_count,comments_count";

/// Result of probing a page access token against `GET /me`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenCheck {
    Valid(GraphIdentity),
    /// Expired, revoked, or malformed token.
    Invalid(String),
    /// The token is genuine but lacks the required permissions.
    PermissionDenied(String),
    /// The probe itself failed (network error, unreadable response).
    Unreachable(String),
}

/// Client for the Instagram Graph API.
///
/// Use [`GraphClient::new`] with the configured base URL; tests point it at a
/// wiremock server.
#[derive(Debug, Clone)]
pub struct GraphClient {
    client: Client,
    base_url: Url,
}

impl GraphClient {
    /// Creates a client rooted at `base_url` (e.g. `https://graph.facebook.com/v18.0`).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InstagramError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // A trailing slash keeps the version segment when joining relative paths.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| InstagramError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Probes `GET /me?fields=id,name` and classifies the outcome.
    pub async fn check_token(&self, access_token: &str) -> TokenCheck {
        match self.fetch_identity(access_token).await {
            Ok(identity) => TokenCheck::Valid(identity),
            Err(e) if e.is_permission_denied() => TokenCheck::PermissionDenied(e.to_string()),
            Err(e) if e.is_token_invalid() || e.is_client_error() => {
                TokenCheck::Invalid(e.to_string())
            }
            Err(e) => TokenCheck::Unreachable(e.to_string()),
        }
    }

    /// Fetches the identity behind `access_token`.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Graph`] on a non-2xx response.
    /// - [`InstagramError::Http`] on network failure.
    /// - [`InstagramError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_identity(&self, access_token: &str) -> Result<GraphIdentity, InstagramError> {
        let url = self.build_url("me", &[("fields", "id,name"), ("access_token", access_token)])?;
        self.get_json(url, "me").await
    }

    /// Lists up to `limit` media items for a business account, newest first.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Graph`] on a non-2xx response.
    /// - [`InstagramError::Http`] on network failure.
    /// - [`InstagramError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_media(
        &self,
        account_id: &str,
        access_token: &str,
        limit: usize,
    ) -> Result<Vec<GraphMedia>, InstagramError> {
        let limit = limit.to_string();
        let url = self.build_url(
            &format!("{account_id}/media"),
            &[
                ("fields", MEDIA_FIELDS),
                ("limit", &limit),
                ("access_token", access_token),
            ],
        )?;
        let response: MediaResponse = self
            .get_json(url, &format!("media(account={account_id})"))
            .await?;
        Ok(response.data)
    }

    /// Exchanges app credentials for an app access token.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Graph`] on a non-2xx response.
    /// - [`InstagramError::Http`] on network failure.
    /// - [`InstagramError::Deserialize`] if the body is not the expected shape.
    pub async fn fetch_app_token(
        &self,
        app_id: &str,
        app_secret: &str,
    ) -> Result<String, InstagramError> {
        let url = self.build_url(
            "oauth/access_token",
            &[
                ("client_id", app_id),
                ("client_secret", app_secret),
                ("grant_type", "client_credentials"),
            ],
        )?;
        let token: AppTokenResponse = self.get_json(url, "oauth/access_token").await?;
        Ok(token.access_token)
    }

    /// Joins `path` onto the base URL and appends percent-encoded query pairs.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, InstagramError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| InstagramError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET, decodes Graph error envelopes on non-2xx, and parses the
    /// body as `T` otherwise.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
        context: &str,
    ) -> Result<T, InstagramError> {
        // Access tokens travel in the query string; keep them out of error text.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        if !status.is_success() {
            let envelope = serde_json::from_str::<GraphErrorEnvelope>(&body).ok();
            let code = envelope.as_ref().and_then(|e| e.error.code);
            let message = envelope
                .and_then(|e| e.error.message)
                .unwrap_or_else(|| format!("{context} returned HTTP {status}"));
            return Err(InstagramError::Graph {
                status: status.as_u16(),
                code,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| InstagramError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}
