//! Live profile sources, tried in priority order by [`crate::ProfileFetcher`].
//!
//! A source never returns an error. Upstream failures are logged and recorded
//! as a [`SourceAttempt`] so the caller can move on to the next source.

use vibecheck_core::{AttemptOutcome, Handle, InstagramConfig, Post, SourceAttempt, SourceKind};

use crate::client::{GraphClient, TokenCheck};
use crate::normalize::normalize_media_list;

/// What a single source produced.
#[derive(Debug)]
pub struct SourceResult {
    pub attempt: SourceAttempt,
    /// `Some` only when the source yielded at least one post.
    pub posts: Option<Vec<Post>>,
}

impl SourceResult {
    fn nothing(attempt: SourceAttempt) -> Self {
        Self {
            attempt,
            posts: None,
        }
    }
}

/// Business account source: validate the page token, then list media.
pub async fn fetch_business_posts(
    client: &GraphClient,
    config: &InstagramConfig,
    handle: &Handle,
    max_posts: usize,
) -> SourceResult {
    let kind = SourceKind::BusinessApi;
    let (Some(token), Some(account_id)) = (
        config.page_access_token.as_deref(),
        config.business_account_id.as_deref(),
    ) else {
        return SourceResult::nothing(SourceAttempt::new(kind, AttemptOutcome::SkippedUnconfigured));
    };

    match client.check_token(token).await {
        TokenCheck::Valid(identity) => {
            tracing::debug!(%handle, account = %identity.id, "page access token validated");
        }
        TokenCheck::Invalid(detail) => {
            tracing::warn!(%handle, source = "business_api", error = %detail, "page access token rejected");
            return SourceResult::nothing(
                SourceAttempt::new(kind, AttemptOutcome::CredentialInvalid).with_detail(detail),
            );
        }
        TokenCheck::PermissionDenied(detail) => {
            tracing::warn!(%handle, source = "business_api", error = %detail, "page access token lacks permissions");
            return SourceResult::nothing(
                SourceAttempt::new(kind, AttemptOutcome::PermissionDenied).with_detail(detail),
            );
        }
        TokenCheck::Unreachable(detail) => {
            tracing::warn!(%handle, source = "business_api", error = %detail, "token validation failed");
            return SourceResult::nothing(
                SourceAttempt::new(kind, AttemptOutcome::Failed).with_detail(detail),
            );
        }
    }

    match client.fetch_media(account_id, token, max_posts).await {
        Ok(media) => {
            let posts = normalize_media_list(media, max_posts);
            if posts.is_empty() {
                tracing::info!(%handle, source = "business_api", "business account returned no media");
                SourceResult::nothing(SourceAttempt::new(kind, AttemptOutcome::Empty))
            } else {
                tracing::info!(%handle, count = posts.len(), "fetched business account media");
                SourceResult {
                    attempt: SourceAttempt::new(kind, AttemptOutcome::Used),
                    posts: Some(posts),
                }
            }
        }
        Err(e) => {
            tracing::warn!(%handle, source = "business_api", error = %e, "media listing failed");
            let outcome = if e.is_token_invalid() {
                AttemptOutcome::CredentialInvalid
            } else if e.is_permission_denied() {
                AttemptOutcome::PermissionDenied
            } else {
                AttemptOutcome::Failed
            };
            SourceResult::nothing(SourceAttempt::new(kind, outcome).with_detail(e.to_string()))
        }
    }
}

/// App-token search.
///
/// Exchanges the app credentials for an app token. An app token cannot look
/// up arbitrary handles as business accounts, so a successful exchange still
/// yields no posts and is recorded as [`AttemptOutcome::Unsupported`].
pub async fn search_with_app_token(
    client: &GraphClient,
    config: &InstagramConfig,
    handle: &Handle,
) -> SourceResult {
    let kind = SourceKind::AppTokenSearch;
    let (Some(app_id), Some(app_secret)) = (config.app_id.as_deref(), config.app_secret.as_deref())
    else {
        return SourceResult::nothing(SourceAttempt::new(kind, AttemptOutcome::SkippedUnconfigured));
    };

    match client.fetch_app_token(app_id, app_secret).await {
        Ok(_token) => {
            tracing::info!(%handle, source = "app_token_search", "app token obtained; handle lookup unsupported");
            SourceResult::nothing(
                SourceAttempt::new(kind, AttemptOutcome::Unsupported)
                    .with_detail("app tokens cannot resolve arbitrary handles"),
            )
        }
        Err(e) => {
            tracing::warn!(%handle, source = "app_token_search", error = %e, "app token exchange failed");
            let outcome = if e.is_client_error() {
                AttemptOutcome::CredentialInvalid
            } else {
                AttemptOutcome::Failed
            };
            SourceResult::nothing(SourceAttempt::new(kind, outcome).with_detail(e.to_string()))
        }
    }
}
