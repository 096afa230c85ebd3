//! Source priority chain producing exactly one [`ProfileSnapshot`] per call.

use std::sync::Arc;

use vibecheck_core::{
    AppConfig, AttemptOutcome, Handle, ProfileSnapshot, SourceAttempt, SourceKind, SourceTag,
};

use crate::client::GraphClient;
use crate::demo::{demo_snapshot, fallback_snapshot};
use crate::sources::{fetch_business_posts, search_with_app_token};
use crate::status::InstagramStatus;

/// Fetches profile content, trying each configured source in order:
///
/// 1. business account (page token + account id),
/// 2. app-token search (app id + secret),
/// 3. static demo content.
///
/// [`ProfileFetcher::fetch`] never fails; the snapshot's `attempts` record
/// what each source did.
#[derive(Debug, Clone)]
pub struct ProfileFetcher {
    config: Arc<AppConfig>,
    client: Option<GraphClient>,
}

impl ProfileFetcher {
    /// Builds the Graph client from `config`.
    ///
    /// A client that cannot be constructed is logged and left out; requests
    /// then get the fallback snapshot when credentials are configured.
    #[must_use]
    pub fn new(config: Arc<AppConfig>) -> Self {
        let client = match GraphClient::new(
            &config.instagram.graph_base_url,
            config.http_timeout_secs,
            &config.user_agent,
        ) {
            Ok(client) => Some(client),
            Err(e) => {
                tracing::warn!(error = %e, "Instagram Graph client unavailable");
                None
            }
        };
        Self { config, client }
    }

    /// Uses an already-built client, or none.
    #[must_use]
    pub fn with_client(config: Arc<AppConfig>, client: Option<GraphClient>) -> Self {
        Self { config, client }
    }

    pub async fn fetch(&self, handle: &Handle, max_posts: usize) -> ProfileSnapshot {
        if handle.is_empty() {
            tracing::info!("no usable handle supplied");
            return demo_with_attempts(handle, max_posts, Vec::new());
        }

        let instagram = &self.config.instagram;
        let Some(client) = self.client.as_ref() else {
            if instagram.any_configured() {
                tracing::warn!(%handle, "Graph client unavailable; serving fallback profile");
                let mut snapshot = fallback_snapshot(handle, max_posts);
                snapshot
                    .attempts
                    .push(SourceAttempt::new(SourceKind::Fallback, AttemptOutcome::Used));
                return snapshot;
            }
            return demo_with_attempts(handle, max_posts, Vec::new());
        };

        let mut attempts = Vec::with_capacity(3);

        let business = fetch_business_posts(client, instagram, handle, max_posts).await;
        attempts.push(business.attempt);
        if let Some(posts) = business.posts {
            return ProfileSnapshot {
                bio: format!("Instagram Business profile for @{handle}"),
                note: format!("Real data from Instagram Business API for @{handle}"),
                handle: handle.clone(),
                posts,
                source: SourceTag::BusinessApi,
                attempts,
            };
        }

        let search = search_with_app_token(client, instagram, handle).await;
        attempts.push(search.attempt);
        if let Some(posts) = search.posts {
            return ProfileSnapshot {
                bio: format!("Instagram profile for @{handle}"),
                note: format!("Data found via app token search for @{handle}"),
                handle: handle.clone(),
                posts,
                source: SourceTag::BusinessApi,
                attempts,
            };
        }

        demo_with_attempts(handle, max_posts, attempts)
    }

    /// Credential and token diagnostics for the status endpoint.
    pub async fn status(&self) -> InstagramStatus {
        InstagramStatus::probe(&self.config.instagram, self.client.as_ref()).await
    }
}

fn demo_with_attempts(
    handle: &Handle,
    max_posts: usize,
    mut attempts: Vec<SourceAttempt>,
) -> ProfileSnapshot {
    tracing::info!(%handle, "serving demo profile");
    let mut snapshot = demo_snapshot(handle, max_posts);
    attempts.push(SourceAttempt::new(SourceKind::Demo, AttemptOutcome::Used));
    snapshot.attempts = attempts;
    snapshot
}
