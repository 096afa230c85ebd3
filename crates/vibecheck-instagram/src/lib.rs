//! Instagram profile retrieval for vibecheck.
//!
//! [`ProfileFetcher`] walks a priority chain of sources (Graph API business
//! account, app-token search, static demo content) and always returns a
//! [`vibecheck_core::ProfileSnapshot`]. [`GraphClient`] is the underlying
//! Graph API client.

pub mod client;
pub mod demo;
pub mod error;
pub mod fetcher;
pub mod normalize;
pub mod sources;
pub mod status;
pub mod types;

pub use client::{GraphClient, TokenCheck};
pub use demo::{demo_snapshot, fallback_snapshot, DEMO_HANDLE};
pub use error::InstagramError;
pub use fetcher::ProfileFetcher;
pub use normalize::{normalize_media, normalize_media_list};
pub use status::{CredentialFlags, InstagramStatus, OverallStatus, TokenValidation};
pub use types::{GraphIdentity, GraphMedia};
