//! Instagram handle extraction from profile links or bare usernames.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HANDLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._]{1,30}$").expect("static handle regex"));

/// Host marker used to locate the handle segment in a profile URL.
const PROFILE_HOST: &str = "instagram.com";

/// First path segments that belong to Instagram itself rather than a profile.
const SYSTEM_PATHS: &[&str] = &[
    "p",
    "reel",
    "reels",
    "tv",
    "explore",
    "stories",
    "accounts",
    "direct",
    "help",
    "about",
    "api",
    "developer",
];

/// A validated Instagram handle.
///
/// Either empty (no usable handle was found) or a fully valid 1–30 character
/// `[A-Za-z0-9._]` identifier. Construction never yields anything in between.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Extracts a handle from a profile URL, an `@handle`, or a bare handle.
    ///
    /// Returns the empty handle for blank input, unparseable URLs, system
    /// paths such as `/p/<id>`, and anything failing the charset/length check.
    #[must_use]
    pub fn extract(raw: &str) -> Self {
        let input = raw.trim();
        if input.is_empty() {
            return Self::default();
        }

        let lowered = input.to_ascii_lowercase();
        if !lowered.starts_with("http://") && !lowered.starts_with("https://") {
            let bare = input.strip_prefix('@').unwrap_or(input);
            return Self::parse(bare).unwrap_or_default();
        }

        extract_from_url(input).unwrap_or_default()
    }

    /// Validates `candidate` as-is, without any URL or `@` handling.
    #[must_use]
    pub fn parse(candidate: &str) -> Option<Self> {
        HANDLE_RE
            .is_match(candidate)
            .then(|| Self(candidate.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Handle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn extract_from_url(url: &str) -> Option<Handle> {
    let without_query = url.split(['?', '#']).next()?;
    let clean = without_query.trim_end_matches('/');

    let parts: Vec<&str> = clean.split('/').collect();
    let host_index = parts
        .iter()
        .position(|part| part.to_ascii_lowercase().contains(PROFILE_HOST))?;
    let candidate = *parts.get(host_index + 1)?;

    if SYSTEM_PATHS
        .iter()
        .any(|system| candidate.eq_ignore_ascii_case(system))
    {
        return None;
    }

    Handle::parse(candidate)
}
