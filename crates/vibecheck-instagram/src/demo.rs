//! Static profile content used when no live source yields data.

use vibecheck_core::{Handle, Post, ProfileSnapshot, SourceTag};

/// Handle substituted when the request carried no usable handle.
pub const DEMO_HANDLE: &str = "demo_user";

const DEMO_BIO: &str = "One minute I'm the main character, next minute I'm an extra";

const DEMO_POSTS: &[(&str, &str, &str)] = &[
    (
        "stuDYING",
        "https://www.instagram.com/p/DO3Nvysid1_/",
        "https://i.pinimg.com/736x/ea/0b/a7/ea0ba70c5d5ec8340b21b8b9806fc281.jpg",
    ),
    (
        "Coffee it is ☕✨",
        "https://www.instagram.com/p/DO3Nm2RiQhG/",
        "https://i.pinimg.com/200x/50/15/4b/50154b6309f5230aeb82503b7b189d99.jpg",
    ),
];

const FALLBACK_POSTS: &[(&str, &str)] = &[
    (
        "Living my best life ✨ #vibes #authentic",
        "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcT5LS7HI-Gysx8lAzhRMDr2Me9s24DY-E9wUQ&s",
    ),
    (
        "Coffee thoughts and weekend moods ☕ #lifestyle",
        "https://upload.wikimedia.org/wikipedia/en/1/11/Disaster_Girl.jpg",
    ),
    (
        "Grateful for these moments 🌟 #blessed",
        "https://i.pinimg.com/564x/0d/eb/89/0deb89754dd50d64d468a41713ae8a82.jpg",
    ),
];

/// The handle to use for demo content: `handle` itself, or [`DEMO_HANDLE`]
/// when it is empty.
#[must_use]
pub fn demo_handle(handle: &Handle) -> Handle {
    if handle.is_empty() {
        Handle::parse(DEMO_HANDLE).unwrap_or_default()
    } else {
        handle.clone()
    }
}

/// Deterministic demo snapshot. Identical for identical inputs.
#[must_use]
pub fn demo_snapshot(handle: &Handle, max_posts: usize) -> ProfileSnapshot {
    let handle = demo_handle(handle);
    let posts = DEMO_POSTS
        .iter()
        .take(max_posts)
        .map(|(caption, permalink, image)| {
            Post::simple(caption, Some((*permalink).to_string()), Some(*image))
        })
        .collect();

    ProfileSnapshot {
        note: format!(
            "Using demo data for @{handle}. Live posts require a connected Instagram Business account."
        ),
        handle,
        bio: DEMO_BIO.to_string(),
        posts,
        source: SourceTag::Demo,
        attempts: Vec::new(),
    }
}

/// Hardcoded snapshot used when the provider client is unavailable.
///
/// Posts are synthetic placeholders substituted wholesale; they carry no
/// permalinks.
#[must_use]
pub fn fallback_snapshot(handle: &Handle, max_posts: usize) -> ProfileSnapshot {
    let handle = demo_handle(handle);
    let posts = FALLBACK_POSTS
        .iter()
        .take(max_posts)
        .map(|(caption, image)| Post::simple(caption, None, Some(*image)))
        .collect();

    ProfileSnapshot {
        bio: format!("Profile analysis for @{handle} (API fallback)"),
        note: format!("Instagram API unavailable; showing placeholder content for @{handle}."),
        handle,
        posts,
        source: SourceTag::Fallback,
        attempts: Vec::new(),
    }
}
