//! Normalization of Graph API media into the shared [`Post`] shape.

use vibecheck_core::Post;

use crate::types::GraphMedia;

const DEFAULT_MEDIA_TYPE: &str = "IMAGE";

/// Converts one Graph media object into a [`Post`].
///
/// Missing captions become `""`; the image is `media_url`, falling back to
/// `thumbnail_url` (videos). Blank strings are treated as absent.
#[must_use]
pub fn normalize_media(media: GraphMedia) -> Post {
    let image_url = non_blank(media.media_url).or_else(|| non_blank(media.thumbnail_url));

    Post {
        caption: media.caption.unwrap_or_default(),
        permalink: non_blank(media.permalink),
        image_url,
        media_type: non_blank(media.media_type).unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
        timestamp: non_blank(media.timestamp),
        like_count: media.like_count.unwrap_or(0),
        comment_count: media.comments_count.unwrap_or(0),
    }
}

/// Normalizes a media listing, keeping provider order and at most `max_posts`.
#[must_use]
pub fn normalize_media_list(media: Vec<GraphMedia>, max_posts: usize) -> Vec<Post> {
    media
        .into_iter()
        .take(max_posts)
        .map(normalize_media)
        .collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
