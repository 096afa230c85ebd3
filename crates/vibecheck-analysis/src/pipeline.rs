//! Vibe check orchestration: fetch, analyze, summarize, compose.

use serde::Serialize;
use vibecheck_core::{AnalysisResult, Handle, ImageTag, MemeCard, ProfileSnapshot, VibeProfile};
use vibecheck_instagram::ProfileFetcher;

use crate::captions::analyze_captions;
use crate::gemini::GeminiClient;
use crate::images::analyze_images;
use crate::memes::compose_memes;
use crate::synthesis::create_vibe_profile;

const SUCCESS_MESSAGE: &str = "Analysis complete using Instagram API and AI services!";

/// Full result of one vibe check.
#[derive(Debug, Clone, Serialize)]
pub struct VibeReport {
    pub ok: bool,
    pub scrape: ProfileSnapshot,
    pub text_analysis: AnalysisResult,
    pub image_analysis: Vec<ImageTag>,
    pub vibe_profile: VibeProfile,
    pub memes: Vec<MemeCard>,
    pub message: String,
}

/// Run the full vibe check for one handle.
///
/// 1. Fetch a profile snapshot (source chain, never fails).
/// 2. Analyze captions.
/// 3. Tag images.
/// 4. Synthesize the profile summary.
/// 5. Compose memes from image-bearing posts.
///
/// Stages run sequentially. Every model failure is absorbed into that
/// stage's fallback value, so this always produces a report.
pub async fn run_vibe_check(
    fetcher: &ProfileFetcher,
    gemini: &GeminiClient,
    handle: &Handle,
    max_posts: usize,
) -> VibeReport {
    let scrape = fetcher.fetch(handle, max_posts).await;
    tracing::info!(
        handle = %scrape.handle,
        source = ?scrape.source,
        posts = scrape.posts.len(),
        "profile snapshot ready"
    );

    let captions: Vec<&str> = scrape.captions().collect();
    let text_analysis = analyze_captions(gemini, &captions).await;

    let image_urls: Vec<&str> = scrape.image_urls().collect();
    let image_analysis = analyze_images(gemini, &image_urls).await;

    let vibe_profile = create_vibe_profile(gemini, &text_analysis, &scrape.bio, &scrape.handle).await;
    let memes = compose_memes(gemini, &text_analysis, &scrape.posts).await;

    tracing::info!(
        handle = %scrape.handle,
        images = image_analysis.len(),
        memes = memes.len(),
        "vibe check complete"
    );

    VibeReport {
        ok: true,
        scrape,
        text_analysis,
        image_analysis,
        vibe_profile,
        memes,
        message: SUCCESS_MESSAGE.to_string(),
    }
}
