//! Content analysis for vibecheck.
//!
//! Sends captions and images to Gemini, turns the replies into structured
//! analysis, a profile summary, and meme cards. Every model call goes through
//! [`fallback::generate_json_or`], so a failed or malformed reply degrades to
//! a fixed local value instead of an error.

pub mod captions;
pub mod error;
pub mod fallback;
pub mod gemini;
pub mod images;
pub mod json;
pub mod memes;
pub mod pipeline;
pub mod synthesis;

pub use captions::analyze_captions;
pub use error::AnalysisError;
pub use gemini::{GeminiClient, Part};
pub use images::analyze_images;
pub use json::parse_model_json;
pub use memes::compose_memes;
pub use pipeline::{run_vibe_check, VibeReport};
pub use synthesis::create_vibe_profile;
