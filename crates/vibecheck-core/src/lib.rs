//! Shared domain types, handle extraction, and configuration for vibecheck.

pub mod app_config;
pub mod config;
pub mod error;
pub mod handle;
pub mod types;

pub use app_config::{AppConfig, Environment, GeminiConfig, InstagramConfig};
pub use config::{build_app_config, load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use handle::Handle;
pub use types::{
    AnalysisResult, AttemptOutcome, ImageTag, MemeCard, Post, ProfileSnapshot, Sentiment,
    SourceAttempt, SourceKind, SourceTag, VibeProfile,
};
