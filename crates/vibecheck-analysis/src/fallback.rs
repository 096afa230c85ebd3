//! Model calls that degrade to a fixed value instead of failing.

use serde::de::DeserializeOwned;

use crate::gemini::{GeminiClient, Part};
use crate::json::parse_model_json;

/// Calls the model, parses its reply as `T`, and substitutes `default()` on
/// any failure. Failures are logged with the `stage` name and never returned.
pub async fn generate_json_or<T, F>(
    client: &GeminiClient,
    stage: &'static str,
    parts: &[Part],
    default: F,
) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let text = match client.generate(parts).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(stage, error = %e, "model call failed; using fallback");
            return default();
        }
    };

    match parse_model_json(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(stage, error = %e, "model reply unparseable; using fallback");
            default()
        }
    }
}
