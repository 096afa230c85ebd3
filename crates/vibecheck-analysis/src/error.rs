use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Gemini answered with a non-2xx status.
    #[error("Gemini API error (HTTP {status}): {message}")]
    Gemini { status: u16, message: String },

    #[error("Gemini returned no text candidates")]
    EmptyResponse,

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Model text did not contain the requested JSON value.
    #[error("model output is not valid JSON: {source}")]
    ModelOutput {
        #[source]
        source: serde_json::Error,
    },

    #[error("image download from {url} failed: {reason}")]
    ImageDownload { url: String, reason: String },

    #[error("invalid Gemini base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
