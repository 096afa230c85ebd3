use std::net::SocketAddr;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Instagram Graph API credentials. Every credential is optional; the source
/// chain decides which strategies are attempted based on what is present.
#[derive(Clone, Default)]
pub struct InstagramConfig {
    pub app_id: Option<String>,
    pub app_secret: Option<String>,
    pub page_access_token: Option<String>,
    pub business_account_id: Option<String>,
    pub graph_base_url: String,
}

impl InstagramConfig {
    /// Page access token and business account id are both present.
    #[must_use]
    pub fn has_business_credentials(&self) -> bool {
        self.page_access_token.is_some() && self.business_account_id.is_some()
    }

    /// App id and app secret are both present.
    #[must_use]
    pub fn has_app_credentials(&self) -> bool {
        self.app_id.is_some() && self.app_secret.is_some()
    }

    #[must_use]
    pub fn any_configured(&self) -> bool {
        self.has_business_credentials() || self.has_app_credentials()
    }

    #[must_use]
    pub fn fully_configured(&self) -> bool {
        self.has_business_credentials() && self.has_app_credentials()
    }
}

impl std::fmt::Debug for InstagramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstagramConfig")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[redacted]"))
            .field(
                "page_access_token",
                &self.page_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("business_account_id", &self.business_account_id)
            .field("graph_base_url", &self.graph_base_url)
            .finish()
    }
}

/// Generative-language (Gemini) settings.
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cors_origins: Vec<String>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    pub instagram: InstagramConfig,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    /// Returns the Gemini API key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when `GEMINI_API_KEY` is unset.
    pub fn gemini_api_key(&self) -> Result<&str, ConfigError> {
        self.gemini
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))
    }
}
