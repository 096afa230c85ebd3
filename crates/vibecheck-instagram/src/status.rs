//! Diagnostic report on Instagram credential configuration and token health.

use serde::Serialize;
use vibecheck_core::InstagramConfig;

use crate::client::{GraphClient, TokenCheck};
use crate::types::GraphIdentity;

const SUGGEST_NEW_TOKEN: &str = "Generate a new Page Access Token from Facebook Graph API Explorer";
const SUGGEST_PERMISSIONS: &str =
    "Ensure token has pages_read_engagement and instagram_basic permissions";
const SUGGEST_ADD_TOKEN: &str = "Add INSTAGRAM_PAGE_ACCESS_TOKEN to .env file";
const SUGGEST_CONNECTIVITY: &str = "Check internet connection and token format";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialFlags {
    pub app_id_configured: bool,
    pub app_secret_configured: bool,
    pub page_access_token_configured: bool,
    pub business_account_id_configured: bool,
}

impl CredentialFlags {
    #[must_use]
    pub fn from_config(config: &InstagramConfig) -> Self {
        Self {
            app_id_configured: config.app_id.is_some(),
            app_secret_configured: config.app_secret.is_some(),
            page_access_token_configured: config.page_access_token.is_some(),
            business_account_id_configured: config.business_account_id.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_info: Option<GraphIdentity>,
}

impl TokenValidation {
    fn failed(error: impl Into<String>, suggestion: &str) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            suggestion: Some(suggestion.to_string()),
            message: None,
            token_info: None,
        }
    }

    fn from_check(check: TokenCheck) -> Self {
        match check {
            TokenCheck::Valid(identity) => Self {
                valid: true,
                error: None,
                suggestion: None,
                message: Some("Page access token is valid".to_string()),
                token_info: Some(identity),
            },
            TokenCheck::Invalid(e) => Self::failed(e, SUGGEST_NEW_TOKEN),
            TokenCheck::PermissionDenied(e) => Self::failed(e, SUGGEST_PERMISSIONS),
            TokenCheck::Unreachable(e) => Self::failed(e, SUGGEST_CONNECTIVITY),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverallStatus {
    pub ready: bool,
    pub message: String,
}

/// Body of `GET /instagram-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstagramStatus {
    pub instagram_business_api: CredentialFlags,
    pub token_validation: TokenValidation,
    pub overall_status: OverallStatus,
}

impl InstagramStatus {
    /// Reports configuration flags and, when a page token is configured,
    /// probes it against the Graph API. Ready means all four credentials are
    /// set and the token validates.
    pub async fn probe(config: &InstagramConfig, client: Option<&GraphClient>) -> Self {
        let token_validation = match (config.page_access_token.as_deref(), client) {
            (None, _) => TokenValidation::failed("No page access token configured", SUGGEST_ADD_TOKEN),
            (Some(_), None) => {
                TokenValidation::failed("Graph API client unavailable", SUGGEST_CONNECTIVITY)
            }
            (Some(token), Some(client)) => TokenValidation::from_check(client.check_token(token).await),
        };

        let ready = config.fully_configured() && token_validation.valid;
        let message = if ready {
            "Instagram Business API ready"
        } else {
            "Configuration incomplete or token invalid"
        };

        Self {
            instagram_business_api: CredentialFlags::from_config(config),
            token_validation,
            overall_status: OverallStatus {
                ready,
                message: message.to_string(),
            },
        }
    }
}
