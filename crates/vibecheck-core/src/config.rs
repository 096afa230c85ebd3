use crate::app_config::{AppConfig, Environment, GeminiConfig, InstagramConfig};
use crate::ConfigError;

const DEFAULT_CORS_ORIGINS: &str =
    "http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000,http://127.0.0.1:3000";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so callers (and tests) can supply a
/// plain `HashMap` lookup. Blank credential values are treated as unset.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unparseable values.
pub fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("VIBECHECK_ENV", "development"))?;

    let bind_addr = or_default("VIBECHECK_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidEnvVar {
            var: "VIBECHECK_BIND_ADDR".to_string(),
            reason: e.to_string(),
        })?;
    let log_level = or_default("VIBECHECK_LOG_LEVEL", "info");
    let cors_origins = or_default("VIBECHECK_CORS_ORIGINS", DEFAULT_CORS_ORIGINS)
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    let http_timeout_secs = parse_u64("VIBECHECK_HTTP_TIMEOUT_SECS", "30")?;
    if http_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "VIBECHECK_HTTP_TIMEOUT_SECS".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    let user_agent = or_default("VIBECHECK_USER_AGENT", "vibecheck/0.1");

    let instagram = InstagramConfig {
        app_id: optional("INSTAGRAM_APP_ID"),
        app_secret: optional("INSTAGRAM_APP_SECRET"),
        page_access_token: optional("INSTAGRAM_PAGE_ACCESS_TOKEN"),
        business_account_id: optional("INSTAGRAM_BUSINESS_ACCOUNT_ID"),
        graph_base_url: or_default(
            "INSTAGRAM_GRAPH_BASE_URL",
            "https://graph.facebook.com/v18.0",
        ),
    };

    let gemini = GeminiConfig {
        api_key: optional("GEMINI_API_KEY"),
        model: or_default("GEMINI_MODEL", "gemini-2.0-flash"),
        base_url: or_default(
            "GEMINI_BASE_URL",
            "https://generativelanguage.googleapis.com",
        ),
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cors_origins,
        http_timeout_secs,
        user_agent,
        instagram,
        gemini,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "VIBECHECK_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
