use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_REMOTE_URL: &str = "http://localhost:8000/score";
const DEFAULT_REMOTE_TIMEOUT_MS: &str = "2500";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; only malformed values are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("GUARDIFY_ENV", "development"));

    let bind_addr = or_default("GUARDIFY_BIND_ADDR", "127.0.0.1:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("GUARDIFY_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("GUARDIFY_LOG_LEVEL", "info");

    let remote_enabled = parse_bool(&or_default("GUARDIFY_REMOTE_ENABLED", "true"))
        .ok_or_else(|| invalid("GUARDIFY_REMOTE_ENABLED", "expected true or false".into()))?;

    let remote_url = or_default("GUARDIFY_REMOTE_URL", DEFAULT_REMOTE_URL);
    if remote_url.trim().is_empty() {
        return Err(invalid("GUARDIFY_REMOTE_URL", "must not be empty".into()));
    }

    let remote_timeout_ms = or_default("GUARDIFY_REMOTE_TIMEOUT_MS", DEFAULT_REMOTE_TIMEOUT_MS)
        .parse::<u64>()
        .map_err(|e| invalid("GUARDIFY_REMOTE_TIMEOUT_MS", e.to_string()))?;
    if remote_timeout_ms == 0 {
        return Err(invalid(
            "GUARDIFY_REMOTE_TIMEOUT_MS",
            "must be greater than zero".into(),
        ));
    }

    let user_agent = or_default("GUARDIFY_USER_AGENT", "guardify/0.1 (listing-risk)");

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        remote_enabled,
        remote_url,
        remote_timeout_ms,
        user_agent,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
