use crate::app_config::{AppConfig, Environment};
use crate::types::Coordinate;
use crate::ConfigError;

pub const DEFAULT_IBGE_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";
pub const DEFAULT_USER_AGENT: &str = "ecoleta/0.1 (collection-points)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Parsing is decoupled from the process environment so it can be tested
/// with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty = |var: &str, raw: String| -> Result<String, ConfigError> {
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(raw)
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_url = non_empty("ECOLETA_API_URL", require("ECOLETA_API_URL")?)?;
    let ibge_url = non_empty("ECOLETA_IBGE_URL", or_default("ECOLETA_IBGE_URL", DEFAULT_IBGE_URL))?;

    let env = parse_environment(&or_default("ECOLETA_ENV", "development"))?;
    let log_level = or_default("ECOLETA_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("ECOLETA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ECOLETA_USER_AGENT", DEFAULT_USER_AGENT);
    let max_retries = parse_u32("ECOLETA_MAX_RETRIES", "0")?;
    let retry_backoff_base_ms = parse_u64("ECOLETA_RETRY_BACKOFF_BASE_MS", "500")?;

    let device_position = match lookup("ECOLETA_DEVICE_POSITION") {
        Ok(raw) => Some(
            raw.parse::<Coordinate>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "ECOLETA_DEVICE_POSITION".to_string(),
                    reason: e.to_string(),
                })?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        api_url,
        ibge_url,
        log_level,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        device_position,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ECOLETA_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
