use encoding_rs::Encoding;

use crate::app_config::AppConfig;
use crate::city::DEFAULT_BASE_URL_TEMPLATE;
use crate::ConfigError;

pub const DEFAULT_USER_AGENT: &str = "nobetci-eczane/0.1 (on-duty-pharmacy-lookup)";

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
/// Every variable has a default, so an empty environment yields a usable
/// configuration for Istanbul.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let city = or_default("NOBETCI_CITY", "istanbul");
    let base_url_template = or_default("NOBETCI_BASE_URL_TEMPLATE", DEFAULT_BASE_URL_TEMPLATE);
    let log_level = or_default("NOBETCI_LOG_LEVEL", "info");
    let user_agent = or_default("NOBETCI_USER_AGENT", DEFAULT_USER_AGENT);

    let request_timeout_secs = parse_u64("NOBETCI_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "NOBETCI_REQUEST_TIMEOUT_SECS".to_string(),
            reason: "timeout must be at least one second".to_string(),
        });
    }

    let fallback_encoding =
        parse_encoding(&or_default("NOBETCI_FALLBACK_ENCODING", "windows-1254"))?;

    Ok(AppConfig {
        city,
        base_url_template,
        log_level,
        request_timeout_secs,
        user_agent,
        fallback_encoding,
    })
}

/// Resolve a WHATWG encoding label such as `"iso-8859-9"` or `"utf-8"`.
fn parse_encoding(label: &str) -> Result<&'static Encoding, ConfigError> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "NOBETCI_FALLBACK_ENCODING".to_string(),
        reason: format!("unknown encoding label \"{label}\""),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
