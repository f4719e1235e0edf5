use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.city, "istanbul");
    assert_eq!(cfg.base_url_template, "https://{city}.eczaneleri.org/");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.fallback_encoding, encoding_rs::WINDOWS_1254);
}

#[test]
fn city_override() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_CITY", "izmir");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.city, "izmir");
}

#[test]
fn base_url_template_override() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_BASE_URL_TEMPLATE", "http://localhost:9000/{city}/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url_template, "http://localhost:9000/{city}/");
}

#[test]
fn request_timeout_secs_override() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NOBETCI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(NOBETCI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NOBETCI_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(NOBETCI_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn user_agent_override() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn fallback_encoding_accepts_whatwg_labels() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_FALLBACK_ENCODING", "ISO-8859-9");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    // WHATWG maps latin5 onto windows-1254.
    assert_eq!(cfg.fallback_encoding, encoding_rs::WINDOWS_1254);
}

#[test]
fn fallback_encoding_unknown_label() {
    let mut map = HashMap::new();
    map.insert("NOBETCI_FALLBACK_ENCODING", "klingon-8");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "NOBETCI_FALLBACK_ENCODING"),
        "expected InvalidEnvVar(NOBETCI_FALLBACK_ENCODING), got: {result:?}"
    );
}
