//! Shared domain types and configuration for the on-duty pharmacy crates.
//!
//! Holds the pharmacy records and result envelopes returned to callers, the
//! city normalization and base-URL templating rules, the supported-city table,
//! and environment-driven application configuration.

pub mod app_config;
pub mod cities;
pub mod city;
pub mod config;
pub mod envelope;
pub mod pharmacy;

use thiserror::Error;

pub use app_config::AppConfig;
pub use cities::{display_name, supported_cities, SupportedCities};
pub use city::{normalize_city_code, City, DEFAULT_BASE_URL_TEMPLATE};
pub use config::{load_app_config, load_app_config_from_env};
pub use envelope::{DetailPayload, DetailResult, Envelope, ListingResult};
pub use pharmacy::{Listing, ListingInfo, PharmacyDetail, PharmacySummary};

/// Construction-time configuration failures. These are never wrapped into a
/// result envelope.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("city name cannot be empty")]
    EmptyCity,

    #[error("invalid city \"{city}\": {reason}")]
    InvalidCity { city: String, reason: String },

    #[error("invalid base URL template \"{template}\": {reason}")]
    InvalidUrlTemplate { template: String, reason: String },

    #[error("request timeout must be at least one second")]
    ZeroTimeout,

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
