use encoding_rs::Encoding;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Raw city name as configured; normalized when the scraper is built.
    pub city: String,
    pub base_url_template: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Encoding assumed for pages that declare no charset and are not UTF-8.
    pub fallback_encoding: &'static Encoding,
}
