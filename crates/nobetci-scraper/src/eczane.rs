//! City-bound scraper that ties the fetcher and both extractors together and
//! wraps every outcome in a result envelope.

use encoding_rs::Encoding;
use nobetci_core::config::DEFAULT_USER_AGENT;
use nobetci_core::{
    AppConfig, City, ConfigError, DetailResult, Envelope, Listing, ListingResult, PharmacyDetail,
    DEFAULT_BASE_URL_TEMPLATE,
};
use reqwest::Url;

use crate::client::EczaneClient;
use crate::detail::parse_detail;
use crate::error::ScraperError;
use crate::listing::parse_listing;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Construction parameters for [`EczaneScraper`].
#[derive(Debug, Clone)]
pub struct ScraperSettings {
    /// URL template containing exactly one `{city}` placeholder.
    pub base_url_template: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fallback_encoding: &'static Encoding,
}

impl ScraperSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url_template: config.base_url_template.clone(),
            request_timeout_secs: config.request_timeout_secs,
            user_agent: config.user_agent.clone(),
            fallback_encoding: config.fallback_encoding,
        }
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            base_url_template: DEFAULT_BASE_URL_TEMPLATE.to_owned(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            fallback_encoding: encoding_rs::WINDOWS_1254,
        }
    }
}

/// On-duty pharmacy scraper for a single city.
///
/// Holds no mutable state, so one instance can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct EczaneScraper {
    client: EczaneClient,
    city: City,
}

impl EczaneScraper {
    /// Validates `city` against the settings' URL template and builds the
    /// HTTP client.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Config`] if the city is empty or not a hostname
    ///   label, the template is unusable, or the timeout is zero.
    /// - [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn new(city: &str, settings: &ScraperSettings) -> Result<Self, ScraperError> {
        let city = City::new(city, &settings.base_url_template)?;
        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout.into());
        }
        let client = EczaneClient::new(
            settings.request_timeout_secs,
            &settings.user_agent,
            settings.fallback_encoding,
        )?;
        tracing::debug!(city = %city, base_url = %city.base_url(), "scraper ready");
        Ok(Self { client, city })
    }

    #[must_use]
    pub fn city(&self) -> &City {
        &self.city
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.city.base_url()
    }

    /// Ordered `(code, display name)` pairs of every supported city.
    #[must_use]
    pub fn supported_cities() -> &'static [(&'static str, &'static str)] {
        nobetci_core::supported_cities()
    }

    /// Fetches today's on-duty listing for the city.
    ///
    /// Each record's `link` is `detail_link_prefix` followed by the page's
    /// relative detail link. Fetch and structure failures become an error
    /// envelope.
    pub async fn list_pharmacies(&self, detail_link_prefix: &str) -> ListingResult {
        tracing::info!(city = %self.city, "listing on-duty pharmacies");
        Envelope::from_result(self.fetch_listing(detail_link_prefix).await)
    }

    /// Fetches one pharmacy's detail page.
    ///
    /// `link` is resolved against the city base URL with URL-reference rules:
    /// a relative link keeps the base path, while a link starting with `/`
    /// resolves against the site origin and drops any path segment of the
    /// template. Links that resolve to another origin are rejected without a
    /// request.
    pub async fn pharmacy_detail(&self, link: &str) -> DetailResult {
        tracing::info!(city = %self.city, link, "fetching pharmacy detail");
        Envelope::from_result(self.fetch_detail(link).await)
    }

    async fn fetch_listing(&self, detail_link_prefix: &str) -> Result<Listing, ScraperError> {
        let html = self.client.fetch_html(self.city.base_url()).await?;
        let listing = parse_listing(&html, detail_link_prefix)?;
        tracing::debug!(city = %self.city, count = listing.info.count, "listing parsed");
        Ok(listing)
    }

    async fn fetch_detail(&self, link: &str) -> Result<PharmacyDetail, ScraperError> {
        let url = self.detail_url(link)?;
        let html = self.client.fetch_html(&url).await?;
        parse_detail(&html, self.city.base_url())
    }

    fn detail_url(&self, link: &str) -> Result<Url, ScraperError> {
        let link = link.trim();
        if link.is_empty() {
            return Err(ScraperError::InvalidUrl {
                url: String::new(),
                reason: "detail link is empty".to_owned(),
            });
        }

        let base = self.city.base_url();
        let url = base.join(link).map_err(|e| ScraperError::InvalidUrl {
            url: link.to_owned(),
            reason: e.to_string(),
        })?;

        if url.origin() != base.origin() {
            return Err(ScraperError::LinkOutsideSite {
                link: link.to_owned(),
                base_url: base.to_string(),
            });
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scraper() -> EczaneScraper {
        let settings = ScraperSettings {
            base_url_template: "https://{city}.example.org/".to_owned(),
            ..ScraperSettings::default()
        };
        EczaneScraper::new("  İSTANBUL ", &settings).unwrap()
    }

    #[test]
    fn city_is_normalized_into_base_url() {
        let scraper = scraper();
        assert_eq!(scraper.city().code(), "istanbul");
        assert_eq!(scraper.base_url().as_str(), "https://istanbul.example.org/");
    }

    #[test]
    fn empty_city_is_a_config_error() {
        let result = EczaneScraper::new("   ", &ScraperSettings::default());
        assert!(
            matches!(
                result,
                Err(ScraperError::Config(nobetci_core::ConfigError::EmptyCity))
            ),
            "got: {result:?}"
        );
    }

    #[test]
    fn detail_links_resolve_against_city_root() {
        let scraper = scraper();
        assert_eq!(
            scraper.detail_url("/eczane/ana-eczane").unwrap().as_str(),
            "https://istanbul.example.org/eczane/ana-eczane"
        );
        assert_eq!(
            scraper.detail_url("eczane/moda").unwrap().as_str(),
            "https://istanbul.example.org/eczane/moda"
        );
    }

    #[test]
    fn absolute_link_on_same_site_is_accepted() {
        let url = scraper()
            .detail_url("https://istanbul.example.org/eczane/x")
            .unwrap();
        assert_eq!(url.path(), "/eczane/x");
    }

    #[test]
    fn links_to_other_sites_are_rejected() {
        let scraper = scraper();
        for link in [
            "https://evil.example.net/eczane/x",
            "//ankara.example.org/eczane/x",
            "http://istanbul.example.org/eczane/x",
        ] {
            let err = scraper.detail_url(link).unwrap_err();
            assert!(
                matches!(err, ScraperError::LinkOutsideSite { .. }),
                "{link}: got {err:?}"
            );
        }
    }

    #[test]
    fn leading_slash_link_resolves_against_origin_for_path_templates() {
        let settings = ScraperSettings {
            base_url_template: "http://127.0.0.1:8080/{city}/".to_owned(),
            ..ScraperSettings::default()
        };
        let scraper = EczaneScraper::new("bursa", &settings).unwrap();

        assert_eq!(
            scraper.detail_url("/eczane/x").unwrap().as_str(),
            "http://127.0.0.1:8080/eczane/x"
        );
        assert_eq!(
            scraper.detail_url("eczane/x").unwrap().as_str(),
            "http://127.0.0.1:8080/bursa/eczane/x"
        );
    }

    #[test]
    fn zero_timeout_is_a_config_error() {
        let settings = ScraperSettings {
            request_timeout_secs: 0,
            ..ScraperSettings::default()
        };
        let result = EczaneScraper::new("istanbul", &settings);
        assert!(
            matches!(
                result,
                Err(ScraperError::Config(nobetci_core::ConfigError::ZeroTimeout))
            ),
            "got: {result:?}"
        );
    }

    #[test]
    fn empty_link_is_invalid() {
        let err = scraper().detail_url("  ").unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }), "got: {err:?}");
    }

    #[test]
    fn settings_follow_app_config() {
        let config = AppConfig {
            city: "izmir".to_owned(),
            base_url_template: "http://localhost:8080/{city}/".to_owned(),
            log_level: "debug".to_owned(),
            request_timeout_secs: 5,
            user_agent: "test-agent".to_owned(),
            fallback_encoding: encoding_rs::ISO_8859_2,
        };
        let settings = ScraperSettings::from_app_config(&config);
        assert_eq!(settings.base_url_template, "http://localhost:8080/{city}/");
        assert_eq!(settings.request_timeout_secs, 5);
        assert_eq!(settings.user_agent, "test-agent");
        assert_eq!(settings.fallback_encoding, encoding_rs::ISO_8859_2);
    }

    #[test]
    fn scraper_can_be_shared_across_tasks() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EczaneScraper>();
    }

    #[test]
    fn supported_cities_lists_all_provinces() {
        let cities = EczaneScraper::supported_cities();
        assert_eq!(cities.len(), 81);
        assert_eq!(cities[0], ("adana", "Adana"));
    }
}
