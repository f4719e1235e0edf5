//! City code normalization and base-URL templating.

use url::Url;

use crate::ConfigError;

/// Placeholder substituted with the normalized city code.
pub const CITY_PLACEHOLDER: &str = "{city}";

/// Default listing site; each city is served from its own subdomain.
pub const DEFAULT_BASE_URL_TEMPLATE: &str = "https://{city}.eczaneleri.org/";

/// A validated city and the base URL its pages are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    code: String,
    base_url: Url,
}

impl City {
    /// Normalizes `raw` and interpolates it into `template`.
    ///
    /// Codes that are not in the supported-city table are accepted but logged,
    /// since the site occasionally adds subdomains before the table catches up.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyCity`] if `raw` is empty after trimming.
    /// - [`ConfigError::InvalidUrlTemplate`] if `template` does not contain
    ///   exactly one `{city}` placeholder or does not form an absolute URL.
    /// - [`ConfigError::InvalidCity`] if the normalized code is not a single
    ///   hostname label (`[a-z0-9-]+`), or the templated URL does not parse.
    pub fn new(raw: &str, template: &str) -> Result<Self, ConfigError> {
        let code = normalize_city_code(raw);
        if code.is_empty() {
            return Err(ConfigError::EmptyCity);
        }
        if !is_host_label(&code) {
            return Err(ConfigError::InvalidCity {
                city: code,
                reason: "city code may only contain ASCII letters, digits and '-'".to_owned(),
            });
        }

        validate_template(template)?;

        let base_url = Url::parse(&template.replace(CITY_PLACEHOLDER, &code)).map_err(|e| {
            ConfigError::InvalidCity {
                city: code.clone(),
                reason: e.to_string(),
            }
        })?;

        if crate::cities::display_name(&code).is_none() {
            tracing::warn!(city = %code, "city is not in the supported city table");
        }

        Ok(Self { code, base_url })
    }

    /// Normalized city code, e.g. `"istanbul"`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Base URL all listing and detail pages for this city hang off.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Turkish display name from the supported-city table, if known.
    #[must_use]
    pub fn display_name(&self) -> Option<&'static str> {
        crate::cities::display_name(&self.code)
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.code)
    }
}

/// Trims and case-folds a city name into its URL code.
///
/// Turkish letters fold to their ASCII base letter so `"  İSTANBUL "` and
/// `"Kahramanmaraş"` map to `"istanbul"` and `"kahramanmaras"`. Plain
/// `to_lowercase` would turn `İ` into `i` followed by a combining dot.
#[must_use]
pub fn normalize_city_code(raw: &str) -> String {
    let mut code = String::with_capacity(raw.len());
    for c in raw.trim().chars() {
        match c {
            'İ' | 'I' | 'ı' | 'Î' | 'î' => code.push('i'),
            'Ç' | 'ç' => code.push('c'),
            'Ğ' | 'ğ' => code.push('g'),
            'Ö' | 'ö' => code.push('o'),
            'Ş' | 'ş' => code.push('s'),
            'Ü' | 'ü' | 'Û' | 'û' => code.push('u'),
            'Â' | 'â' => code.push('a'),
            '\u{0307}' => {}
            other => code.extend(other.to_lowercase()),
        }
    }
    code
}

fn is_host_label(code: &str) -> bool {
    code.bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn validate_template(template: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrlTemplate {
        template: template.to_owned(),
        reason,
    };

    let placeholders = template.matches(CITY_PLACEHOLDER).count();
    if placeholders != 1 {
        return Err(invalid(format!(
            "expected exactly one {CITY_PLACEHOLDER} placeholder, found {placeholders}"
        )));
    }

    let sample = Url::parse(&template.replace(CITY_PLACEHOLDER, "city"))
        .map_err(|e| invalid(e.to_string()))?;
    if sample.cannot_be_a_base() {
        return Err(invalid("template must produce a hierarchical URL".to_owned()));
    }

    Ok(())
}

#[cfg(test)]
#[path = "city_test.rs"]
mod tests;
