//! Detail extractor for a single pharmacy page.
//!
//! ## Observed markup
//!
//! ```html
//! <div class="pull-left">
//!   <strong>Adres :</strong> Bahariye Cad. No:5 Kadıköy<br>
//!   <strong>Telefon :</strong> 02163360000<br>
//! </div>
//! <a id="navigationRoadBtn" lat="40.9876" lng="29.0281">Yol Tarifi</a>
//! <div id="map-canvas"><img src="/harita/ana-eczane.png"></div>
//! ```

use std::sync::LazyLock;

use nobetci_core::PharmacyDetail;
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::listing::selector;
use crate::text::{render_text, text_lines};

/// Directions link; latitude and longitude are appended verbatim.
const MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps?daddr=";

static INFO_BLOCK: LazyLock<Selector> = LazyLock::new(|| selector(".pull-left"));
static NAVIGATE_BUTTON: LazyLock<Selector> = LazyLock::new(|| selector("#navigationRoadBtn"));
static MAP_CANVAS: LazyLock<Selector> = LazyLock::new(|| selector("#map-canvas"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("img"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)telefon *: *([0-9]+)").expect("valid phone regex"));
static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)adres *: *([^\n]*)").expect("valid address regex"));

/// Parses a pharmacy detail page.
///
/// `base_url` is the city site root; relative map-image sources are resolved
/// against it. Every field is optional and a missing element never fails the
/// parse.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] if `html` is empty.
pub fn parse_detail(html: &str, base_url: &Url) -> Result<PharmacyDetail, ScraperError> {
    if html.trim().is_empty() {
        return Err(ScraperError::Parse {
            reason: "detail page is empty".to_owned(),
        });
    }

    let document = Html::parse_document(html);

    let (phone, address) = document
        .select(&INFO_BLOCK)
        .next()
        .map(contact_fields)
        .unwrap_or_default();

    let navigate = document.select(&NAVIGATE_BUTTON).next().and_then(|button| {
        let lat = non_empty_attr(button, "lat")?;
        let lng = non_empty_attr(button, "lng")?;
        Some(format!("{MAPS_DIRECTIONS_URL}{lat},{lng}"))
    });

    let image = document
        .select(&MAP_CANVAS)
        .next()
        .and_then(|canvas| canvas.select(&IMAGE).next())
        .and_then(|img| non_empty_attr(img, "src"))
        .and_then(|src| resolve_image(src, base_url));

    tracing::debug!(
        has_phone = phone.is_some(),
        has_address = address.is_some(),
        has_navigate = navigate.is_some(),
        has_image = image.is_some(),
        "parsed detail page"
    );

    Ok(PharmacyDetail {
        phone,
        address,
        navigate,
        image,
    })
}

/// Pulls the labelled phone and address out of the info block.
///
/// The address runs to the end of its line, i.e. the next `<br>` or block.
fn contact_fields(info: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let text = text_lines(&render_text(info, |_| false)).join("\n");

    let phone = PHONE_RE
        .captures(&text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_owned());

    let address = ADDRESS_RE
        .captures(&text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_owned);

    (phone, address)
}

fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Returns `src` unchanged when it already carries a scheme, otherwise
/// resolves it against `base_url`.
fn resolve_image(src: &str, base_url: &Url) -> Option<String> {
    if Url::parse(src).is_ok() {
        return Some(src.to_owned());
    }
    match base_url.join(src) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            tracing::debug!(src, error = %e, "map image source is not a usable URL");
            None
        }
    }
}

#[cfg(test)]
#[path = "detail_test.rs"]
mod tests;
