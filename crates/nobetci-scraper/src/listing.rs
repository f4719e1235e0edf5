//! List extractor for a city's on-duty listing page.
//!
//! ## Observed markup
//!
//! ```html
//! <div class="tab-pane active">
//!   <div class="alert alert-info">16 Ekim 2026 Cuma nöbetçi eczaneler</div>
//!   <ul class="media-list">
//!     <li class="media">
//!       <div class="media-body">
//!         <a href="/eczane/ana-eczanesi"><h4 class="media-heading">
//!           ANA ECZANESİ <span class="label">Kadıköy</span>
//!         </h4></a>
//!         Bahariye Cad. No:5 Kadıköy
//!       </div>
//!     </li>
//!   </ul>
//! </div>
//! ```
//!
//! The district labels live inside the name heading and are often repeated in
//! the free-text address, so both have to be disentangled.

use std::sync::LazyLock;

use nobetci_core::{Listing, PharmacySummary};
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::text::{collapse_whitespace, inline_text, render_text};

static BANNER: LazyLock<Selector> = LazyLock::new(|| selector(".active .alert"));
static LIST_ITEMS: LazyLock<Selector> = LazyLock::new(|| selector(".active .media-list > li"));
static ITEM_BODY: LazyLock<Selector> = LazyLock::new(|| selector(".media-body"));
static HEADING: LazyLock<Selector> = LazyLock::new(|| selector("a h4"));
static FIRST_LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector")
}

/// Parses a listing page into a [`Listing`].
///
/// Each record's `link` is `detail_link_prefix` followed by the item's
/// relative `href`. A missing banner, list container, heading, or `href`
/// degrades to empty values; a list item without a `.media-body` aborts the
/// whole page.
///
/// # Errors
///
/// - [`ScraperError::Parse`] if `html` is empty.
/// - [`ScraperError::MissingListBody`] if any list item lacks its body; no
///   partial list is returned.
pub fn parse_listing(html: &str, detail_link_prefix: &str) -> Result<Listing, ScraperError> {
    if html.trim().is_empty() {
        return Err(ScraperError::Parse {
            reason: "listing page is empty".to_owned(),
        });
    }

    let document = Html::parse_document(html);

    let date = document
        .select(&BANNER)
        .next()
        .map(inline_text)
        .unwrap_or_default();

    let list = document
        .select(&LIST_ITEMS)
        .enumerate()
        .map(|(index, item)| parse_item(index, item, detail_link_prefix))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = list.len(), "parsed listing page");

    Ok(Listing::new(date, list))
}

fn parse_item(
    index: usize,
    item: ElementRef<'_>,
    detail_link_prefix: &str,
) -> Result<PharmacySummary, ScraperError> {
    let body = item
        .select(&ITEM_BODY)
        .next()
        .ok_or(ScraperError::MissingListBody { index })?;

    let heading = body.select(&HEADING).next();
    let (name, districts) = heading.map(split_name).unwrap_or_default();

    let href = body
        .select(&FIRST_LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
        .unwrap_or_default();

    // The heading text is the name; everything else in the body is address.
    let heading_id = heading.map(|h| h.id());
    let raw_address = render_text(body, |el| Some(el.id()) == heading_id);
    let address = strip_districts(&raw_address, &districts);

    Ok(PharmacySummary {
        name,
        districts,
        address,
        link: format!("{detail_link_prefix}{href}"),
    })
}

/// Splits a name heading into the bare name and the `<span>` district tags
/// embedded in it. Nested spans count once, as part of their outermost span.
fn split_name(heading: ElementRef<'_>) -> (String, Vec<String>) {
    let mut districts = Vec::new();
    let rendered = render_text(heading, |el| {
        if el.value().name() != "span" {
            return false;
        }
        let district = inline_text(el);
        if !district.is_empty() {
            districts.push(district);
        }
        true
    });
    (collapse_whitespace(&rendered), districts)
}

/// Removes every district from `raw` and collapses whitespace.
///
/// Removal repeats until no district survives as a substring, since cutting
/// one occurrence (or collapsing the gap it leaves) can splice a new one
/// together.
fn strip_districts(raw: &str, districts: &[String]) -> String {
    let mut address = collapse_whitespace(raw);
    while let Some(district) = districts.iter().find(|d| address.contains(d.as_str())) {
        address = collapse_whitespace(&address.replace(district.as_str(), ""));
    }
    address
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
