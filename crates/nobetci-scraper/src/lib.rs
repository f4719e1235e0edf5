//! Fetching and extraction for the on-duty pharmacy listing site.
//!
//! [`EczaneScraper`] is the entry point: it fetches a city's listing or a
//! single pharmacy's detail page and returns the parsed result inside a
//! `{status, ...}` envelope. The extractors are exposed separately for callers
//! that already hold the HTML.

pub mod client;
pub mod detail;
pub mod eczane;
pub mod error;
pub mod listing;
mod text;

pub use client::EczaneClient;
pub use detail::parse_detail;
pub use eczane::{EczaneScraper, ScraperSettings};
pub use error::ScraperError;
pub use listing::parse_listing;
