//! Pharmacy records extracted from listing and detail pages.

use serde::{Deserialize, Serialize};

/// One row of a city's on-duty listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacySummary {
    /// Pharmacy name with district tags removed.
    pub name: String,

    /// District / neighbourhood tags attached to the name, in page order.
    pub districts: Vec<String>,

    /// Free-text address. Never contains any entry of `districts`.
    pub address: String,

    /// Caller-supplied prefix followed by the page's relative detail link.
    pub link: String,
}

/// Contact and location data from a single pharmacy's detail page.
///
/// Every field is optional; a missing value serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PharmacyDetail {
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Directions link; set only when both coordinates were present.
    pub navigate: Option<String>,
    /// Absolute URL of the static map image.
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingInfo {
    /// Banner text announcing the duty date, empty when the page has none.
    pub date: String,
    pub count: usize,
}

/// Successful listing payload. `info.count` always equals `list.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub info: ListingInfo,
    pub list: Vec<PharmacySummary>,
}

impl Listing {
    #[must_use]
    pub fn new(date: String, list: Vec<PharmacySummary>) -> Self {
        Self {
            info: ListingInfo {
                date,
                count: list.len(),
            },
            list,
        }
    }
}
