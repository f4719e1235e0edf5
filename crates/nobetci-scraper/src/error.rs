use nobetci_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("link \"{link}\" points outside {base_url}")]
    LinkOutsideSite { link: String, base_url: String },

    #[error("HTML parse error: {reason}")]
    Parse { reason: String },

    /// A listing item without its body element. Aborts the whole listing.
    #[error("missing media-body element in list item {index}")]
    MissingListBody { index: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
