//! Uniform `{status, ...}` result envelope returned by every public operation.
//!
//! Success payloads are flattened next to the tag:
//!
//! ```json
//! {"status": "success", "info": {"date": "...", "count": 1}, "list": [...]}
//! {"status": "error", "message": "unexpected HTTP status 503 from ..."}
//! ```

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::pharmacy::{Listing, PharmacyDetail};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Error { message: String },
}

/// Envelope returned by the listing operation.
pub type ListingResult = Envelope<Listing>;

/// Envelope returned by the detail operation.
pub type DetailResult = Envelope<DetailPayload>;

/// Success payload of a [`DetailResult`]; nests the record under `detail`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub detail: PharmacyDetail,
}

impl From<PharmacyDetail> for DetailPayload {
    fn from(detail: PharmacyDetail) -> Self {
        Self { detail }
    }
}

impl<T> Envelope<T> {
    /// Wraps an operation outcome. This is the only place error envelopes are
    /// built; the failure is logged before its message is captured.
    pub fn from_result<P, E>(result: Result<P, E>) -> Self
    where
        P: Into<T>,
        E: Display,
    {
        match result {
            Ok(payload) => Self::Success(payload.into()),
            Err(e) => {
                let message = e.to_string();
                tracing::warn!(error = %message, "operation failed; returning error envelope");
                Self::Error { message }
            }
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Failure message, if this is an error envelope.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Error { message } => Some(message),
        }
    }

    /// Success payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&T> {
        match self {
            Self::Success(payload) => Some(payload),
            Self::Error { .. } => None,
        }
    }
}
