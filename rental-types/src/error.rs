//! Error types for EquipRent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while constructing or decoding EquipRent types.
#[derive(Debug, Error)]
pub enum TypesError {
    /// A lead id was empty or whitespace.
    #[error("lead id must not be empty")]
    EmptyLeadId,

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Lead response carried no `data.id`.
    #[error("lead response is missing data.id")]
    MissingLeadId,
}

/// Classification of a failed lead backend call.
///
/// Produced by the remote adapter so the form logic never inspects
/// backend wording or raw status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadErrorKind {
    /// The backend rejected the ZIP code (HTTP 400 "Invalid zip code").
    InvalidZip,
    /// Too many requests (HTTP 429).
    RateLimited,
    /// The referenced lead no longer exists (HTTP 404 or "Failed to update lead").
    NotFound,
    /// The client has no backend URL configured.
    NotConfigured,
    /// Anything else: other statuses, network failures, timeouts, bad bodies.
    Unknown,
}

impl LeadErrorKind {
    /// Whether this failure is worth retrying later without user edits.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimited | Self::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(TypesError::EmptyLeadId.to_string(), "lead id must not be empty");
        assert_eq!(
            TypesError::MissingLeadId.to_string(),
            "lead response is missing data.id"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TypesError>();
    }

    #[test]
    fn transient_kinds() {
        assert!(LeadErrorKind::RateLimited.is_transient());
        assert!(LeadErrorKind::Unknown.is_transient());
        assert!(!LeadErrorKind::InvalidZip.is_transient());
        assert!(!LeadErrorKind::NotFound.is_transient());
        assert!(!LeadErrorKind::NotConfigured.is_transient());
    }
}
