//! Lead store abstraction for EquipRent.
//!
//! This module provides a pluggable port to the remote lead backend
//! (HTTP, mock for testing).
//!
//! # Design
//!
//! The store is async and stateless from the caller's point of view:
//! - `create()` makes a new lead and returns its id
//! - `update()` overwrites an existing lead
//! - `recreate()` replaces a lead the backend no longer knows
//!
//! Failures come back as [`StoreError`]; [`StoreError::kind`] maps them to
//! a [`LeadErrorKind`] so the form logic never looks at status codes or
//! backend wording.
//!
//! # Example
//!
//! ```ignore
//! let store = MockLeadStore::new();
//! let receipt = store.create(&payload).await?;
//! store.update(&receipt.id, &payload).await?;
//! ```

mod http;
mod mock;

pub use http::HttpLeadStore;
pub use mock::{MockLeadStore, StoreCall};

use async_trait::async_trait;
use equiprent_types::{LeadErrorKind, LeadId, LeadPayload, LeadReceipt};
use thiserror::Error;

/// Backend message for a rejected ZIP code.
pub const INVALID_ZIP_MESSAGE: &str = "Invalid zip code";

/// Backend message for an update against a missing lead.
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update lead";

/// Lead store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend answered with a non-success status.
    #[error("http {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// `message` from the error body, or the raw body.
        message: String,
    },

    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The call exceeded its timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend answered 2xx with a body we could not use.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No backend is configured.
    #[error("not configured: {0}")]
    NotConfigured(String),
}

impl StoreError {
    /// Classify the failure.
    ///
    /// Checked in order: rejected ZIP (400 + "Invalid zip code"), rate
    /// limit (429), missing lead (404 or "Failed to update lead"), missing
    /// configuration. Everything else is [`LeadErrorKind::Unknown`].
    pub fn kind(&self) -> LeadErrorKind {
        match self {
            Self::Http { status: 400, message } if message.trim() == INVALID_ZIP_MESSAGE => {
                LeadErrorKind::InvalidZip
            }
            Self::Http { status: 429, .. } => LeadErrorKind::RateLimited,
            Self::Http { status: 404, .. } => LeadErrorKind::NotFound,
            Self::Http { message, .. } if message.trim() == UPDATE_FAILED_MESSAGE => {
                LeadErrorKind::NotFound
            }
            Self::NotConfigured(_) => LeadErrorKind::NotConfigured,
            Self::Http { .. } | Self::Network(_) | Self::Timeout | Self::Malformed(_) => {
                LeadErrorKind::Unknown
            }
        }
    }
}

/// Port to the remote lead backend.
///
/// Implementations handle the underlying mechanism (HTTP, mock, etc).
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Create a lead (`POST /lead`).
    async fn create(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError>;

    /// Update an existing lead (`PUT /lead/{id}`).
    async fn update(&self, id: &LeadId, payload: &LeadPayload) -> Result<LeadReceipt, StoreError>;

    /// Create a replacement for a lead the backend no longer has.
    ///
    /// Same wire call as [`create`](Self::create); adapters may apply a
    /// tighter timeout.
    async fn recreate(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        self.create(payload).await
    }
}
