//! HTTP lead store backed by reqwest.

use async_trait::async_trait;
use equiprent_types::{EquipmentModel, LeadEnvelope, LeadId, LeadPayload, LeadReceipt, RequestId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, RequestBuilder};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::{LeadStore, StoreError};
use crate::catalog::{CatalogError, EquipmentCatalog};
use crate::config::{ClientConfig, ConfigError};

/// Header carrying the per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-signature-id";

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            StoreError::Timeout
        } else if e.is_decode() {
            StoreError::Malformed(e.to_string())
        } else {
            StoreError::Network(e.to_string())
        }
    }
}

impl From<ConfigError> for StoreError {
    fn from(e: ConfigError) -> Self {
        StoreError::NotConfigured(e.to_string())
    }
}

/// Error body shape: `{ "message": "..." }`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `GET /models` answers either a bare list or `{ "data": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelsBody {
    Wrapped { data: Vec<EquipmentModel> },
    Bare(Vec<EquipmentModel>),
}

/// Lead store speaking to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpLeadStore {
    config: ClientConfig,
    root: String,
    http: reqwest::Client,
}

impl HttpLeadStore {
    /// Create a store for the configured backend.
    ///
    /// Fails with [`ConfigError::MissingApiBase`] when no URL is set.
    pub fn new(config: ClientConfig) -> Result<Self, ConfigError> {
        let root = config.api_root()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-client-type"),
            header_value("X-Client-Type", &config.client_type)?,
        );
        headers.insert(
            HeaderName::from_static("x-platform"),
            header_value("X-Platform", &config.platform)?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent())
            .default_headers(headers)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self { config, root, http })
    }

    /// Base URL all paths are appended to (`{api_base}/api/v1`).
    pub fn root(&self) -> &str {
        &self.root
    }

    /// URL for a path under the API root.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.root, path.trim_start_matches('/'))
    }

    /// Connectivity probe: `GET /models`, returning the round-trip time.
    pub async fn ping(&self) -> Result<Duration, StoreError> {
        let started = Instant::now();
        let response = self.request(Method::GET, "models").send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &body));
        }
        let elapsed = started.elapsed();
        debug!(?elapsed, url = %self.url("models"), "Lead backend reachable");
        Ok(elapsed)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request_id = RequestId::generate();
        self.http
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, request_id.as_str())
    }

    async fn send_lead(
        &self,
        request: RequestBuilder,
        payload: &LeadPayload,
        known: Option<&LeadId>,
    ) -> Result<LeadReceipt, StoreError> {
        let response = request.json(payload).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let error = error_from_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), kind = ?error.kind(), "Lead call rejected");
            return Err(error);
        }

        // Updates may answer with no body at all (e.g. 204).
        if body.trim().is_empty() {
            if let Some(id) = known {
                return Ok(LeadReceipt::new(id.clone()));
            }
        }

        LeadEnvelope::from_json(&body)
            .and_then(|envelope| envelope.into_receipt(known))
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl LeadStore for HttpLeadStore {
    async fn create(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        let receipt = self
            .send_lead(self.request(Method::POST, "lead"), payload, None)
            .await?;
        info!(lead = %receipt.id, step = payload.step, "Lead created");
        Ok(receipt)
    }

    async fn update(&self, id: &LeadId, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        let path = format!("lead/{}", id.as_str());
        let receipt = self
            .send_lead(self.request(Method::PUT, &path), payload, Some(id))
            .await?;
        info!(lead = %receipt.id, step = payload.step, "Lead updated");
        Ok(receipt)
    }

    async fn recreate(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        let request = self
            .request(Method::POST, "lead")
            .timeout(self.config.recreate_timeout);
        let receipt = self.send_lead(request, payload, None).await?;
        info!(lead = %receipt.id, step = payload.step, "Lead recreated");
        Ok(receipt)
    }
}

#[async_trait]
impl EquipmentCatalog for HttpLeadStore {
    async fn models(&self) -> Result<Vec<EquipmentModel>, CatalogError> {
        let response = self
            .request(Method::GET, "models")
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Fetch(format!("http {}", status.as_u16())));
        }
        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Fetch(e.to_string()))?;
        let models = match serde_json::from_str::<ModelsBody>(&body)? {
            ModelsBody::Wrapped { data } => data,
            ModelsBody::Bare(list) => list,
        };
        debug!(count = models.len(), "Fetched equipment models");
        Ok(models)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|_| ConfigError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}

/// Build an HTTP error, preferring the body's `message` over the raw text.
fn error_from_body(status: u16, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string());
    StoreError::Http { status, message }
}
