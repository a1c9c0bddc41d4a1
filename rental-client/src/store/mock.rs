//! Mock lead store for testing.
//!
//! Records every call and replays queued outcomes. With nothing queued it
//! behaves like a healthy backend.

use super::{LeadStore, StoreError};
use async_trait::async_trait;
use equiprent_types::{LeadId, LeadPayload, LeadReceipt, NearestLocation};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A call the mock received.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    /// `create(payload)`.
    Create(LeadPayload),
    /// `update(id, payload)`.
    Update(LeadId, LeadPayload),
    /// `recreate(payload)`.
    Recreate(LeadPayload),
}

impl StoreCall {
    /// The payload sent with the call.
    pub fn payload(&self) -> &LeadPayload {
        match self {
            Self::Create(p) | Self::Recreate(p) | Self::Update(_, p) => p,
        }
    }
}

/// Mock lead store for testing.
///
/// Allows queueing outcomes and capturing calls for verification.
#[derive(Debug, Default)]
pub struct MockLeadStore {
    inner: Arc<Mutex<MockLeadStoreInner>>,
}

#[derive(Debug, Default)]
struct MockLeadStoreInner {
    calls: Vec<StoreCall>,
    outcomes: VecDeque<Result<LeadReceipt, StoreError>>,
}

impl MockLeadStore {
    /// Create a new mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a success returning the given lead id.
    pub fn queue_success(&self, id: &str) {
        let receipt = LeadId::new(id).map(LeadReceipt::new);
        let mut inner = self.inner.lock().unwrap();
        inner
            .outcomes
            .push_back(receipt.map_err(|e| StoreError::Malformed(e.to_string())));
    }

    /// Queue a full receipt.
    pub fn queue_receipt(&self, receipt: LeadReceipt) {
        let mut inner = self.inner.lock().unwrap();
        inner.outcomes.push_back(Ok(receipt));
    }

    /// Queue a failure for the next call.
    pub fn queue_error(&self, error: StoreError) {
        let mut inner = self.inner.lock().unwrap();
        inner.outcomes.push_back(Err(error));
    }

    /// Queue an HTTP failure for the next call.
    pub fn queue_http_error(&self, status: u16, message: &str) {
        self.queue_error(StoreError::Http {
            status,
            message: message.to_string(),
        });
    }

    /// Get all calls received so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        let inner = self.inner.lock().unwrap();
        inner.calls.clone()
    }

    /// Get the last call received.
    pub fn last_call(&self) -> Option<StoreCall> {
        let inner = self.inner.lock().unwrap();
        inner.calls.last().cloned()
    }

    /// Number of `create` calls (recreates not included).
    pub fn create_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Create(_)))
    }

    /// Number of `update` calls.
    pub fn update_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Update(..)))
    }

    /// Number of `recreate` calls.
    pub fn recreate_count(&self) -> usize {
        self.count(|c| matches!(c, StoreCall::Recreate(_)))
    }

    /// Clear all state (calls and queue).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockLeadStoreInner::default();
    }

    fn count(&self, pred: impl Fn(&StoreCall) -> bool) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.calls.iter().filter(|c| pred(c)).count()
    }

    fn respond(&self, call: StoreCall) -> Result<LeadReceipt, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let known = match &call {
            StoreCall::Update(id, _) => Some(id.clone()),
            _ => None,
        };
        let step = call.payload().step;
        inner.calls.push(call);

        match inner.outcomes.pop_front() {
            Some(outcome) => outcome,
            None => Ok(auto_receipt(known, step)),
        }
    }
}

impl Clone for MockLeadStore {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl LeadStore for MockLeadStore {
    async fn create(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        self.respond(StoreCall::Create(payload.clone()))
    }

    async fn update(&self, id: &LeadId, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        self.respond(StoreCall::Update(id.clone(), payload.clone()))
    }

    async fn recreate(&self, payload: &LeadPayload) -> Result<LeadReceipt, StoreError> {
        self.respond(StoreCall::Recreate(payload.clone()))
    }
}

/// Receipt for an unscripted call: echo the id on updates, mint one on
/// creates, and attach a demo location on the final step.
fn auto_receipt(known: Option<LeadId>, step: u8) -> LeadReceipt {
    let id = known.unwrap_or_else(mint_lead_id);
    let mut receipt = LeadReceipt::new(id);
    if step == 5 {
        receipt.location = Some(demo_location());
    }
    receipt
}

fn mint_lead_id() -> LeadId {
    // A v4 UUID is never blank.
    LeadId::new(uuid::Uuid::new_v4().to_string()).expect("uuid is non-empty")
}

/// Location returned by the mock on the final step.
pub fn demo_location() -> NearestLocation {
    NearestLocation {
        name: Some("Equipter Rental Center".to_string()),
        street: Some("1110 Rothsville Rd".to_string()),
        city: Some("Lititz".to_string()),
        state: Some("PA".to_string()),
        postal_code: Some("17543".to_string()),
        country: Some("US".to_string()),
        phone: Some("7174252683".to_string()),
        distance_miles: Some(4.2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use equiprent_types::LeadErrorKind;

    fn payload(step: u8) -> LeadPayload {
        LeadPayload {
            status: "draft".into(),
            step,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn unscripted_create_mints_an_id() {
        let store = MockLeadStore::new();
        let a = store.create(&payload(1)).await.unwrap();
        let b = store.create(&payload(1)).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.create_count(), 2);
    }

    #[tokio::test]
    async fn unscripted_update_echoes_id() {
        let store = MockLeadStore::new();
        let id = LeadId::new("L1").unwrap();
        let receipt = store.update(&id, &payload(2)).await.unwrap();
        assert_eq!(receipt.id, id);
        assert!(receipt.location.is_none());
    }

    #[tokio::test]
    async fn final_step_returns_a_location() {
        let store = MockLeadStore::new();
        let id = LeadId::new("L1").unwrap();
        let receipt = store.update(&id, &payload(5)).await.unwrap();
        assert_eq!(receipt.location, Some(demo_location()));
    }

    #[tokio::test]
    async fn queued_outcomes_replay_in_order() {
        let store = MockLeadStore::new();
        store.queue_http_error(429, "");
        store.queue_success("L7");

        let err = store.create(&payload(1)).await.unwrap_err();
        assert_eq!(err.kind(), LeadErrorKind::RateLimited);
        let ok = store.create(&payload(1)).await.unwrap();
        assert_eq!(ok.id.as_str(), "L7");
    }

    #[tokio::test]
    async fn calls_are_recorded_by_kind() {
        let store = MockLeadStore::new();
        let id = LeadId::new("L1").unwrap();
        store.create(&payload(1)).await.unwrap();
        store.update(&id, &payload(2)).await.unwrap();
        store.recreate(&payload(3)).await.unwrap();

        assert_eq!(store.create_count(), 1);
        assert_eq!(store.update_count(), 1);
        assert_eq!(store.recreate_count(), 1);
        assert_eq!(store.last_call().unwrap().payload().step, 3);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = MockLeadStore::new();
        let clone = store.clone();
        clone.create(&payload(1)).await.unwrap();
        assert_eq!(store.calls().len(), 1);

        store.reset();
        assert!(clone.calls().is_empty());
    }
}
