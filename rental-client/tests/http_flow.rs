//! End-to-end form flows against a stubbed HTTP lead backend.

use chrono::NaiveDate;
use equiprent_client::{
    ClientConfig, FieldEdit, HttpLeadStore, MemoryPersistence, RentalFormController, StepResult,
    LEAD_KEY,
};
use equiprent_core::FormStep;
use equiprent_types::{CustomerType, EquipmentSelection, LeadErrorKind};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> HttpLeadStore {
    HttpLeadStore::new(ClientConfig::new(server.uri())).unwrap()
}

fn lead(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "data": { "id": id } }))
}

fn fill_all(form: &mut RentalFormController<HttpLeadStore, MemoryPersistence>) {
    form.update_field(FieldEdit::ZipCode("17601".into()));
    form.update_field(FieldEdit::Equipment(EquipmentSelection::NotSure));
    form.update_field(FieldEdit::StartDate(NaiveDate::from_ymd_opt(2026, 11, 2)));
    form.update_field(FieldEdit::CustomerType(Some(
        CustomerType::IndividualHomeowner,
    )));
    form.update_field(FieldEdit::FirstName("Ada".into()));
    form.update_field(FieldEdit::LastName("Lovelace".into()));
    form.update_field(FieldEdit::Email("ada@example.com".into()));
    form.update_field(FieldEdit::Phone("7174252683".into()));
}

#[tokio::test]
async fn full_flow_creates_once_then_updates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/lead"))
        .and(body_partial_json(json!({ "step__c": 1, "status__c": "draft" })))
        .respond_with(lead("L1"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/lead/L1"))
        .and(body_partial_json(json!({ "step__c": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "id": "L1",
                "locName": "Lititz",
                "city": "Lititz",
                "state": "PA",
                "distance": "4.2"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/lead/L1"))
        .respond_with(lead("L1"))
        .expect(3)
        .mount(&server)
        .await;

    let persistence = MemoryPersistence::new();
    let mut form = RentalFormController::mount(store_for(&server), persistence.clone()).await;
    fill_all(&mut form);

    for _ in 0..5 {
        assert!(matches!(form.advance().await, StepResult::Advanced { .. }));
    }

    assert!(form.is_completed());
    assert_eq!(form.current_step(), FormStep::terminal());
    let location = form.location_result().unwrap();
    assert_eq!(location.name.as_deref(), Some("Lititz"));
    assert_eq!(location.distance_miles, Some(4.2));
    assert_eq!(persistence.peek(LEAD_KEY), None);
}

#[tokio::test]
async fn vanished_lead_is_recreated_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/lead/L1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/lead"))
        .and(body_partial_json(json!({ "zip__c": "17601", "step__c": 1 })))
        .respond_with(lead("L2"))
        .expect(1)
        .mount(&server)
        .await;

    let persistence = MemoryPersistence::with_value(LEAD_KEY, "L1");
    let mut form = RentalFormController::mount(store_for(&server), persistence.clone()).await;
    form.update_field(FieldEdit::ZipCode("17601".into()));

    let result = form.advance().await;

    assert_eq!(
        result,
        StepResult::Recreated {
            to: FormStep::new(2).unwrap()
        }
    );
    assert_eq!(form.lead_id().map(|id| id.as_str()), Some("L2"));
    assert_eq!(persistence.peek(LEAD_KEY).as_deref(), Some("L2"));
}

#[tokio::test]
async fn rejected_zip_shows_inline_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/lead"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid zip code" })),
        )
        .mount(&server)
        .await;

    let mut form =
        RentalFormController::mount(store_for(&server), MemoryPersistence::new()).await;
    form.update_field(FieldEdit::ZipCode("00000".into()));

    let result = form.advance().await;

    assert_eq!(result, StepResult::Failed(LeadErrorKind::InvalidZip));
    assert_eq!(form.current_step(), FormStep::first());
    assert!(form.field_errors().get(equiprent_core::Field::ZipCode).is_some());
    assert!(form.api_error_banner().is_none());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn unreachable_backend_keeps_step() {
    let config = ClientConfig::new("http://127.0.0.1:1");
    let store = HttpLeadStore::new(config).unwrap();
    let mut form = RentalFormController::mount(store, MemoryPersistence::new()).await;
    form.update_field(FieldEdit::ZipCode("17601".into()));

    let result = form.advance().await;

    assert_eq!(result, StepResult::Failed(LeadErrorKind::Unknown));
    assert_eq!(form.current_step(), FormStep::first());
    assert!(form.api_error_banner().is_some());
    assert!(form.lead_id().is_none());
}
