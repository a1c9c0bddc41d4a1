//! Lead backend wire format.
//!
//! Requests carry the full draft on every step, tagged with the step
//! number so the backend can record progress. Responses wrap the lead in a
//! `data` object; on the final step it also carries the nearest rental
//! location.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{LeadId, NearestLocation, TypesError};

/// Body for `POST /lead` and `PUT /lead/{id}`.
///
/// Field names follow the lead backend's schema. Absent values are sent
/// as explicit `null`s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadPayload {
    /// ZIP code.
    #[serde(rename = "zip__c")]
    pub zip: Option<String>,
    /// True when the customer asked for help choosing equipment.
    #[serde(rename = "help_me_choose__c")]
    pub help_me_choose: Option<bool>,
    /// Project type slug.
    #[serde(rename = "project_type__c")]
    pub project_type: Option<String>,
    /// Contact email.
    #[serde(rename = "email__c")]
    pub email: Option<String>,
    /// First name.
    #[serde(rename = "first_name__c")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(rename = "last_name__c")]
    pub last_name: Option<String>,
    /// Comments.
    #[serde(rename = "comments__c")]
    pub comments: Option<String>,
    /// Renter type (`company_contractor` / `individual_homeowner`).
    #[serde(rename = "renter_type__c")]
    pub renter_type: Option<String>,
    /// Rental start date.
    #[serde(rename = "start_date__c")]
    pub start_date: Option<NaiveDate>,
    /// Rental end date.
    #[serde(rename = "end_date__c")]
    pub end_date: Option<NaiveDate>,
    /// Lead status.
    #[serde(rename = "status__c")]
    pub status: String,
    /// Phone number.
    #[serde(rename = "phone__c")]
    pub phone: Option<String>,
    /// Company name, present only for company/contractor renters.
    #[serde(rename = "company_name__c")]
    pub company_name: Option<String>,
    /// Step being submitted (1..=5).
    #[serde(rename = "step__c")]
    pub step: u8,
    /// Selected model id; null when the customer is not sure.
    #[serde(rename = "selected_model__c")]
    pub selected_model: Option<String>,
}

impl LeadPayload {
    /// Encode as JSON.
    pub fn to_json(&self) -> Result<String, TypesError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Successful response envelope: `{ "data": { ... } }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadEnvelope {
    /// The lead record and, on the final step, location fields.
    #[serde(default)]
    pub data: LeadData,
}

/// The `data` object of a lead response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadData {
    /// Lead id assigned by the backend.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub id: Option<String>,
    /// Nearest location name.
    #[serde(default, rename = "locName")]
    pub loc_name: Option<String>,
    /// Street address.
    #[serde(default)]
    pub street: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// State.
    #[serde(default)]
    pub state: Option<String>,
    /// Postal code of the location.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub zip: Option<String>,
    /// Country.
    #[serde(default)]
    pub country: Option<String>,
    /// Location phone.
    #[serde(default, deserialize_with = "de_opt_string")]
    pub phone: Option<String>,
    /// Distance in miles; the backend sends either a number or a string.
    #[serde(default, deserialize_with = "de_opt_distance")]
    pub distance: Option<f64>,
}

impl LeadEnvelope {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self, TypesError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Extract the location fields, if any were sent.
    pub fn location(&self) -> Option<NearestLocation> {
        let d = &self.data;
        let location = NearestLocation {
            name: d.loc_name.clone(),
            street: d.street.clone(),
            city: d.city.clone(),
            state: d.state.clone(),
            postal_code: d.zip.clone(),
            country: d.country.clone(),
            phone: d.phone.clone(),
            distance_miles: d.distance,
        };
        if location.is_empty() {
            None
        } else {
            Some(location)
        }
    }

    /// Convert into a receipt, falling back to `known` when the response
    /// omits the id (updates are not required to echo it).
    pub fn into_receipt(self, known: Option<&LeadId>) -> Result<LeadReceipt, TypesError> {
        let location = self.location();
        let id = match self.data.id.filter(|s| !s.trim().is_empty()) {
            Some(id) => LeadId::new(id)?,
            None => known.cloned().ok_or(TypesError::MissingLeadId)?,
        };
        Ok(LeadReceipt { id, location })
    }
}

/// Outcome of a successful create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadReceipt {
    /// The lead the call created or updated.
    pub id: LeadId,
    /// Nearest location, carried only by the final step's response.
    pub location: Option<NearestLocation>,
}

impl LeadReceipt {
    /// Receipt with no location payload.
    pub fn new(id: LeadId) -> Self {
        Self { id, location: None }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Num(serde_json::Number),
}

fn de_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|v| match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Num(n) => n.to_string(),
        }),
    )
}

fn de_opt_distance<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.and_then(|v| match v {
            StringOrNumber::Str(s) => s.trim().parse::<f64>().ok(),
            StringOrNumber::Num(n) => n.as_f64(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_backend_field_names() {
        let payload = LeadPayload {
            zip: Some("17601".into()),
            status: "draft".into(),
            step: 1,
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();

        assert_eq!(json["zip__c"], "17601");
        assert_eq!(json["step__c"], 1);
        assert_eq!(json["status__c"], "draft");
        assert!(json["company_name__c"].is_null());
        assert!(json["selected_model__c"].is_null());
        assert!(json.as_object().unwrap().contains_key("renter_type__c"));
    }

    #[test]
    fn payload_dates_are_iso() {
        let payload = LeadPayload {
            start_date: NaiveDate::from_ymd_opt(2026, 11, 2),
            status: "draft".into(),
            step: 3,
            ..Default::default()
        };
        let json: serde_json::Value = serde_json::from_str(&payload.to_json().unwrap()).unwrap();
        assert_eq!(json["start_date__c"], "2026-11-02");
        assert!(json["end_date__c"].is_null());
    }

    #[test]
    fn envelope_create_response() {
        let env = LeadEnvelope::from_json(r#"{"data":{"id":"L1"}}"#).unwrap();
        let receipt = env.into_receipt(None).unwrap();
        assert_eq!(receipt.id.as_str(), "L1");
        assert!(receipt.location.is_none());
    }

    #[test]
    fn envelope_final_step_location() {
        let body = r#"{"data":{"id":"L1","locName":"Lancaster Rentals","street":"12 Main St",
            "state":"PA","zip":17601,"country":"US","phone":"7175550100","distance":"3.24"}}"#;
        let receipt = LeadEnvelope::from_json(body)
            .unwrap()
            .into_receipt(None)
            .unwrap();
        let loc = receipt.location.unwrap();
        assert_eq!(loc.name.as_deref(), Some("Lancaster Rentals"));
        assert_eq!(loc.postal_code.as_deref(), Some("17601"));
        assert_eq!(loc.distance_miles, Some(3.24));
    }

    #[test]
    fn envelope_numeric_distance() {
        let env = LeadEnvelope::from_json(r#"{"data":{"id":"L1","distance":12.5}}"#).unwrap();
        assert_eq!(env.location().unwrap().distance_miles, Some(12.5));
    }

    #[test]
    fn update_without_id_falls_back_to_known() {
        let known = LeadId::new("L9").unwrap();
        let receipt = LeadEnvelope::from_json(r#"{"data":{}}"#)
            .unwrap()
            .into_receipt(Some(&known))
            .unwrap();
        assert_eq!(receipt.id, known);
    }

    #[test]
    fn create_without_id_is_an_error() {
        let result = LeadEnvelope::from_json("{}").unwrap().into_receipt(None);
        assert!(matches!(result, Err(TypesError::MissingLeadId)));
    }
}
