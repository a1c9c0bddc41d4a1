//! Step validator.
//!
//! Stateless checks of field completeness and format for each step. A
//! step either validates or yields a map of field → message; nothing here
//! touches the network, so invalid input never reaches the lead backend.

use equiprent_types::{CustomerType, RentalDraft};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::messages;
use crate::normalize::{digits_only, PHONE_DIGITS};
use crate::step::FormStep;

/// Minimum ZIP code length, in digits.
pub const MIN_ZIP_DIGITS: usize = 5;

/// Draft fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// ZIP code (step 1).
    ZipCode,
    /// Equipment selection (step 2).
    Equipment,
    /// Start date (step 3).
    StartDate,
    /// End date (step 3).
    EndDate,
    /// Renter type (step 4).
    CustomerType,
    /// First name (step 4).
    FirstName,
    /// Last name (step 4).
    LastName,
    /// Company name (step 4).
    CompanyName,
    /// Project type (step 4).
    ProjectType,
    /// Email (step 5).
    Email,
    /// Phone (step 5).
    Phone,
    /// Comments (step 5).
    Comments,
}

impl Field {
    /// Field name as presentation layers refer to it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZipCode => "zipCode",
            Self::Equipment => "equipment",
            Self::StartDate => "startDate",
            Self::EndDate => "endDate",
            Self::CustomerType => "customerType",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::CompanyName => "companyName",
            Self::ProjectType => "projectType",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Comments => "comments",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inline field errors, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// No errors.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single error.
    pub fn single(field: Field, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Record an error, replacing any previous one for the field.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drop the error for one field. Returns true if one was present.
    pub fn clear_field(&mut self, field: Field) -> bool {
        self.0.remove(&field).is_some()
    }

    /// Drop every error.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// The message for a field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field has an error.
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Whether there are no errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(field, message)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Validate the fields belonging to `step`.
///
/// Steps without input (the terminal step) always validate.
pub fn validate_step(draft: &RentalDraft, step: FormStep) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    match step.number() {
        1 => check_zip(draft, &mut errors),
        2 => {
            if !draft.equipment.is_chosen() {
                errors.insert(Field::Equipment, messages::EQUIPMENT_REQUIRED);
            }
        }
        3 => {
            if draft.dates.start.is_none() {
                errors.insert(Field::StartDate, messages::START_DATE_REQUIRED);
            } else if draft.dates.is_inverted() {
                errors.insert(Field::EndDate, messages::END_DATE_BEFORE_START);
            }
        }
        4 => check_details(draft, &mut errors),
        5 => check_contact(draft, &mut errors),
        _ => {}
    }
    errors.into_result()
}

/// Whether the ZIP code has enough digits to be submitted.
pub fn zip_is_present(draft: &RentalDraft) -> bool {
    !digits_only(&draft.zip_code).is_empty()
}

/// Whether an email has the `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("email pattern is valid")
        })
        .is_match(email.trim())
}

fn check_zip(draft: &RentalDraft, errors: &mut FieldErrors) {
    if digits_only(&draft.zip_code).len() < MIN_ZIP_DIGITS {
        errors.insert(Field::ZipCode, messages::ZIP_REQUIRED);
    }
}

fn check_details(draft: &RentalDraft, errors: &mut FieldErrors) {
    // Names are only collected once a renter type is chosen.
    let Some(customer_type) = draft.customer_type else {
        errors.insert(Field::CustomerType, messages::CUSTOMER_TYPE_REQUIRED);
        return;
    };
    if draft.contact.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, messages::FIRST_NAME_REQUIRED);
    }
    if draft.contact.last_name.trim().is_empty() {
        errors.insert(Field::LastName, messages::LAST_NAME_REQUIRED);
    }
    if customer_type == CustomerType::CompanyContractor && draft.company_name.trim().is_empty() {
        errors.insert(Field::CompanyName, messages::COMPANY_REQUIRED);
    }
}

fn check_contact(draft: &RentalDraft, errors: &mut FieldErrors) {
    let email = draft.contact.email.trim();
    if email.is_empty() {
        errors.insert(Field::Email, messages::EMAIL_REQUIRED);
    } else if !is_valid_email(email) {
        errors.insert(Field::Email, messages::EMAIL_INVALID);
    }

    let phone = digits_only(&draft.contact.phone);
    if phone.is_empty() {
        errors.insert(Field::Phone, messages::PHONE_REQUIRED);
    } else if phone.len() != PHONE_DIGITS {
        errors.insert(Field::Phone, messages::PHONE_INVALID);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use equiprent_types::EquipmentSelection;

    fn step(n: u8) -> FormStep {
        FormStep::new(n).unwrap()
    }

    fn complete_draft() -> RentalDraft {
        let mut draft = RentalDraft::new();
        draft.zip_code = "17601".into();
        draft.equipment = EquipmentSelection::Model("a0X1".into());
        draft.dates.start = NaiveDate::from_ymd_opt(2026, 11, 2);
        draft.customer_type = Some(CustomerType::IndividualHomeowner);
        draft.contact.first_name = "Ada".into();
        draft.contact.last_name = "Lovelace".into();
        draft.contact.email = "ada@example.com".into();
        draft.contact.phone = "7174252683".into();
        draft
    }

    #[test]
    fn complete_draft_passes_every_step() {
        let draft = complete_draft();
        for s in FormStep::input_steps() {
            assert!(validate_step(&draft, s).is_ok(), "step {s} should pass");
        }
        assert!(validate_step(&draft, FormStep::terminal()).is_ok());
    }

    #[test]
    fn four_digit_zip_is_rejected() {
        let mut draft = RentalDraft::new();
        draft.zip_code = "1234".into();
        let errors = validate_step(&draft, step(1)).unwrap_err();
        assert_eq!(errors.get(Field::ZipCode), Some(messages::ZIP_REQUIRED));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn zip_counts_digits_after_normalization() {
        let mut draft = RentalDraft::new();
        draft.zip_code = "1-2-3-4".into();
        assert!(validate_step(&draft, step(1)).is_err());
        draft.zip_code = "17601".into();
        assert!(validate_step(&draft, step(1)).is_ok());
    }

    #[test]
    fn not_sure_counts_as_equipment_choice() {
        let mut draft = RentalDraft::new();
        assert!(validate_step(&draft, step(2)).is_err());
        draft.equipment = EquipmentSelection::NotSure;
        assert!(validate_step(&draft, step(2)).is_ok());
    }

    #[test]
    fn start_date_required_and_end_not_before_start() {
        let mut draft = RentalDraft::new();
        let errors = validate_step(&draft, step(3)).unwrap_err();
        assert!(errors.contains(Field::StartDate));

        draft.dates.start = NaiveDate::from_ymd_opt(2026, 11, 2);
        draft.dates.end = NaiveDate::from_ymd_opt(2026, 11, 1);
        let errors = validate_step(&draft, step(3)).unwrap_err();
        assert_eq!(errors.get(Field::EndDate), Some(messages::END_DATE_BEFORE_START));

        draft.dates.end = NaiveDate::from_ymd_opt(2026, 11, 2);
        assert!(validate_step(&draft, step(3)).is_ok());
    }

    #[test]
    fn unset_customer_type_does_not_silently_pass() {
        let mut draft = complete_draft();
        draft.customer_type = None;
        let errors = validate_step(&draft, step(4)).unwrap_err();
        assert!(errors.contains(Field::CustomerType));
    }

    #[test]
    fn company_required_only_for_contractors() {
        let mut draft = complete_draft();
        draft.customer_type = Some(CustomerType::CompanyContractor);
        let errors = validate_step(&draft, step(4)).unwrap_err();
        assert_eq!(errors.get(Field::CompanyName), Some(messages::COMPANY_REQUIRED));

        draft.company_name = "Acme Roofing".into();
        assert!(validate_step(&draft, step(4)).is_ok());

        draft.customer_type = Some(CustomerType::IndividualHomeowner);
        draft.company_name.clear();
        assert!(validate_step(&draft, step(4)).is_ok());
    }

    #[test]
    fn blank_names_are_reported_together() {
        let mut draft = complete_draft();
        draft.contact.first_name = "  ".into();
        draft.contact.last_name.clear();
        let errors = validate_step(&draft, step(4)).unwrap_err();
        assert!(errors.contains(Field::FirstName));
        assert!(errors.contains(Field::LastName));
    }

    #[test]
    fn email_without_tld_is_rejected() {
        let mut draft = complete_draft();
        draft.contact.email = "a@b".into();
        let errors = validate_step(&draft, step(5)).unwrap_err();
        assert_eq!(errors.get(Field::Email), Some(messages::EMAIL_INVALID));
        assert!(!errors.contains(Field::Phone));
    }

    #[test]
    fn phone_must_be_ten_digits() {
        let mut draft = complete_draft();
        draft.contact.phone.clear();
        let errors = validate_step(&draft, step(5)).unwrap_err();
        assert_eq!(errors.get(Field::Phone), Some(messages::PHONE_REQUIRED));

        draft.contact.phone = "717425".into();
        let errors = validate_step(&draft, step(5)).unwrap_err();
        assert_eq!(errors.get(Field::Phone), Some(messages::PHONE_INVALID));

        draft.contact.phone = "(717) 425-2683".into();
        assert!(validate_step(&draft, step(5)).is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("first.last+tag@sub.example.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn field_errors_serialize_as_camel_case_map() {
        let errors = FieldErrors::single(Field::ZipCode, "bad zip");
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"zipCode":"bad zip"}"#);
    }

    #[test]
    fn field_errors_clear_per_field() {
        let mut errors = FieldErrors::single(Field::Email, "x");
        errors.insert(Field::Phone, "y");
        assert!(errors.clear_field(Field::Email));
        assert!(!errors.clear_field(Field::Email));
        assert_eq!(errors.len(), 1);
    }
}
