//! The client-side rental draft.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire value for "undecided, help me choose" on the equipment step.
pub const NOT_SURE: &str = "not-sure";

/// The in-progress rental request.
///
/// Created empty when a form session starts. Only the lead id survives
/// across sessions; field values are never rehydrated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalDraft {
    /// ZIP code, digits only once normalized.
    pub zip_code: String,
    /// Chosen equipment model or the "not sure" sentinel.
    pub equipment: EquipmentSelection,
    /// Requested rental window.
    pub dates: DateRange,
    /// Who is renting.
    pub customer_type: Option<CustomerType>,
    /// Company name, only meaningful for company/contractor renters.
    pub company_name: String,
    /// Optional project type slug (e.g. `general-construction`).
    pub project_type: Option<String>,
    /// Contact details.
    pub contact: Contact,
    /// Lifecycle status of the lead.
    pub status: LeadStatus,
}

impl RentalDraft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the company name applies to this draft.
    pub fn requires_company(&self) -> bool {
        self.customer_type == Some(CustomerType::CompanyContractor)
    }
}

/// Equipment selection on step 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSelection {
    /// Nothing chosen yet.
    #[default]
    Unset,
    /// A specific model, by catalog id.
    Model(String),
    /// Undecided; the customer wants guidance.
    NotSure,
}

impl EquipmentSelection {
    /// Parse the value a presentation layer hands back for a chosen option.
    ///
    /// The `not-sure` sentinel maps to [`EquipmentSelection::NotSure`];
    /// blank input clears the selection.
    pub fn from_value(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            Self::Unset
        } else if value == NOT_SURE {
            Self::NotSure
        } else {
            Self::Model(value.to_string())
        }
    }

    /// Whether a choice (including "not sure") has been made.
    pub fn is_chosen(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// The model id when a concrete model is chosen.
    pub fn model_id(&self) -> Option<&str> {
        match self {
            Self::Model(id) => Some(id),
            _ => None,
        }
    }
}

/// Requested rental window. The end date is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the rental.
    pub start: Option<NaiveDate>,
    /// Last day of the rental, if known.
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Whether an end date precedes the start date.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if end < start)
    }
}

/// Who the rental is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// A business or contractor; company name is required.
    CompanyContractor,
    /// A private individual or homeowner.
    IndividualHomeowner,
}

impl CustomerType {
    /// Wire value used by the lead backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CompanyContractor => "company_contractor",
            Self::IndividualHomeowner => "individual_homeowner",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CompanyContractor => "Company / Contractor",
            Self::IndividualHomeowner => "Individual / Homeowner",
        }
    }
}

impl fmt::Display for CustomerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CustomerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "company_contractor" | "company" | "contractor" => Ok(Self::CompanyContractor),
            "individual_homeowner" | "individual" | "homeowner" => {
                Ok(Self::IndividualHomeowner)
            }
            other => Err(format!("unknown customer type: {other}")),
        }
    }
}

/// Contact details collected on steps 4 and 5.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number, digits only once normalized.
    pub phone: String,
    /// Free-form comments.
    pub comments: String,
}

/// Lifecycle status of a lead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Still being filled in.
    #[default]
    Draft,
    /// Final step submitted.
    Submitted,
    /// Closed by the backend.
    Closed,
}

impl LeadStatus {
    /// Wire value used by the lead backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Closed => "closed",
        }
    }
}
