//! Request payload construction.

use equiprent_types::{EquipmentSelection, LeadPayload, LeadStatus, RentalDraft};

use crate::normalize::digits_only;
use crate::step::FormStep;

/// Build the create/update body for submitting `step`.
///
/// The whole draft is sent on every step; the backend records progress from
/// `step__c`. Blank strings become `null`.
pub fn build_payload(draft: &RentalDraft, step: FormStep) -> LeadPayload {
    let company_name = if draft.requires_company() {
        non_blank(&draft.company_name)
    } else {
        None
    };

    // The renter type is only asked for on step 4.
    let renter_type = if step.number() >= 4 {
        draft.customer_type.map(|t| t.as_str().to_string())
    } else {
        None
    };

    // The backend only ever sees `true` or `null` for the help flag.
    let help_me_choose = (draft.equipment == EquipmentSelection::NotSure).then_some(true);
    let selected_model = draft.equipment.model_id().and_then(non_blank);

    LeadPayload {
        zip: non_blank(&digits_only(&draft.zip_code)),
        help_me_choose,
        project_type: draft.project_type.as_deref().and_then(non_blank),
        email: non_blank(&draft.contact.email),
        first_name: non_blank(&draft.contact.first_name),
        last_name: non_blank(&draft.contact.last_name),
        comments: non_blank(&draft.contact.comments),
        renter_type,
        start_date: draft.dates.start,
        end_date: draft.dates.end,
        status: LeadStatus::Draft.as_str().to_string(),
        phone: non_blank(&digits_only(&draft.contact.phone)),
        company_name,
        step: step.number(),
        selected_model,
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
