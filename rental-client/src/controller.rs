//! RentalFormController - drives one rental request session.
//!
//! The controller owns the draft and the presentation state, feeds user
//! intents to the pure state machine from rental-core, and interprets the
//! resulting actions against a [`LeadStore`] and a [`DraftPersistence`].
//!
//! ```text
//! Presentation → RentalFormController → LeadStore → Lead backend
//!                        ↓          ↘
//!             rental-core (FSM)   DraftPersistence
//! ```
//!
//! Remote failures never escape as errors: they end up as inline field
//! errors or the banner, and [`StepResult`] tells the caller which.
//!
//! # Example
//!
//! ```ignore
//! let mut form = RentalFormController::mount(MockLeadStore::new(), MemoryPersistence::new()).await;
//! form.update_field(FieldEdit::ZipCode("17601".into()));
//! assert!(matches!(form.advance().await, StepResult::Advanced { .. }));
//! ```

use chrono::NaiveDate;
use equiprent_core::normalize::{normalize_phone, normalize_zip, truncate_comments};
use equiprent_core::validate::zip_is_present;
use equiprent_core::{
    build_payload, validate_step, Action, Event, Field, FieldErrors, FormState, FormStep,
};
use equiprent_types::{
    CustomerType, EquipmentSelection, LeadErrorKind, LeadId, LeadReceipt, NearestLocation,
    RentalDraft,
};
use std::collections::VecDeque;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::persistence::{DraftPersistence, LEAD_KEY};
use crate::store::{LeadStore, StoreError};

/// A single field edit from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    /// ZIP code; reduced to digits, at most ten.
    ZipCode(String),
    /// Equipment choice.
    Equipment(EquipmentSelection),
    /// Rental start date.
    StartDate(Option<NaiveDate>),
    /// Rental end date.
    EndDate(Option<NaiveDate>),
    /// Renter type; choosing an individual clears the company name.
    CustomerType(Option<CustomerType>),
    /// Company name.
    CompanyName(String),
    /// Project type slug.
    ProjectType(Option<String>),
    /// First name.
    FirstName(String),
    /// Last name.
    LastName(String),
    /// Email.
    Email(String),
    /// Phone; digits only, edits beyond ten digits are dropped.
    Phone(String),
    /// Comments; capped at 255 characters.
    Comments(String),
}

impl FieldEdit {
    /// The field this edit touches.
    pub fn field(&self) -> Field {
        match self {
            Self::ZipCode(_) => Field::ZipCode,
            Self::Equipment(_) => Field::Equipment,
            Self::StartDate(_) => Field::StartDate,
            Self::EndDate(_) => Field::EndDate,
            Self::CustomerType(_) => Field::CustomerType,
            Self::CompanyName(_) => Field::CompanyName,
            Self::ProjectType(_) => Field::ProjectType,
            Self::FirstName(_) => Field::FirstName,
            Self::LastName(_) => Field::LastName,
            Self::Email(_) => Field::Email,
            Self::Phone(_) => Field::Phone,
            Self::Comments(_) => Field::Comments,
        }
    }

    /// Apply the edit to a draft, normalizing as it goes.
    ///
    /// Returns false when the edit was dropped (a phone number past ten
    /// digits).
    pub fn apply(self, draft: &mut RentalDraft) -> bool {
        match self {
            Self::ZipCode(value) => draft.zip_code = normalize_zip(&value),
            Self::Equipment(selection) => draft.equipment = selection,
            Self::StartDate(date) => draft.dates.start = date,
            Self::EndDate(date) => draft.dates.end = date,
            Self::CustomerType(customer_type) => {
                draft.customer_type = customer_type;
                if !draft.requires_company() {
                    draft.company_name.clear();
                }
            }
            Self::CompanyName(value) => draft.company_name = value,
            Self::ProjectType(value) => {
                draft.project_type = value.filter(|v| !v.trim().is_empty())
            }
            Self::FirstName(value) => draft.contact.first_name = value,
            Self::LastName(value) => draft.contact.last_name = value,
            Self::Email(value) => draft.contact.email = value,
            Self::Phone(value) => match normalize_phone(&value) {
                Some(digits) => draft.contact.phone = digits,
                None => return false,
            },
            Self::Comments(value) => draft.contact.comments = truncate_comments(&value),
        }
        true
    }
}

/// Outcome of [`RentalFormController::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// The step synced and the form moved on.
    Advanced {
        /// Step now shown.
        to: FormStep,
    },
    /// The lead had vanished; a replacement was created and the form moved on.
    Recreated {
        /// Step now shown.
        to: FormStep,
    },
    /// The step did not validate; nothing was sent.
    Invalid(FieldErrors),
    /// The backend call failed; the step is unchanged.
    Failed(LeadErrorKind),
    /// The lead had vanished and the draft has no ZIP; back on step 1.
    Restarted,
    /// A call is already in flight, or the form is complete.
    Ignored,
}

#[derive(Debug, Default)]
struct Trace {
    failure: Option<LeadErrorKind>,
    recreated: bool,
}

/// Controller for one rental request form.
pub struct RentalFormController<S: LeadStore, P: DraftPersistence> {
    store: S,
    persistence: P,
    state: FormState,
    draft: RentalDraft,
    field_errors: FieldErrors,
    api_error_banner: Option<String>,
    submitting: watch::Sender<bool>,
    location_result: Option<NearestLocation>,
}

impl<S: LeadStore, P: DraftPersistence> RentalFormController<S, P> {
    /// Start a form session.
    ///
    /// Reads the persisted lead id once. With no id stored, persistence is
    /// cleared entirely.
    pub async fn mount(store: S, persistence: P) -> Self {
        let lead = match persistence.get(LEAD_KEY).await {
            Ok(value) => value.and_then(|id| LeadId::new(id).ok()),
            Err(e) => {
                warn!(error = %e, "Could not read saved lead id, starting fresh");
                None
            }
        };

        if lead.is_none() {
            if let Err(e) = persistence.clear().await {
                warn!(error = %e, "Could not clear draft persistence");
            }
        }
        debug!(lead = ?lead, "Rental form mounted");

        Self {
            store,
            persistence,
            state: FormState::resume(lead),
            draft: RentalDraft::new(),
            field_errors: FieldErrors::new(),
            api_error_banner: None,
            submitting: watch::channel(false).0,
            location_result: None,
        }
    }

    /// Step currently shown.
    pub fn current_step(&self) -> FormStep {
        self.state.step()
    }

    /// The draft being filled in.
    pub fn draft(&self) -> &RentalDraft {
        &self.draft
    }

    /// Inline field errors.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    /// Banner text for API-level failures.
    pub fn api_error_banner(&self) -> Option<&str> {
        self.api_error_banner.as_deref()
    }

    /// Whether a backend call is in flight.
    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    /// Watch the in-flight flag.
    ///
    /// `advance` holds `&mut self` for the whole call, so a presentation
    /// layer that disables its submit control while a call is outstanding
    /// subscribes here before advancing.
    pub fn submitting(&self) -> watch::Receiver<bool> {
        self.submitting.subscribe()
    }

    /// Nearest location captured when the final step succeeded.
    pub fn location_result(&self) -> Option<&NearestLocation> {
        self.location_result.as_ref()
    }

    /// Lead the draft is synced to.
    pub fn lead_id(&self) -> Option<&LeadId> {
        self.state.lead()
    }

    /// Whether the success page was reached.
    pub fn is_completed(&self) -> bool {
        self.state.is_completed()
    }

    /// Machine state, for diagnostics.
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The lead store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The draft persistence.
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Apply a field edit and clear that field's error.
    pub fn update_field(&mut self, edit: FieldEdit) {
        let field = edit.field();
        if !edit.apply(&mut self.draft) {
            return;
        }
        if !self.draft.requires_company() {
            self.field_errors.clear_field(Field::CompanyName);
        }
        self.field_errors.clear_field(field);
    }

    /// Validate the current step and sync it to the backend.
    ///
    /// Ignored while a call is in flight or after completion.
    pub async fn advance(&mut self) -> StepResult {
        if self.state.is_in_flight() || self.state.is_completed() {
            return StepResult::Ignored;
        }

        let from = self.state.step();
        let had_lead = self.state.lead().is_some();
        let field_errors = match validate_step(&self.draft, from) {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors,
        };
        if !field_errors.is_empty() {
            debug!(step = %from, fields = field_errors.len(), "Step failed validation");
            self.dispatch(Event::Advance {
                field_errors: field_errors.clone(),
            })
            .await;
            return StepResult::Invalid(field_errors);
        }

        let trace = self.dispatch(Event::Advance { field_errors }).await;
        let to = self.state.step();

        if to > from {
            if trace.recreated {
                StepResult::Recreated { to }
            } else {
                StepResult::Advanced { to }
            }
        } else {
            match trace.failure {
                Some(LeadErrorKind::NotFound) if had_lead && !trace.recreated => {
                    StepResult::Restarted
                }
                Some(kind) => StepResult::Failed(kind),
                None => StepResult::Ignored,
            }
        }
    }

    /// Go back one step. Purely local; returns the step now shown.
    pub async fn previous(&mut self) -> FormStep {
        self.dispatch(Event::Previous).await;
        self.state.step()
    }

    /// Discard the draft and the saved lead id and return to step 1.
    pub async fn reset(&mut self) {
        self.dispatch(Event::Reset).await;
    }

    /// Feed an event through the state machine, executing actions until no
    /// follow-up events remain.
    async fn dispatch(&mut self, event: Event) -> Trace {
        let mut trace = Trace::default();
        let mut events = VecDeque::from([event]);

        while let Some(event) = events.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (next, actions) = state.on_event(event);
            debug!(state = ?next, actions = actions.len(), "Form transition");
            self.state = next;

            for action in actions {
                if let Some(follow_up) = self.execute(action, &mut trace).await {
                    events.push_back(follow_up);
                }
            }
        }
        trace
    }

    async fn execute(&mut self, action: Action, trace: &mut Trace) -> Option<Event> {
        match action {
            Action::Create { step } => {
                let payload = build_payload(&self.draft, step);
                self.submitting.send_replace(true);
                let result = self.store.create(&payload).await;
                self.submitting.send_replace(false);
                Some(self.remote_event(result, trace))
            }
            Action::Recreate { step } => {
                trace.recreated = true;
                info!(step = %step, "Lead no longer exists, creating a replacement");
                let payload = build_payload(&self.draft, step);
                self.submitting.send_replace(true);
                let result = self.store.recreate(&payload).await;
                self.submitting.send_replace(false);
                Some(self.remote_event(result, trace))
            }
            Action::Update { lead, step } => {
                let payload = build_payload(&self.draft, step);
                self.submitting.send_replace(true);
                let result = self.store.update(&lead, &payload).await;
                self.submitting.send_replace(false);
                Some(self.remote_event(result, trace))
            }
            Action::PersistLead(id) => {
                if let Err(e) = self.persistence.set(LEAD_KEY, id.as_str()).await {
                    warn!(lead = %id, error = %e, "Could not save lead id");
                }
                None
            }
            Action::ForgetLead => {
                if let Err(e) = self.persistence.remove(LEAD_KEY).await {
                    warn!(error = %e, "Could not remove saved lead id");
                }
                None
            }
            Action::ShowFieldErrors(errors) => {
                self.field_errors = errors;
                None
            }
            Action::ShowBanner(message) => {
                self.api_error_banner = Some(message);
                None
            }
            Action::ClearErrors => {
                self.field_errors.clear();
                self.api_error_banner = None;
                None
            }
            Action::CaptureLocation(location) => {
                self.location_result = Some(location);
                None
            }
            Action::ClearDraft => {
                self.draft = RentalDraft::new();
                self.location_result = None;
                None
            }
        }
    }

    fn remote_event(&self, result: Result<LeadReceipt, StoreError>, trace: &mut Trace) -> Event {
        match result {
            Ok(receipt) => Event::RemoteSucceeded { receipt },
            Err(e) => {
                let kind = e.kind();
                warn!(error = %e, kind = ?kind, step = %self.state.step(), "Lead sync failed");
                trace.failure = Some(kind);
                Event::RemoteFailed {
                    kind,
                    zip_present: zip_is_present(&self.draft),
                }
            }
        }
    }
}
