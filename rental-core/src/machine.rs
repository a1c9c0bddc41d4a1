//! Rental form state machine.
//!
//! This module provides a pure, side-effect-free state machine for the
//! multi-step rental request. It takes events as input and produces a new
//! state plus a list of actions to execute.
//!
//! The actual I/O (lead backend calls, draft persistence) is performed by
//! rental-client, not by this module. The stale-reference recreate is an
//! ordinary transition (`Syncing { op: Update } --NotFound--> Recreating`)
//! rather than an error handler.

use equiprent_types::{LeadErrorKind, LeadId, LeadReceipt, NearestLocation};

use crate::messages;
use crate::step::FormStep;
use crate::validate::{Field, FieldErrors};

/// Form state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Waiting for user input on a step.
    Editing {
        /// Step being shown.
        step: FormStep,
        /// Lead the draft is synced to, if one was created.
        lead: Option<LeadId>,
    },
    /// A create or update for `step` is in flight.
    Syncing {
        /// Step that dispatched the call.
        step: FormStep,
        /// Lead known when the call was dispatched.
        lead: Option<LeadId>,
        /// Which call is in flight.
        op: RemoteOp,
    },
    /// The lead vanished server-side; a fresh create for `step` is in flight.
    Recreating {
        /// Step that dispatched the original update.
        step: FormStep,
    },
    /// Terminal success page.
    Completed,
}

/// Remote call kinds dispatched from [`FormState::Editing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    /// `POST /lead`.
    Create,
    /// `PUT /lead/{id}`.
    Update,
}

impl FormState {
    /// Fresh form on step 1 with no lead.
    pub fn new() -> Self {
        Self::resume(None)
    }

    /// Form on step 1 continuing an existing lead, if any.
    ///
    /// Only the lead id survives across sessions; the step always restarts.
    pub fn resume(lead: Option<LeadId>) -> Self {
        Self::Editing {
            step: FormStep::first(),
            lead,
        }
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (rental-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: Event) -> (Self, Vec<Action>) {
        match (self, event) {
            // Reset is accepted from anywhere
            (_, Event::Reset) => (
                Self::new(),
                vec![Action::ForgetLead, Action::ClearErrors, Action::ClearDraft],
            ),

            // From Editing
            (Self::Editing { step, lead }, Event::Advance { field_errors })
                if !field_errors.is_empty() =>
            {
                (
                    Self::Editing { step, lead },
                    vec![Action::ShowFieldErrors(field_errors)],
                )
            }
            (Self::Editing { step, lead: None }, Event::Advance { .. }) => (
                Self::Syncing {
                    step,
                    lead: None,
                    op: RemoteOp::Create,
                },
                vec![Action::ClearErrors, Action::Create { step }],
            ),
            (Self::Editing { step, lead: Some(lead) }, Event::Advance { .. }) => (
                Self::Syncing {
                    step,
                    lead: Some(lead.clone()),
                    op: RemoteOp::Update,
                },
                vec![Action::ClearErrors, Action::Update { lead, step }],
            ),
            (Self::Editing { step, lead }, Event::Previous) => (
                Self::Editing {
                    step: step.previous(),
                    lead,
                },
                vec![Action::ClearErrors],
            ),

            // From Syncing
            (Self::Syncing { step, lead, .. }, Event::RemoteSucceeded { receipt }) => {
                advance_after(step, lead.as_ref(), receipt)
            }
            (
                Self::Syncing {
                    step,
                    lead: Some(_),
                    op: RemoteOp::Update,
                },
                Event::RemoteFailed {
                    kind: LeadErrorKind::NotFound,
                    zip_present,
                },
            ) => {
                if zip_present {
                    (
                        Self::Recreating { step },
                        vec![Action::ForgetLead, Action::Recreate { step }],
                    )
                } else {
                    (
                        Self::new(),
                        vec![
                            Action::ForgetLead,
                            Action::ShowFieldErrors(FieldErrors::single(
                                Field::ZipCode,
                                messages::ZIP_REQUIRED,
                            )),
                        ],
                    )
                }
            }
            (Self::Syncing { step, lead, .. }, Event::RemoteFailed { kind, .. }) => {
                (Self::Editing { step, lead }, vec![failure_action(kind)])
            }

            // From Recreating
            (Self::Recreating { step }, Event::RemoteSucceeded { receipt }) => {
                advance_after(step, None, receipt)
            }
            (Self::Recreating { step }, Event::RemoteFailed { kind, .. }) => (
                Self::Editing { step, lead: None },
                vec![failure_action(kind)],
            ),

            // Navigation while a call is in flight, results with nothing in
            // flight, and anything after completion are ignored
            (state, _) => (state, vec![]),
        }
    }

    /// Step currently shown.
    pub fn step(&self) -> FormStep {
        match self {
            Self::Editing { step, .. } | Self::Syncing { step, .. } | Self::Recreating { step } => {
                *step
            }
            Self::Completed => FormStep::terminal(),
        }
    }

    /// Lead the draft is currently synced to.
    pub fn lead(&self) -> Option<&LeadId> {
        match self {
            Self::Editing { lead, .. } | Self::Syncing { lead, .. } => lead.as_ref(),
            Self::Recreating { .. } | Self::Completed => None,
        }
    }

    /// Check if a remote call is in flight.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Syncing { .. } | Self::Recreating { .. })
    }

    /// Check if the success page was reached.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that drive the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// User asked to continue; carries the validator's verdict for the
    /// current step (empty when valid).
    Advance {
        /// Errors found on the current step.
        field_errors: FieldErrors,
    },
    /// User asked to go back one step.
    Previous,
    /// The in-flight call succeeded.
    RemoteSucceeded {
        /// Lead id and, on the final step, the nearest location.
        receipt: LeadReceipt,
    },
    /// The in-flight call failed.
    RemoteFailed {
        /// Classified failure.
        kind: LeadErrorKind,
        /// Whether the draft still has a ZIP code.
        zip_present: bool,
    },
    /// Discard everything and start over.
    Reset,
}

/// Actions to be executed by the rental-client.
///
/// These are instructions, not side effects. The rental-client interprets
/// these and performs the actual I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Create a lead from the draft tagged with `step`.
    Create {
        /// Step being submitted.
        step: FormStep,
    },
    /// Create a replacement lead after the old one vanished.
    Recreate {
        /// Step being submitted.
        step: FormStep,
    },
    /// Update an existing lead from the draft tagged with `step`.
    Update {
        /// Lead to update.
        lead: LeadId,
        /// Step being submitted.
        step: FormStep,
    },
    /// Store the lead id in draft persistence.
    PersistLead(LeadId),
    /// Remove the lead id from draft persistence.
    ForgetLead,
    /// Show inline field errors.
    ShowFieldErrors(FieldErrors),
    /// Show the error banner.
    ShowBanner(String),
    /// Clear field errors and the banner.
    ClearErrors,
    /// Keep the nearest location for the success page.
    CaptureLocation(NearestLocation),
    /// Empty the in-memory draft.
    ClearDraft,
}

/// Apply a successful call for `step`.
fn advance_after(
    step: FormStep,
    known: Option<&LeadId>,
    receipt: LeadReceipt,
) -> (FormState, Vec<Action>) {
    let mut actions = vec![Action::ClearErrors];
    if known != Some(&receipt.id) {
        actions.push(Action::PersistLead(receipt.id.clone()));
    }
    if step.is_final_input() {
        if let Some(location) = receipt.location {
            actions.push(Action::CaptureLocation(location));
        }
    }

    let next = step.next();
    if next.is_terminal() {
        actions.push(Action::ForgetLead);
        (FormState::Completed, actions)
    } else {
        (
            FormState::Editing {
                step: next,
                lead: Some(receipt.id),
            },
            actions,
        )
    }
}

/// Presentation action for a failure that is not recovered automatically.
fn failure_action(kind: LeadErrorKind) -> Action {
    match kind {
        LeadErrorKind::InvalidZip => {
            Action::ShowFieldErrors(FieldErrors::single(Field::ZipCode, messages::ZIP_REJECTED))
        }
        LeadErrorKind::RateLimited => Action::ShowBanner(messages::RATE_LIMITED.to_string()),
        LeadErrorKind::NotConfigured => Action::ShowBanner(messages::NOT_CONFIGURED.to_string()),
        LeadErrorKind::NotFound | LeadErrorKind::Unknown => {
            Action::ShowBanner(messages::SUBMIT_FAILED.to_string())
        }
    }
}
