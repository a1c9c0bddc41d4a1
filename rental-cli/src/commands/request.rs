//! Fill in and submit the rental request form.

use anyhow::{Context, Result};
use equiprent_client::{
    DraftPersistence, HttpLeadStore, LeadStore, MockLeadStore, RentalFormController, StepResult,
};
use equiprent_core::FormStep;
use equiprent_types::NearestLocation;
use tracing::{debug, warn};

use super::{print_field_errors, DraftArgs, Session};
use crate::config::LinksConfig;

/// Run the request command.
///
/// Advances from step 1 through `through` (default: the final step). The
/// lead id is kept between runs, so a later run updates the same lead.
pub async fn run(session: &Session, args: &DraftArgs, through: Option<u8>) -> Result<()> {
    let stop_after = stop_step(through)?;
    let persistence = session.persistence();

    if session.mock {
        let form = drive(MockLeadStore::new(), persistence, args, stop_after).await?;
        report(&form, &session.config.links);
    } else {
        let store = HttpLeadStore::new(session.client_config())
            .with_context(|| format!("Invalid lead backend URL: {:?}", session.api_base))?;
        let form = drive(store, persistence, args, stop_after).await?;
        report(&form, &session.config.links);
    }
    Ok(())
}

/// Last step to submit, from `--through`.
fn stop_step(through: Option<u8>) -> Result<FormStep> {
    match through {
        None => Ok(FormStep::new(FormStep::LAST_INPUT)?),
        Some(n) if (FormStep::FIRST..=FormStep::LAST_INPUT).contains(&n) => Ok(FormStep::new(n)?),
        Some(n) => anyhow::bail!("--through must be between 1 and 5, got {n}"),
    }
}

/// Mount a form, apply the edits, and advance until `stop_after` is
/// submitted or a step fails.
pub async fn drive<S: LeadStore, P: DraftPersistence>(
    store: S,
    persistence: P,
    args: &DraftArgs,
    stop_after: FormStep,
) -> Result<RentalFormController<S, P>> {
    let mut form = RentalFormController::mount(store, persistence).await;
    debug!(lead = ?form.lead_id(), stop_after = %stop_after, "Form mounted");
    if let Some(lead) = form.lead_id() {
        println!("Continuing lead {lead}");
    }
    for edit in args.edits() {
        form.update_field(edit);
    }

    while !form.is_completed() && form.current_step() <= stop_after {
        let step = form.current_step();
        match form.advance().await {
            StepResult::Advanced { to } => {
                println!("Step {step} saved → step {to}");
            }
            StepResult::Recreated { to } => {
                println!("Step {step} saved as a new request → step {to}");
            }
            StepResult::Invalid(errors) => {
                println!("Step {step} is incomplete:");
                print_field_errors(&errors);
                anyhow::bail!("step {step} failed validation");
            }
            StepResult::Failed(kind) => {
                if let Some(banner) = form.api_error_banner() {
                    println!("{banner}");
                }
                print_field_errors(form.field_errors());
                warn!(step = %step, ?kind, "Step was not saved");
                if kind.is_transient() {
                    anyhow::bail!("step {step} was not saved ({kind:?}); try again shortly");
                }
                anyhow::bail!("step {step} was not saved ({kind:?})");
            }
            StepResult::Restarted => {
                println!("Your saved request expired. Please start again from step 1.");
                print_field_errors(form.field_errors());
                anyhow::bail!("saved request expired and no ZIP code was given");
            }
            StepResult::Ignored => break,
        }
    }

    Ok(form)
}

fn report<S: LeadStore, P: DraftPersistence>(
    form: &RentalFormController<S, P>,
    links: &LinksConfig,
) {
    println!();
    if form.is_completed() {
        print_success(form.location_result(), links);
    } else {
        let lead = form
            .lead_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!("Progress saved (lead {lead}). Next step: {}", form.current_step());
        println!("Run 'equiprent request' again with all fields to continue.");
    }
}

fn print_success(location: Option<&NearestLocation>, links: &LinksConfig) {
    println!("Thank you! Your rental request has been submitted.");
    println!();

    match location {
        Some(location) => {
            println!("Nearest rental location:");
            if let Some(name) = location.name.as_deref() {
                println!("  {name}");
            }
            if let Some(address) = location.address_line() {
                println!("  {address}");
            }
            if let Some(phone) = location.phone.as_deref() {
                println!("  Phone: {phone}");
            }
            if let Some(distance) = location.distance_label() {
                println!("  {distance}");
            }
        }
        None => {
            println!("We'll match you with the nearest rental location shortly.");
        }
    }

    println!();
    println!("What happens next:");
    println!("  1. A rental specialist reviews your request");
    println!("  2. They contact you to confirm availability and pricing");
    println!();
    println!("Questions? Call {}", links.support_phone);
    println!("Find a location: {}", links.rent_url);
    println!("About Equipter:  {}", links.home_url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use equiprent_client::{MemoryPersistence, LEAD_KEY};
    use equiprent_types::CustomerType;

    fn full_args() -> DraftArgs {
        DraftArgs {
            zip: Some("17601".into()),
            model: Some("not-sure".into()),
            start: NaiveDate::from_ymd_opt(2026, 11, 2),
            customer_type: Some(CustomerType::CompanyContractor),
            company: Some("Acme Roofing".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            phone: Some("717-425-2683".into()),
            ..Default::default()
        }
    }

    #[test]
    fn through_must_be_an_input_step() {
        assert_eq!(stop_step(None).unwrap().number(), 5);
        assert_eq!(stop_step(Some(2)).unwrap().number(), 2);
        assert!(stop_step(Some(0)).is_err());
        assert!(stop_step(Some(6)).is_err());
    }

    #[tokio::test]
    async fn full_request_completes() {
        let store = MockLeadStore::new();
        let persistence = MemoryPersistence::new();
        let stop = stop_step(None).unwrap();
        let form = drive(store.clone(), persistence.clone(), &full_args(), stop)
            .await
            .unwrap();

        assert!(form.is_completed());
        assert!(form.location_result().is_some());
        assert_eq!(store.create_count(), 1);
        assert_eq!(store.update_count(), 4);
        assert_eq!(persistence.peek(LEAD_KEY), None);
    }

    #[tokio::test]
    async fn partial_run_then_resume_updates_same_lead() {
        let store = MockLeadStore::new();
        let persistence = MemoryPersistence::new();
        store.queue_success("L1");

        let stop = stop_step(Some(2)).unwrap();
        let form = drive(store.clone(), persistence.clone(), &full_args(), stop)
            .await
            .unwrap();
        assert_eq!(form.current_step().number(), 3);
        assert_eq!(persistence.peek(LEAD_KEY).as_deref(), Some("L1"));

        let stop = stop_step(None).unwrap();
        let form = drive(store.clone(), persistence.clone(), &full_args(), stop)
            .await
            .unwrap();
        assert!(form.is_completed());
        assert_eq!(store.create_count(), 1);
    }

    #[tokio::test]
    async fn missing_fields_stop_at_the_failing_step() {
        let args = DraftArgs {
            zip: Some("17601".into()),
            ..Default::default()
        };
        let store = MockLeadStore::new();
        let stop = stop_step(None).unwrap();
        let result = drive(store.clone(), MemoryPersistence::new(), &args, stop).await;

        let err = result.err().unwrap();
        assert!(err.to_string().contains("step 2"));
        assert_eq!(store.calls().len(), 1);
    }

    #[tokio::test]
    async fn rate_limited_step_asks_to_retry() {
        let store = MockLeadStore::new();
        store.queue_http_error(429, "Too many requests");
        let stop = stop_step(None).unwrap();

        let err = drive(store.clone(), MemoryPersistence::new(), &full_args(), stop)
            .await
            .err()
            .unwrap();

        assert!(err.to_string().contains("try again shortly"));
        assert_eq!(store.create_count(), 1);
    }

    #[tokio::test]
    async fn rejected_zip_is_not_retryable() {
        let store = MockLeadStore::new();
        store.queue_http_error(400, "Invalid zip code");
        let stop = stop_step(None).unwrap();

        let err = drive(store, MemoryPersistence::new(), &full_args(), stop)
            .await
            .err()
            .unwrap();

        assert!(!err.to_string().contains("try again"));
    }
}
