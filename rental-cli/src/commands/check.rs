//! Validate draft fields offline.

use anyhow::Result;
use equiprent_core::normalize::{comments_remaining, project_type_label, PROJECT_TYPES};
use equiprent_core::{build_payload, validate_step, FormStep};
use equiprent_types::RentalDraft;

use super::{print_field_errors, DraftArgs};

/// Run the check command.
///
/// Runs every step's validator against the given fields without
/// contacting the backend. Fails if any step is incomplete.
pub fn run(args: &DraftArgs, show_payload: bool) -> Result<()> {
    let draft = draft_from(args);
    let mut incomplete = 0;

    for step in FormStep::input_steps() {
        match validate_step(&draft, step) {
            Ok(()) => println!("Step {step}: ok"),
            Err(errors) => {
                incomplete += 1;
                println!("Step {step}: incomplete");
                print_field_errors(&errors);
            }
        }
    }

    for note in notes(&draft) {
        println!("{note}");
    }

    if show_payload {
        let payload = build_payload(&draft, FormStep::new(FormStep::LAST_INPUT)?);
        println!();
        println!("{}", payload.to_json()?);
    }

    if incomplete > 0 {
        anyhow::bail!("{incomplete} step(s) incomplete");
    }
    Ok(())
}

/// Advisory lines for optional fields; these never fail the check.
fn notes(draft: &RentalDraft) -> Vec<String> {
    let mut notes = Vec::new();
    if let Some(slug) = draft.project_type.as_deref() {
        let label = project_type_label(slug);
        if PROJECT_TYPES.iter().any(|listed| *listed == label) {
            notes.push(format!("Project type: {label}"));
        } else {
            notes.push(format!(
                "Project type: {slug} (not a listed type: {})",
                PROJECT_TYPES.join(", ")
            ));
        }
    }
    if !draft.contact.comments.is_empty() {
        notes.push(format!(
            "Comments: {} characters left",
            comments_remaining(&draft.contact.comments)
        ));
    }
    notes
}

fn draft_from(args: &DraftArgs) -> RentalDraft {
    let mut draft = RentalDraft::new();
    for edit in args.edits() {
        edit.apply(&mut draft);
    }
    draft
}
