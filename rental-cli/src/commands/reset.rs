//! Discard the saved draft.

use anyhow::{Context, Result};
use equiprent_client::DraftPersistence;

use super::Session;

/// Run the reset command.
pub async fn run(session: &Session) -> Result<()> {
    let persistence = session.persistence();
    persistence
        .clear()
        .await
        .context("Failed to discard saved draft")?;

    println!("Saved draft discarded. The next request starts a new lead.");
    Ok(())
}
