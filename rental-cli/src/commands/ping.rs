//! Check connectivity to the lead backend.

use anyhow::{Context, Result};
use equiprent_client::HttpLeadStore;

use super::Session;

/// Run the ping command.
pub async fn run(session: &Session) -> Result<()> {
    if session.mock {
        println!("Mock backend: always reachable");
        return Ok(());
    }

    let store = HttpLeadStore::new(session.client_config())
        .with_context(|| format!("Invalid lead backend URL: {:?}", session.api_base))?;
    println!("Testing {} ...", store.url("models"));

    let elapsed = store
        .ping()
        .await
        .with_context(|| format!("Lead backend at {} is not reachable", session.api_base))?;
    println!("Reachable ({} ms)", elapsed.as_millis());
    Ok(())
}
