//! Show configuration and saved draft state.

use anyhow::Result;
use equiprent_client::{DraftPersistence, LEAD_KEY};

use super::Session;
use crate::config::{config_path, AppConfig};

/// Run the status command.
pub async fn run(session: &Session) -> Result<()> {
    println!("=== equiprent status ===");
    println!();

    println!("Configuration:");
    if AppConfig::exists(&session.data_dir) {
        println!("  File:     {}", config_path(&session.data_dir).display());
    } else {
        println!("  File:     NOT INITIALIZED (using defaults)");
    }
    println!("  Backend:  {}", session.api_base);
    println!(
        "  Timeouts: {}s (replacement create: {}s)",
        session.config.api.timeout_secs, session.config.api.recreate_timeout_secs
    );
    if session.mock {
        println!("  Mode:     mock backend");
    }
    println!();

    let persistence = session.persistence();
    println!("Draft:");
    match persistence.get(LEAD_KEY).await {
        Ok(Some(lead)) => {
            println!("  Lead:     {lead}");
            println!();
            println!("Run 'equiprent request' to continue, or 'equiprent reset' to start over.");
        }
        Ok(None) => {
            println!("  Lead:     none");
        }
        Err(e) => {
            println!("  Lead:     unreadable ({e})");
            println!();
            println!("Run 'equiprent reset' to discard the saved draft.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn status_without_init() {
        let dir = tempdir().unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, false);

        // Should succeed but show defaults
        assert!(run(&session).await.is_ok());
    }

    #[tokio::test]
    async fn status_with_saved_lead() {
        let dir = tempdir().unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, true);
        session.persistence().set(LEAD_KEY, "L1").await.unwrap();

        assert!(run(&session).await.is_ok());
    }

    #[tokio::test]
    async fn status_with_corrupt_draft_still_succeeds() {
        let dir = tempdir().unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, false);
        std::fs::write(session.persistence().path(), "{{").unwrap();

        assert!(run(&session).await.is_ok());
    }
}
