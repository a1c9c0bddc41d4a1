//! Write a default configuration file.

use anyhow::Result;
use std::path::Path;

use crate::config::{config_path, AppConfig};

/// Run the init command.
pub async fn run(data_dir: &Path, api_base: Option<&str>, force: bool) -> Result<()> {
    if AppConfig::exists(data_dir) && !force {
        anyhow::bail!(
            "Already initialized. Delete {} or pass --force to overwrite.",
            config_path(data_dir).display()
        );
    }

    let mut config = AppConfig::default();
    if let Some(base) = api_base {
        config.api.base_url = base.to_string();
    }
    config.save(data_dir).await?;

    println!("Configuration written!");
    println!();
    println!("  Config:   {}", config_path(data_dir).display());
    println!("  Backend:  {}", config.api.base_url);
    println!("  Data dir: {}", data_dir.display());
    println!();
    println!("Next steps:");
    println!("  1. Browse equipment:  equiprent equipment");
    println!("  2. Request a rental:  equiprent request --zip <zip> ...");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn init_writes_config() {
        let dir = tempdir().unwrap();
        run(dir.path(), Some("https://leads.example.com"), false)
            .await
            .unwrap();

        let config = AppConfig::load(dir.path()).unwrap();
        assert_eq!(config.api.base_url, "https://leads.example.com");
    }

    #[tokio::test]
    async fn init_refuses_to_overwrite_without_force() {
        let dir = tempdir().unwrap();
        run(dir.path(), None, false).await.unwrap();

        assert!(run(dir.path(), None, false).await.is_err());
        assert!(run(dir.path(), Some("https://new.example.com"), true)
            .await
            .is_ok());
        assert_eq!(
            AppConfig::load(dir.path()).unwrap().api.base_url,
            "https://new.example.com"
        );
    }
}
