//! List equipment options for the equipment step.

use anyhow::{Context, Result};
use equiprent_client::{
    equipment_options, EquipmentCatalog, HttpLeadStore, JsonFileCatalog, StaticCatalog,
};
use equiprent_types::{EquipmentModel, EquipmentOption};
use std::path::Path;

use super::Session;

/// Run the equipment command.
///
/// Reads models from `catalog` when given, the built-in list in mock mode,
/// and `GET /models` otherwise.
pub async fn run(session: &Session, catalog: Option<&Path>) -> Result<()> {
    let models = match catalog {
        Some(path) => JsonFileCatalog::new(path)
            .models()
            .await
            .with_context(|| format!("Failed to load catalog {}", path.display()))?,
        None if session.mock => StaticCatalog::new(demo_models()).models().await?,
        None => {
            let store = HttpLeadStore::new(session.client_config())
                .with_context(|| format!("Invalid lead backend URL: {:?}", session.api_base))?;
            store
                .models()
                .await
                .context("Failed to fetch equipment models")?
        }
    };

    let options = equipment_options(&models);
    println!("Equipment ({} models):", models.len());
    println!();
    for option in &options {
        print_option(option);
    }
    Ok(())
}

fn print_option(option: &EquipmentOption) {
    println!("  {:<12} {}", option.value, option.label);
    if !option.description.is_empty() {
        println!("  {:<12} {}", "", option.description);
    }
    if let Some(video) = option.video.as_deref() {
        println!("  {:<12} Video: {}", "", video);
    }
}

/// Models served in mock mode.
fn demo_models() -> Vec<EquipmentModel> {
    vec![
        EquipmentModel {
            id: "demo-4100".to_string(),
            code: "4100".to_string(),
            name: "Equipter 4100".to_string(),
            blurb: "Compact lift for residential roofing".to_string(),
            ..Default::default()
        },
        EquipmentModel {
            id: "demo-rb4000".to_string(),
            code: "RB4000".to_string(),
            name: "Equipter RB4000".to_string(),
            blurb: "Self-propelled material handling".to_string(),
            ..Default::default()
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use tempfile::tempdir;

    #[tokio::test]
    async fn mock_mode_lists_demo_models() {
        let dir = tempdir().unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, true);
        assert!(run(&session, None).await.is_ok());
    }

    #[tokio::test]
    async fn catalog_file_is_used() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");
        std::fs::write(&path, r#"[{"sfid":"a1","code__c":"4100"}]"#).unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, false);

        assert!(run(&session, Some(&path)).await.is_ok());
    }

    #[tokio::test]
    async fn missing_catalog_file_fails() {
        let dir = tempdir().unwrap();
        let session = Session::new(dir.path(), AppConfig::default(), None, true);
        let result = run(&session, Some(&dir.path().join("missing.json"))).await;
        assert!(result.is_err());
    }

    #[test]
    fn demo_models_have_codes() {
        let options = equipment_options(&demo_models());
        assert_eq!(options[0].label, "Equipter 4100");
        assert!(options.last().unwrap().is_not_sure());
    }
}
