//! Equipment catalog collaborator (read-only).

use async_trait::async_trait;
use equiprent_types::{EquipmentModel, EquipmentOption};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not be fetched.
    #[error("catalog fetch failed: {0}")]
    Fetch(String),

    /// Reading a catalog file failed.
    #[error("failed to read catalog {path}: {source}")]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not a list of models.
    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Source of equipment models for the equipment step.
#[async_trait]
pub trait EquipmentCatalog: Send + Sync {
    /// All models, in display order.
    async fn models(&self) -> Result<Vec<EquipmentModel>, CatalogError>;
}

/// Fixed list of models.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    models: Vec<EquipmentModel>,
}

impl StaticCatalog {
    /// Catalog serving the given models.
    pub fn new(models: Vec<EquipmentModel>) -> Self {
        Self { models }
    }
}

#[async_trait]
impl EquipmentCatalog for StaticCatalog {
    async fn models(&self) -> Result<Vec<EquipmentModel>, CatalogError> {
        Ok(self.models.clone())
    }
}

/// Catalog read from a JSON file holding an array of models.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    /// Catalog backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the catalog file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EquipmentCatalog for JsonFileCatalog {
    async fn models(&self) -> Result<Vec<EquipmentModel>, CatalogError> {
        let contents =
            tokio::fs::read_to_string(&self.path)
                .await
                .map_err(|source| CatalogError::Read {
                    path: self.path.clone(),
                    source,
                })?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Options for the equipment step: one per model, then "not sure".
pub fn equipment_options(models: &[EquipmentModel]) -> Vec<EquipmentOption> {
    models
        .iter()
        .map(EquipmentOption::from_model)
        .chain(std::iter::once(EquipmentOption::not_sure()))
        .collect()
}
