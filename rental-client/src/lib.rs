//! # rental-client
//!
//! Client library for the EquipRent rental request flow.
//!
//! This is the library presentation layers embed to run the multi-step
//! rental form against the lead backend.
//!
//! ## Features
//!
//! - **Form Controller**: validates, syncs, and advances steps, with
//!   self-healing recreate when a saved lead has vanished server-side
//! - **Lead Store Abstraction**: pluggable backend port (HTTP, mock)
//! - **Draft Persistence**: the lead id survives restarts (memory, JSON file)
//! - **Pure State Machine**: uses rental-core for side-effect-free logic
//!
//! ## Example
//!
//! ```ignore
//! use equiprent_client::{ClientConfig, FieldEdit, FilePersistence, HttpLeadStore, RentalFormController};
//!
//! let store = HttpLeadStore::new(ClientConfig::new("https://api.example.com"))?;
//! let persistence = FilePersistence::new("draft.json");
//! let mut form = RentalFormController::mount(store, persistence).await;
//!
//! form.update_field(FieldEdit::ZipCode("17601".into()));
//! let result = form.advance().await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod persistence;
pub mod store;

pub use catalog::{
    equipment_options, CatalogError, EquipmentCatalog, JsonFileCatalog, StaticCatalog,
};
pub use config::{ClientConfig, ConfigError, DEFAULT_API_BASE};
pub use controller::{FieldEdit, RentalFormController, StepResult};
pub use persistence::{
    DraftPersistence, FilePersistence, MemoryPersistence, PersistenceError, PersistenceOp, LEAD_KEY,
};
pub use store::{HttpLeadStore, LeadStore, MockLeadStore, StoreCall, StoreError};
