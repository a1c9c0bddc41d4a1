//! CLI command implementations.

pub mod check;
pub mod equipment;
pub mod init;
pub mod ping;
pub mod request;
pub mod reset;
pub mod status;

use chrono::NaiveDate;
use clap::Args;
use equiprent_client::{ClientConfig, FieldEdit, FilePersistence};
use equiprent_core::normalize::project_type_slug;
use equiprent_core::FieldErrors;
use equiprent_types::{CustomerType, EquipmentSelection};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{draft_path, AppConfig};

/// Everything a command needs to know about where and how to run.
#[derive(Debug, Clone)]
pub struct Session {
    /// Data directory holding `config.toml` and the draft file.
    pub data_dir: PathBuf,
    /// Loaded configuration.
    pub config: AppConfig,
    /// Resolved backend URL.
    pub api_base: String,
    /// Use the in-process mock backend.
    pub mock: bool,
}

impl Session {
    /// Build a session, resolving the backend URL against the config file.
    pub fn new(data_dir: &Path, config: AppConfig, api_override: Option<&str>, mock: bool) -> Self {
        let api_base = config.api_base(api_override);
        debug!(data_dir = %data_dir.display(), api_base = %api_base, mock, "Session resolved");
        Self {
            data_dir: data_dir.to_path_buf(),
            config,
            api_base,
            mock,
        }
    }

    /// Client configuration for the resolved backend.
    pub fn client_config(&self) -> ClientConfig {
        self.config.client_config(&self.api_base)
    }

    /// Draft persistence in the data directory.
    pub fn persistence(&self) -> FilePersistence {
        FilePersistence::new(draft_path(&self.data_dir))
    }
}

/// Draft fields settable from the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct DraftArgs {
    /// ZIP code of the job site
    #[arg(long)]
    pub zip: Option<String>,

    /// Equipment model id, or "not-sure" for help choosing
    #[arg(long)]
    pub model: Option<String>,

    /// Rental start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Rental end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Renter type: company (contractor) or individual (homeowner)
    #[arg(long = "customer-type")]
    pub customer_type: Option<CustomerType>,

    /// Company name (company renters only)
    #[arg(long)]
    pub company: Option<String>,

    /// Project type, e.g. "Roofing" or "general-construction"
    #[arg(long = "project-type")]
    pub project_type: Option<String>,

    /// First name
    #[arg(long = "first-name")]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long = "last-name")]
    pub last_name: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone (10 digits, punctuation ignored)
    #[arg(long)]
    pub phone: Option<String>,

    /// Comments (up to 255 characters)
    #[arg(long)]
    pub comments: Option<String>,
}

impl DraftArgs {
    /// Field edits for every flag that was given, in form order.
    pub fn edits(&self) -> Vec<FieldEdit> {
        let mut edits = Vec::new();
        if let Some(zip) = &self.zip {
            edits.push(FieldEdit::ZipCode(zip.clone()));
        }
        if let Some(model) = &self.model {
            edits.push(FieldEdit::Equipment(EquipmentSelection::from_value(model)));
        }
        if self.start.is_some() {
            edits.push(FieldEdit::StartDate(self.start));
        }
        if self.end.is_some() {
            edits.push(FieldEdit::EndDate(self.end));
        }
        if self.customer_type.is_some() {
            edits.push(FieldEdit::CustomerType(self.customer_type));
        }
        if let Some(company) = &self.company {
            edits.push(FieldEdit::CompanyName(company.clone()));
        }
        if let Some(project_type) = &self.project_type {
            edits.push(FieldEdit::ProjectType(Some(project_type_slug(project_type))));
        }
        if let Some(first_name) = &self.first_name {
            edits.push(FieldEdit::FirstName(first_name.clone()));
        }
        if let Some(last_name) = &self.last_name {
            edits.push(FieldEdit::LastName(last_name.clone()));
        }
        if let Some(email) = &self.email {
            edits.push(FieldEdit::Email(email.clone()));
        }
        if let Some(phone) = &self.phone {
            edits.push(FieldEdit::Phone(phone.clone()));
        }
        if let Some(comments) = &self.comments {
            edits.push(FieldEdit::Comments(comments.clone()));
        }
        edits
    }
}

/// Print inline field errors, one per line.
pub fn print_field_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        println!("  {:<13} {}", format!("{field}:"), message);
    }
}
