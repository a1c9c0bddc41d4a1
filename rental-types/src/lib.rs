//! # rental-types
//!
//! Data model and wire format types for the EquipRent rental request flow.
//!
//! This crate provides the foundational types used across all EquipRent crates:
//! - [`LeadId`], [`RequestId`] - Identity types for leads and API requests
//! - [`RentalDraft`] - The in-progress rental request held by the client
//! - [`LeadPayload`], [`LeadEnvelope`], [`LeadReceipt`] - Lead backend wire format
//! - [`EquipmentModel`], [`EquipmentOption`] - Equipment catalog entries
//! - [`LeadErrorKind`] - Typed classification of remote failures

#![warn(missing_docs)]
#![warn(clippy::all)]

mod catalog;
mod draft;
mod error;
mod ids;
mod location;
mod payload;

pub use catalog::{EquipmentModel, EquipmentOption, VideoSource};
pub use draft::{
    Contact, CustomerType, DateRange, EquipmentSelection, LeadStatus, RentalDraft, NOT_SURE,
};
pub use error::{LeadErrorKind, TypesError};
pub use ids::{LeadId, RequestId};
pub use location::NearestLocation;
pub use payload::{LeadData, LeadEnvelope, LeadPayload, LeadReceipt};
