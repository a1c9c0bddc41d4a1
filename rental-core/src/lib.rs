//! # rental-core
//!
//! Pure logic for the EquipRent rental request flow (no I/O, instant tests).
//!
//! This crate implements the step validator, input normalization, payload
//! construction, and the form state machine without any network or disk
//! I/O, enabling fast unit tests.
//!
//! ## Design Philosophy
//!
//! All modules in this crate are **pure** - they take input and produce output
//! without side effects. This enables:
//! - Instant unit tests (no mocks, no async)
//! - Deterministic behavior (same input → same output)
//! - Easy reasoning about step transitions
//!
//! The actual I/O (lead backend calls, draft persistence) is performed by
//! `rental-client`, which interprets the actions produced by [`FormState`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod machine;
pub mod messages;
pub mod normalize;
pub mod payload;
pub mod step;
pub mod validate;

pub use machine::{Action, Event, FormState, RemoteOp};
pub use payload::build_payload;
pub use step::{FormStep, StepError};
pub use validate::{validate_step, Field, FieldErrors};
