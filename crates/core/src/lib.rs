//! Onboarding Core - Shared profile schema library.
//!
//! This crate provides the types and rules shared by every onboarding
//! component:
//! - `server` - HTTP API that validates and stores profiles
//! - `client` - Form model, local validation and submission client
//! - `cli` - Command-line tools for migrations and submissions
//!
//! # Architecture
//!
//! The core crate contains only types, rules and pure functions - no I/O,
//! no database access, no HTTP clients. Client and server validate against
//! the same declarations so their rules cannot drift apart.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, emails, personas and tag enumerations
//! - [`schema`] - Field bounds, messages and format checks
//! - [`errors`] - Field-level validation errors
//! - [`payload`] - Blank-field cleaning for submitted payloads
//! - [`profile`] - Investor and startup records
//! - [`api`] - Request/response envelopes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod errors;
pub mod payload;
pub mod profile;
pub mod schema;
pub mod types;

pub use errors::{FieldError, FieldErrors, SUBMIT_FIELD, ValidationErrors};
pub use payload::{Payload, clean_payload};
pub use profile::{Investor, NewInvestor, NewStartup, Startup};
pub use types::*;
