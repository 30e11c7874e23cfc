//! Core types for onboarding profiles.
//!
//! This module provides type-safe wrappers for the domain's identities,
//! addresses and fixed enumerations.

pub mod email;
pub mod id;
pub mod persona;
pub mod tags;

pub use email::{Email, EmailError};
pub use id::{IdParseError, InvestorId, StartupId};
pub use persona::Persona;
pub use tags::{BusinessModel, Industry, InvestmentStage, Sector, StartupStage, Tag, UnknownTag};
