//! Core types for crimestat
//!
//! Domain records, validation rules, configuration and the pure analytic
//! functions shared by the storage, service and HTTP crates.

#![allow(clippy::cast_precision_loss, reason = "Counts and totals are far below 2^52")]

pub mod analytics;
mod config;
mod constants;
mod crime_type;
mod env_config;
mod error;
mod record;
mod validation;

pub use config::*;
pub use constants::*;
pub use crime_type::*;
pub use env_config::*;
pub use error::*;
pub use record::*;
pub use validation::*;
