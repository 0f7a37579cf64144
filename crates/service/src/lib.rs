//! Service layer for crimestat
//!
//! Centralizes validation, analytics and import logic between HTTP/CLI and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod analytics_service;
mod crime_service;
mod error;
mod import_service;
#[cfg(test)]
mod test_support;

pub use analytics_service::{
    AnalyticsService, ComparisonParams, CrimeTypeParams, SafestParams, ThresholdParams,
    TrendParams, split_states,
};
pub use crime_service::CrimeService;
pub use error::ServiceError;
pub use import_service::{
    EntryViolations, ImportReport, ImportService, check_records, parse_records,
};
