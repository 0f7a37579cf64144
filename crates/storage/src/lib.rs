//! Storage layer for crimestat
//!
//! PostgreSQL record store via sqlx, plus an in-memory store with the same
//! ordering and key semantics.

pub mod backend;
pub mod error;
mod memory;
pub mod pg_migrations;
mod pg_storage;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_migrations::run_pg_migrations;
pub use pg_storage::PgStorage;
pub use traits::CrimeStore;
