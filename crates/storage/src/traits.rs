//! Storage backend trait abstraction.
//!
//! The store only selects rows (by id, year, state or state set) and enforces the
//! (state, year) key. Metric filtering and ranking live in `crimestat_core::analytics`.

use async_trait::async_trait;
use crimestat_core::{CrimeInput, CrimeRecord, RecordFilter};

use crate::error::StorageError;

/// CRUD and selection queries over crime records.
#[async_trait]
pub trait CrimeStore: Send + Sync {
    /// Insert a validated record. Fails with `Duplicate` when (state, year) exists.
    async fn insert_record(&self, input: &CrimeInput) -> Result<CrimeRecord, StorageError>;

    /// Get record by ID.
    async fn get_record(&self, id: i64) -> Result<Option<CrimeRecord>, StorageError>;

    /// Replace every field of a record. Returns `None` if the ID does not exist.
    async fn update_record(
        &self,
        id: i64,
        input: &CrimeInput,
    ) -> Result<Option<CrimeRecord>, StorageError>;

    /// Delete record by ID. Returns `true` if deleted.
    async fn delete_record(&self, id: i64) -> Result<bool, StorageError>;

    /// Filtered listing, ordered by year descending then state.
    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<CrimeRecord>, StorageError>;

    /// All records for a year, ordered by state then ID.
    async fn records_for_year(&self, year: i32) -> Result<Vec<CrimeRecord>, StorageError>;

    /// All records of one state (case-insensitive exact match), ordered by year.
    async fn records_for_state(&self, state: &str) -> Result<Vec<CrimeRecord>, StorageError>;

    /// Records for any of `states` (case-insensitive exact match) in `year`,
    /// ordered by state then ID.
    async fn records_for_states(
        &self,
        states: &[String],
        year: i32,
    ) -> Result<Vec<CrimeRecord>, StorageError>;

    /// Exact (state, year) key lookup.
    async fn find_by_key(
        &self,
        state: &str,
        year: i32,
    ) -> Result<Option<CrimeRecord>, StorageError>;

    /// Delete every record. Returns the number removed.
    async fn clear_records(&self) -> Result<u64, StorageError>;

    /// Number of stored records.
    async fn count_records(&self) -> Result<u64, StorageError>;
}
