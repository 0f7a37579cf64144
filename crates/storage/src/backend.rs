//! Unified storage backend with enum dispatch.

use async_trait::async_trait;
use crimestat_core::{CrimeInput, CrimeRecord, RecordFilter};

use crate::error::StorageError;
use crate::memory::MemoryStorage;
use crate::pg_storage::PgStorage;
use crate::traits::CrimeStore;

macro_rules! dispatch {
    ($self:expr, $method:ident ( $($arg:expr),* $(,)? )) => {
        match $self {
            StorageBackend::Postgres(s) => <PgStorage as CrimeStore>::$method(s, $($arg),*).await,
            StorageBackend::Memory(s) => <MemoryStorage as CrimeStore>::$method(s, $($arg),*).await,
        }
    };
}

#[derive(Clone, Debug)]
pub enum StorageBackend {
    Postgres(PgStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub async fn new_postgres(database_url: &str) -> Result<Self, StorageError> {
        Ok(Self::Postgres(PgStorage::new(database_url).await?))
    }

    #[must_use]
    pub fn new_memory() -> Self {
        Self::Memory(MemoryStorage::new())
    }

    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }
}

#[async_trait]
impl CrimeStore for StorageBackend {
    async fn insert_record(&self, input: &CrimeInput) -> Result<CrimeRecord, StorageError> {
        dispatch!(self, insert_record(input))
    }

    async fn get_record(&self, id: i64) -> Result<Option<CrimeRecord>, StorageError> {
        dispatch!(self, get_record(id))
    }

    async fn update_record(
        &self,
        id: i64,
        input: &CrimeInput,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        dispatch!(self, update_record(id, input))
    }

    async fn delete_record(&self, id: i64) -> Result<bool, StorageError> {
        dispatch!(self, delete_record(id))
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<CrimeRecord>, StorageError> {
        dispatch!(self, list_records(filter))
    }

    async fn records_for_year(&self, year: i32) -> Result<Vec<CrimeRecord>, StorageError> {
        dispatch!(self, records_for_year(year))
    }

    async fn records_for_state(&self, state: &str) -> Result<Vec<CrimeRecord>, StorageError> {
        dispatch!(self, records_for_state(state))
    }

    async fn records_for_states(
        &self,
        states: &[String],
        year: i32,
    ) -> Result<Vec<CrimeRecord>, StorageError> {
        dispatch!(self, records_for_states(states, year))
    }

    async fn find_by_key(
        &self,
        state: &str,
        year: i32,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        dispatch!(self, find_by_key(state, year))
    }

    async fn clear_records(&self) -> Result<u64, StorageError> {
        dispatch!(self, clear_records())
    }

    async fn count_records(&self) -> Result<u64, StorageError> {
        dispatch!(self, count_records())
    }
}
