use std::sync::Arc;

use crimestat_core::{
    CrimeInput, CrimeRecord, CrimeSummary, RecordFilter, UNIQUE_KEY_MESSAGE, ValidationErrors,
    ValidationMode, ValidationThresholds, validate_record,
};
use crimestat_storage::{CrimeStore, StorageBackend, StorageError};

use crate::ServiceError;

/// Maps a (state, year) collision to the validation error callers see.
fn map_duplicate(err: StorageError) -> ServiceError {
    if err.is_duplicate() {
        ValidationErrors::non_field(UNIQUE_KEY_MESSAGE).into()
    } else {
        err.into()
    }
}

fn record_not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("No crime record with id {id}"))
}

pub struct CrimeService {
    storage: Arc<StorageBackend>,
    thresholds: ValidationThresholds,
}

impl CrimeService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, thresholds: ValidationThresholds) -> Self {
        Self { storage, thresholds }
    }

    pub async fn list(&self, filter: &RecordFilter) -> Result<Vec<CrimeSummary>, ServiceError> {
        let rows = self.storage.list_records(filter).await?;
        Ok(rows.iter().map(CrimeRecord::summary).collect())
    }

    pub async fn get(&self, id: i64) -> Result<CrimeRecord, ServiceError> {
        self.storage.get_record(id).await?.ok_or_else(|| record_not_found(id))
    }

    /// Validate on the lightweight path and insert.
    pub async fn create(&self, input: CrimeInput) -> Result<CrimeRecord, ServiceError> {
        let input = validate_record(input, ValidationMode::Create, self.thresholds)?;
        let record = self.storage.insert_record(&input).await.map_err(map_duplicate)?;
        tracing::info!(id = record.id, state = %record.state(), year = record.year(), "crime record created");
        Ok(record)
    }

    /// Validate on the full path and replace every field of an existing record.
    pub async fn update(&self, id: i64, input: CrimeInput) -> Result<CrimeRecord, ServiceError> {
        if self.storage.get_record(id).await?.is_none() {
            return Err(record_not_found(id));
        }
        let input = validate_record(input, ValidationMode::Full, self.thresholds)?;
        let record = self
            .storage
            .update_record(id, &input)
            .await
            .map_err(map_duplicate)?
            .ok_or_else(|| record_not_found(id))?;
        tracing::info!(id, state = %record.state(), year = record.year(), "crime record updated");
        Ok(record)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        if !self.storage.delete_record(id).await? {
            return Err(record_not_found(id));
        }
        tracing::info!(id, "crime record deleted");
        Ok(())
    }
}
