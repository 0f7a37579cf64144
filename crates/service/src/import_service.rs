//! Bulk import and offline checking of JSON record files.

use std::sync::Arc;

use crimestat_core::{
    CrimeInput, ValidationErrors, ValidationMode, ValidationThresholds, validate_record,
};
use crimestat_storage::{CrimeStore, StorageBackend};
use serde::Serialize;

use crate::ServiceError;

/// Outcome counters of a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub loaded: usize,
    /// Entries whose (state, year) already existed
    pub skipped: usize,
    /// Entries rejected by validation
    pub errors: usize,
}

/// Violations found in one entry of a file under check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryViolations {
    /// Zero-based position in the input array
    pub index: usize,
    pub state: String,
    pub year: i32,
    pub errors: ValidationErrors,
}

/// Decode a JSON array of records.
pub fn parse_records(json: &str) -> Result<Vec<CrimeInput>, ServiceError> {
    Ok(serde_json::from_str(json)?)
}

/// Run every entry through the full rule set without touching storage.
#[must_use]
pub fn check_records(
    entries: &[CrimeInput],
    thresholds: ValidationThresholds,
) -> Vec<EntryViolations> {
    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            validate_record(entry.clone(), ValidationMode::Full, thresholds).err().map(|errors| {
                EntryViolations { index, state: entry.state.clone(), year: entry.year, errors }
            })
        })
        .collect()
}

pub struct ImportService {
    storage: Arc<StorageBackend>,
    thresholds: ValidationThresholds,
}

impl ImportService {
    #[must_use]
    pub const fn new(storage: Arc<StorageBackend>, thresholds: ValidationThresholds) -> Self {
        Self { storage, thresholds }
    }

    /// Insert every valid entry whose key is not taken yet.
    ///
    /// Invalid entries and existing keys are counted and logged, not fatal. Storage
    /// failures other than a key collision abort the import.
    pub async fn import_records(
        &self,
        entries: Vec<CrimeInput>,
        clear: bool,
    ) -> Result<ImportReport, ServiceError> {
        if clear {
            let removed = self.storage.clear_records().await?;
            tracing::info!(removed, "cleared existing crime records");
        }

        let mut report = ImportReport::default();
        for (index, entry) in entries.into_iter().enumerate() {
            let input = match validate_record(entry, ValidationMode::Create, self.thresholds) {
                Ok(input) => input,
                Err(errors) => {
                    tracing::warn!(index, %errors, "import entry rejected");
                    report.errors += 1;
                    continue;
                },
            };

            if self.storage.find_by_key(&input.state, input.year).await?.is_some() {
                tracing::warn!(index, state = %input.state, year = input.year, "import entry already exists, skipping");
                report.skipped += 1;
                continue;
            }

            match self.storage.insert_record(&input).await {
                Ok(_) => report.loaded += 1,
                Err(e) if e.is_duplicate() => {
                    tracing::warn!(index, state = %input.state, year = input.year, "import entry inserted concurrently, skipping");
                    report.skipped += 1;
                },
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            loaded = report.loaded,
            skipped = report.skipped,
            errors = report.errors,
            "import finished"
        );
        Ok(report)
    }

    pub async fn import_json(&self, json: &str, clear: bool) -> Result<ImportReport, ServiceError> {
        self.import_records(parse_records(json)?, clear).await
    }
}
