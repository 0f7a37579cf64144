//! In-process record store.
//!
//! Same ordering and key semantics as the PostgreSQL backend. Used by
//! `serve --memory` and by service/HTTP tests that run without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use crimestat_core::{CrimeInput, CrimeRecord, RecordFilter};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::CrimeStore;

#[derive(Debug, Default)]
struct MemoryTable {
    next_id: i64,
    rows: BTreeMap<i64, CrimeRecord>,
}

impl MemoryTable {
    fn key_taken(&self, state: &str, year: i32, except: Option<i64>) -> bool {
        self.rows
            .values()
            .any(|r| Some(r.id) != except && r.state() == state && r.year() == year)
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id = self.next_id.saturating_add(1);
        self.next_id
    }
}

fn duplicate(input: &CrimeInput) -> StorageError {
    StorageError::Duplicate(format!("crime record for {} {} already exists", input.state, input.year))
}

fn sort_by_state(rows: &mut [CrimeRecord]) {
    rows.sort_by(|a, b| a.state().cmp(b.state()).then(a.id.cmp(&b.id)));
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    table: Arc<RwLock<MemoryTable>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CrimeStore for MemoryStorage {
    async fn insert_record(&self, input: &CrimeInput) -> Result<CrimeRecord, StorageError> {
        let mut table = self.table.write().await;
        if table.key_taken(&input.state, input.year, None) {
            return Err(duplicate(input));
        }
        let id = table.allocate_id();
        let record = CrimeRecord::new(id, input.clone());
        table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn get_record(&self, id: i64) -> Result<Option<CrimeRecord>, StorageError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn update_record(
        &self,
        id: i64,
        input: &CrimeInput,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        if table.key_taken(&input.state, input.year, Some(id)) {
            return Err(duplicate(input));
        }
        let record = CrimeRecord::new(id, input.clone());
        table.rows.insert(id, record.clone());
        Ok(Some(record))
    }

    async fn delete_record(&self, id: i64) -> Result<bool, StorageError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<CrimeRecord>, StorageError> {
        let table = self.table.read().await;
        let mut rows: Vec<CrimeRecord> =
            table.rows.values().filter(|r| filter.matches(r)).cloned().collect();
        rows.sort_by(|a, b| {
            b.year().cmp(&a.year()).then_with(|| a.state().cmp(b.state())).then(a.id.cmp(&b.id))
        });
        Ok(rows)
    }

    async fn records_for_year(&self, year: i32) -> Result<Vec<CrimeRecord>, StorageError> {
        let table = self.table.read().await;
        let mut rows: Vec<CrimeRecord> =
            table.rows.values().filter(|r| r.year() == year).cloned().collect();
        sort_by_state(&mut rows);
        Ok(rows)
    }

    async fn records_for_state(&self, state: &str) -> Result<Vec<CrimeRecord>, StorageError> {
        let wanted = state.to_lowercase();
        let table = self.table.read().await;
        let mut rows: Vec<CrimeRecord> =
            table.rows.values().filter(|r| r.state().to_lowercase() == wanted).cloned().collect();
        rows.sort_by(|a, b| a.year().cmp(&b.year()).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn records_for_states(
        &self,
        states: &[String],
        year: i32,
    ) -> Result<Vec<CrimeRecord>, StorageError> {
        let wanted: Vec<String> = states.iter().map(|s| s.to_lowercase()).collect();
        let table = self.table.read().await;
        let mut rows: Vec<CrimeRecord> = table
            .rows
            .values()
            .filter(|r| r.year() == year && wanted.contains(&r.state().to_lowercase()))
            .cloned()
            .collect();
        sort_by_state(&mut rows);
        Ok(rows)
    }

    async fn find_by_key(
        &self,
        state: &str,
        year: i32,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|r| r.state() == state && r.year() == year).cloned())
    }

    async fn clear_records(&self) -> Result<u64, StorageError> {
        let mut table = self.table.write().await;
        let removed = table.rows.len();
        table.rows.clear();
        Ok(u64::try_from(removed).unwrap_or(u64::MAX))
    }

    async fn count_records(&self) -> Result<u64, StorageError> {
        Ok(u64::try_from(self.table.read().await.rows.len()).unwrap_or(u64::MAX))
    }
}
