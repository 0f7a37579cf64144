//! CrimeStore implementation for PgStorage.

use super::*;

use crate::traits::CrimeStore;
use async_trait::async_trait;
use crimestat_core::RecordFilter;

#[async_trait]
impl CrimeStore for PgStorage {
    async fn insert_record(&self, input: &CrimeInput) -> Result<CrimeRecord, StorageError> {
        let sql = format!(
            "INSERT INTO crime_records ({INPUT_COLUMNS})
             VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21)
             RETURNING {RECORD_COLUMNS}"
        );
        let row = bind_input(sqlx::query(&sql), input).fetch_one(&self.pool).await?;
        row_to_record(&row)
    }

    async fn get_record(&self, id: i64) -> Result<Option<CrimeRecord>, StorageError> {
        let row = sqlx::query(&format!("SELECT {RECORD_COLUMNS} FROM crime_records WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn update_record(
        &self,
        id: i64,
        input: &CrimeInput,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        let sql = format!(
            "UPDATE crime_records SET ({INPUT_COLUMNS}) =
                 ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16,$17,$18,$19,$20,$21)
             WHERE id = $22
             RETURNING {RECORD_COLUMNS}"
        );
        let row = bind_input(sqlx::query(&sql), input).bind(id).fetch_optional(&self.pool).await?;
        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn delete_record(&self, id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("DELETE FROM crime_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_records(&self, filter: &RecordFilter) -> Result<Vec<CrimeRecord>, StorageError> {
        let state_pattern = filter.state.as_deref().map(|s| format!("%{}%", escape_like(s)));
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM crime_records
             WHERE ($1::text IS NULL OR state ILIKE $1)
               AND ($2::int IS NULL OR year = $2)
               AND ($3::int IS NULL OR year >= $3)
               AND ($4::int IS NULL OR year <= $4)
             ORDER BY year DESC, state COLLATE \"C\", id"
        ))
        .bind(state_pattern)
        .bind(filter.year)
        .bind(filter.year_from)
        .bind(filter.year_to)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn records_for_year(&self, year: i32) -> Result<Vec<CrimeRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM crime_records WHERE year = $1 ORDER BY state COLLATE \"C\", id"
        ))
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn records_for_state(&self, state: &str) -> Result<Vec<CrimeRecord>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM crime_records
             WHERE LOWER(state) = LOWER($1)
             ORDER BY year, id"
        ))
        .bind(state)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn records_for_states(
        &self,
        states: &[String],
        year: i32,
    ) -> Result<Vec<CrimeRecord>, StorageError> {
        let lowered: Vec<String> = states.iter().map(|s| s.to_lowercase()).collect();
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM crime_records
             WHERE LOWER(state) = ANY($1) AND year = $2
             ORDER BY state COLLATE \"C\", id"
        ))
        .bind(&lowered)
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_record).collect()
    }

    async fn find_by_key(
        &self,
        state: &str,
        year: i32,
    ) -> Result<Option<CrimeRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM crime_records WHERE state = $1 AND year = $2"
        ))
        .bind(state)
        .bind(year)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_record(&r)).transpose()
    }

    async fn clear_records(&self) -> Result<u64, StorageError> {
        let result = sqlx::query("DELETE FROM crime_records").execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn count_records(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM crime_records").fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
