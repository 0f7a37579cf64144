//! PostgreSQL storage backend using sqlx.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod records;

use crate::error::StorageError;
use crimestat_core::{
    CrimeInput, CrimeRecord, PG_POOL_ACQUIRE_TIMEOUT_SECS, PG_POOL_IDLE_TIMEOUT_SECS,
    PG_POOL_MAX_CONNECTIONS,
};
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::Query;
use sqlx::{PgPool, Postgres, Row};

use super::pg_migrations::run_pg_migrations;

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        run_pg_migrations(&pool).await.map_err(|e| StorageError::Migration(e.to_string()))?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

pub(crate) const RECORD_COLUMNS: &str = "id, state, year, population,
     property_rate_all, property_rate_burglary, property_rate_larceny, property_rate_motor,
     violent_rate_all, violent_rate_assault, violent_rate_murder, violent_rate_rape,
     violent_rate_robbery,
     property_total_all, property_total_burglary, property_total_larceny, property_total_motor,
     violent_total_all, violent_total_assault, violent_total_murder, violent_total_rape,
     violent_total_robbery";

/// Writable columns in the order `bind_input` binds them.
pub(crate) const INPUT_COLUMNS: &str = "state, year, population,
     property_rate_all, property_rate_burglary, property_rate_larceny, property_rate_motor,
     violent_rate_all, violent_rate_assault, violent_rate_murder, violent_rate_rape,
     violent_rate_robbery,
     property_total_all, property_total_burglary, property_total_larceny, property_total_motor,
     violent_total_all, violent_total_assault, violent_total_murder, violent_total_rape,
     violent_total_robbery";

/// Binds the 21 writable fields in `INPUT_COLUMNS` order.
pub(crate) fn bind_input<'q>(
    query: Query<'q, Postgres, PgArguments>,
    input: &'q CrimeInput,
) -> Query<'q, Postgres, PgArguments> {
    query
        .bind(&input.state)
        .bind(input.year)
        .bind(input.population)
        .bind(input.property_rate_all)
        .bind(input.property_rate_burglary)
        .bind(input.property_rate_larceny)
        .bind(input.property_rate_motor)
        .bind(input.violent_rate_all)
        .bind(input.violent_rate_assault)
        .bind(input.violent_rate_murder)
        .bind(input.violent_rate_rape)
        .bind(input.violent_rate_robbery)
        .bind(input.property_total_all)
        .bind(input.property_total_burglary)
        .bind(input.property_total_larceny)
        .bind(input.property_total_motor)
        .bind(input.violent_total_all)
        .bind(input.violent_total_assault)
        .bind(input.violent_total_murder)
        .bind(input.violent_total_rape)
        .bind(input.violent_total_robbery)
}

pub(crate) fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<CrimeRecord, StorageError> {
    Ok(CrimeRecord::new(
        row.try_get("id")?,
        CrimeInput {
            state: row.try_get("state")?,
            year: row.try_get("year")?,
            population: row.try_get("population")?,
            property_rate_all: row.try_get("property_rate_all")?,
            property_rate_burglary: row.try_get("property_rate_burglary")?,
            property_rate_larceny: row.try_get("property_rate_larceny")?,
            property_rate_motor: row.try_get("property_rate_motor")?,
            violent_rate_all: row.try_get("violent_rate_all")?,
            violent_rate_assault: row.try_get("violent_rate_assault")?,
            violent_rate_murder: row.try_get("violent_rate_murder")?,
            violent_rate_rape: row.try_get("violent_rate_rape")?,
            violent_rate_robbery: row.try_get("violent_rate_robbery")?,
            property_total_all: row.try_get("property_total_all")?,
            property_total_burglary: row.try_get("property_total_burglary")?,
            property_total_larceny: row.try_get("property_total_larceny")?,
            property_total_motor: row.try_get("property_total_motor")?,
            violent_total_all: row.try_get("violent_total_all")?,
            violent_total_assault: row.try_get("violent_total_assault")?,
            violent_total_murder: row.try_get("violent_total_murder")?,
            violent_total_rape: row.try_get("violent_total_rape")?,
            violent_total_robbery: row.try_get("violent_total_robbery")?,
        },
    ))
}

pub(crate) fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}
