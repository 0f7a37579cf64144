//! PostgreSQL schema migrations for crimestat storage.

use anyhow::Result;
use sqlx::PgPool;

/// Run all PostgreSQL migrations. Every statement is idempotent.
pub async fn run_pg_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS crime_records (
            id BIGSERIAL PRIMARY KEY,
            state TEXT NOT NULL,
            year INTEGER NOT NULL,
            population BIGINT NOT NULL,
            property_rate_all DOUBLE PRECISION NOT NULL,
            property_rate_burglary DOUBLE PRECISION NOT NULL,
            property_rate_larceny DOUBLE PRECISION NOT NULL,
            property_rate_motor DOUBLE PRECISION NOT NULL,
            violent_rate_all DOUBLE PRECISION NOT NULL,
            violent_rate_assault DOUBLE PRECISION NOT NULL,
            violent_rate_murder DOUBLE PRECISION NOT NULL,
            violent_rate_rape DOUBLE PRECISION NOT NULL,
            violent_rate_robbery DOUBLE PRECISION NOT NULL,
            property_total_all BIGINT NOT NULL,
            property_total_burglary BIGINT NOT NULL,
            property_total_larceny BIGINT NOT NULL,
            property_total_motor BIGINT NOT NULL,
            violent_total_all BIGINT NOT NULL,
            violent_total_assault BIGINT NOT NULL,
            violent_total_murder BIGINT NOT NULL,
            violent_total_rape BIGINT NOT NULL,
            violent_total_robbery BIGINT NOT NULL,
            CONSTRAINT crime_records_state_year_key UNIQUE (state, year)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_crime_year ON crime_records (year)")
        .execute(pool)
        .await?;

    // Case-insensitive state lookups (trend, decade, comparison)
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_crime_state_lower ON crime_records (LOWER(state))")
        .execute(pool)
        .await?;

    tracing::info!("PostgreSQL migrations applied");
    Ok(())
}
