//! Create or upgrade the PostgreSQL schema.

use anyhow::Result;
use crimestat_core::AppConfig;
use crimestat_storage::run_pg_migrations;
use sqlx::PgPool;

use crate::require_database_url;

pub(crate) async fn run(config: &AppConfig) -> Result<()> {
    let pool = PgPool::connect(require_database_url(config)?).await?;
    run_pg_migrations(&pool).await?;
    pool.close().await;
    println!("Schema is up to date");
    Ok(())
}
