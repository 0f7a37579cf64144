//! Bulk import of a JSON array of records.

use anyhow::{Context, Result};
use crimestat_core::AppConfig;
use crimestat_service::ImportService;
use crimestat_storage::StorageBackend;
use std::path::Path;
use std::sync::Arc;

use crate::require_database_url;

pub(crate) async fn run(config: &AppConfig, file: &Path, clear: bool) -> Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let storage = Arc::new(StorageBackend::new_postgres(require_database_url(config)?).await?);
    let service = ImportService::new(storage, config.thresholds);

    let report = service.import_json(&json, clear).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    if report.errors > 0 {
        tracing::warn!("{} entries were rejected, see warnings above", report.errors);
    }
    Ok(())
}
