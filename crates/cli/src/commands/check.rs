//! Offline validation of an import file.

use anyhow::{Context, Result, bail};
use crimestat_core::AppConfig;
use crimestat_service::{check_records, parse_records};
use std::path::Path;

pub(crate) async fn run(config: &AppConfig, file: &Path) -> Result<()> {
    let json = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;
    let entries = parse_records(&json).with_context(|| format!("parsing {}", file.display()))?;

    let violations = check_records(&entries, config.thresholds);
    for entry in &violations {
        println!("entry {} ({} {}): {}", entry.index, entry.state, entry.year, entry.errors);
    }
    if !violations.is_empty() {
        bail!("{} of {} entries failed validation", violations.len(), entries.len());
    }
    println!("All {} entries valid", entries.len());
    Ok(())
}
