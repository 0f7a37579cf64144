use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const TEXAS_2015: &str = r#"{
    "state": "texas",
    "year": 2015,
    "population": 27500000,
    "property_rate_all": 2800.0,
    "property_rate_burglary": 545.5,
    "property_rate_larceny": 1963.6,
    "property_rate_motor": 290.9,
    "violent_rate_all": 407.3,
    "violent_rate_assault": 254.5,
    "violent_rate_murder": 4.7,
    "violent_rate_rape": 40.0,
    "violent_rate_robbery": 108.0,
    "property_total_all": 770000,
    "property_total_burglary": 150000,
    "property_total_larceny": 540000,
    "property_total_motor": 80000,
    "violent_total_all": 112000,
    "violent_total_assault": 70000,
    "violent_total_murder": 1300,
    "violent_total_rape": 11000,
    "violent_total_robbery": 29700
}"#;

fn json_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn crimestat() -> Command {
    let mut cmd = Command::cargo_bin("crimestat").unwrap();
    cmd.env_remove("DATABASE_URL").env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_cli_help() {
    crimestat()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("US crime statistics API"));
}

#[test]
fn test_cli_serve_help() {
    crimestat()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("port").and(predicate::str::contains("memory")));
}

#[test]
fn test_check_valid_file() {
    let file = json_file(&format!("[{TEXAS_2015}]"));
    crimestat()
        .arg("check")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("All 1 entries valid"));
}

#[test]
fn test_check_reports_invalid_entries() {
    let bad = TEXAS_2015.replace("\"year\": 2015", "\"year\": 1950");
    let file = json_file(&format!("[{TEXAS_2015}, {bad}]"));
    crimestat()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("entry 1 (texas 1950)"))
        .stdout(predicate::str::contains("Year must be between 1960 and 2025."))
        .stderr(predicate::str::contains("1 of 2 entries failed validation"));
}

#[test]
fn test_check_malformed_json() {
    let file = json_file("{not json");
    crimestat()
        .arg("check")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing"));
}

#[test]
fn test_import_requires_database_url() {
    let file = json_file(&format!("[{TEXAS_2015}]"));
    crimestat()
        .arg("import")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set"));
}

#[test]
fn test_migrate_requires_database_url() {
    crimestat()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL must be set"));
}
