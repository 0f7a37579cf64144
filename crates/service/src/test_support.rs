//! Fixtures shared by the service tests.

use std::sync::Arc;

use crimestat_core::CrimeInput;
use crimestat_storage::{CrimeStore, StorageBackend};

pub fn memory_backend() -> Arc<StorageBackend> {
    Arc::new(StorageBackend::new_memory())
}

/// Texas 2015, consistent with every validation rule including rate/total checks.
pub fn texas_2015() -> CrimeInput {
    CrimeInput {
        state: "Texas".to_owned(),
        year: 2015,
        population: 27_500_000,
        property_rate_all: 2800.0,
        property_rate_burglary: 545.5,
        property_rate_larceny: 1963.6,
        property_rate_motor: 290.9,
        violent_rate_all: 407.3,
        violent_rate_assault: 254.5,
        violent_rate_murder: 4.7,
        violent_rate_rape: 40.0,
        violent_rate_robbery: 108.0,
        property_total_all: 770_000,
        property_total_burglary: 150_000,
        property_total_larceny: 540_000,
        property_total_motor: 80_000,
        violent_total_all: 112_000,
        violent_total_assault: 70_000,
        violent_total_murder: 1300,
        violent_total_rape: 11_000,
        violent_total_robbery: 29_700,
    }
}

pub fn california_2015() -> CrimeInput {
    CrimeInput {
        state: "California".to_owned(),
        year: 2015,
        population: 39_000_000,
        property_rate_all: 2500.5,
        property_rate_burglary: 450.2,
        property_rate_larceny: 1800.3,
        property_rate_motor: 250.0,
        violent_rate_all: 450.5,
        violent_rate_assault: 250.0,
        violent_rate_murder: 5.5,
        violent_rate_rape: 30.0,
        violent_rate_robbery: 165.0,
        property_total_all: 975_195,
        property_total_burglary: 175_578,
        property_total_larceny: 702_117,
        property_total_motor: 97_500,
        violent_total_all: 175_695,
        violent_total_assault: 97_500,
        violent_total_murder: 2145,
        violent_total_rape: 11_700,
        violent_total_robbery: 64_350,
    }
}

/// Insert a record straight into storage with the given headline rates.
pub async fn seed(storage: &StorageBackend, state: &str, year: i32, violent: f64, property: f64) {
    let input = CrimeInput {
        state: state.to_owned(),
        year,
        violent_rate_all: violent,
        property_rate_all: property,
        ..texas_2015()
    };
    if let Err(e) = storage.insert_record(&input).await {
        panic!("seeding {state} {year} failed: {e}");
    }
}
