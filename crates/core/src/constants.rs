//! Shared constants for crimestat.
//!
//! Centralizes domain bounds and defaults used by validation, storage and the HTTP layer.

/// Earliest reporting year accepted by validation.
pub const MIN_YEAR: i32 = 1960;

/// Latest reporting year accepted by validation.
pub const MAX_YEAR: i32 = 2025;

/// Upper bound for a state's population.
pub const MAX_POPULATION: i64 = 50_000_000;

/// Crime rates are expressed per this many inhabitants.
pub const RATE_PER_POPULATION: f64 = 100_000.0;

/// Default tolerance between a category's `all` total and the sum of its constituents.
pub const DEFAULT_TOTAL_TOLERANCE: f64 = 0.05;

/// Default tolerance between a stated rate and the rate implied by total and population.
pub const DEFAULT_RATE_TOLERANCE: f64 = 0.10;

/// Default threshold for the high-crime filter.
pub const DEFAULT_CRIME_THRESHOLD: f64 = 5000.0;

/// Default number of rows returned by the safest-states ranking.
pub const DEFAULT_SAFEST_LIMIT: usize = 10;

/// Default number of rows returned by the crime-type ranking.
pub const DEFAULT_CRIME_TYPE_LIMIT: usize = 50;

/// Maximum number of results for any ranking query (DoS protection).
pub const MAX_QUERY_LIMIT: usize = 1000;

/// PostgreSQL connection pool: maximum connections.
pub const PG_POOL_MAX_CONNECTIONS: u32 = 20;

/// PostgreSQL connection pool: acquire timeout in seconds.
pub const PG_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL connection pool: idle timeout in seconds.
pub const PG_POOL_IDLE_TIMEOUT_SECS: u64 = 300;

/// Default bind host for the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default bind port for the HTTP server.
pub const DEFAULT_PORT: u16 = 8000;
