//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
    /// Active storage backend, `postgres` or `memory`
    pub storage: &'static str,
}
