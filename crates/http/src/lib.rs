//! HTTP API server for crimestat.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod handlers;
mod query_types;
mod response_types;

use axum::{Json, Router, routing::get};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crimestat_core::ValidationThresholds;
use crimestat_service::{AnalyticsService, CrimeService};
use crimestat_storage::StorageBackend;

pub use api_error::ApiError;
pub use response_types::VersionResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    /// CRUD over crime records
    pub crime_service: Arc<CrimeService>,
    /// Read-only analytic queries
    pub analytics_service: Arc<AnalyticsService>,
    /// Name of the active storage backend
    pub storage_kind: &'static str,
}

impl AppState {
    #[must_use]
    pub fn new(storage: Arc<StorageBackend>, thresholds: ValidationThresholds) -> Self {
        Self {
            storage_kind: storage.kind(),
            crime_service: Arc::new(CrimeService::new(Arc::clone(&storage), thresholds)),
            analytics_service: Arc::new(AnalyticsService::new(storage)),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    use handlers::{analytics, crime};

    let crime_collection = get(crime::list_records).post(crime::create_record);
    let crime_item =
        get(crime::get_record).put(crime::update_record).delete(crime::delete_record);

    Router::new()
        .route("/health", get(health))
        .route("/api/version", get(version))
        .route("/api/crime/", crime_collection.clone())
        .route("/api/crime", crime_collection)
        .route("/api/crime/{id}/", crime_item.clone())
        .route("/api/crime/{id}", crime_item)
        .route("/api/high-crime-states/", get(analytics::high_crime_states))
        .route("/api/high-crime-states", get(analytics::high_crime_states))
        .route("/api/crime-trends/{state_name}/", get(analytics::crime_trends))
        .route("/api/crime-trends/{state_name}", get(analytics::crime_trends))
        .route("/api/compare-states/", get(analytics::compare_states))
        .route("/api/compare-states", get(analytics::compare_states))
        .route("/api/safest-states/", get(analytics::safest_states))
        .route("/api/safest-states", get(analytics::safest_states))
        .route("/api/decade-comparison/{state_name}/", get(analytics::decade_comparison))
        .route("/api/decade-comparison/{state_name}", get(analytics::decade_comparison))
        .route("/api/crime-type-analysis/", get(analytics::crime_type_analysis))
        .route("/api/crime-type-analysis", get(analytics::crime_type_analysis))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn version(
    axum::extract::State(state): axum::extract::State<Arc<AppState>>,
) -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION"), storage: state.storage_kind })
}
