//! The six read-only analytic endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use crimestat_core::analytics::{
    ComparisonReport, CrimeTypeReport, DecadeReport, SafestReport, ThresholdReport, TrendReport,
};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{CompareQuery, CrimeTypeQuery, SafestQuery, ThresholdQuery, TrendQuery};

pub async fn high_crime_states(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ThresholdQuery>, QueryRejection>,
) -> Result<Json<ThresholdReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.analytics_service.high_crime_states(&query.into()).await?))
}

pub async fn crime_trends(
    State(state): State<Arc<AppState>>,
    state_name: Result<Path<String>, PathRejection>,
    query: Result<Query<TrendQuery>, QueryRejection>,
) -> Result<Json<TrendReport>, ApiError> {
    let Path(state_name) = state_name?;
    let Query(query) = query?;
    Ok(Json(state.analytics_service.crime_trends(&state_name, query.into()).await?))
}

pub async fn compare_states(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CompareQuery>, QueryRejection>,
) -> Result<Json<ComparisonReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.analytics_service.compare_states(&query.into()).await?))
}

pub async fn safest_states(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SafestQuery>, QueryRejection>,
) -> Result<Json<SafestReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.analytics_service.safest_states(&query.into()).await?))
}

pub async fn decade_comparison(
    State(state): State<Arc<AppState>>,
    state_name: Result<Path<String>, PathRejection>,
) -> Result<Json<DecadeReport>, ApiError> {
    let Path(state_name) = state_name?;
    Ok(Json(state.analytics_service.decade_comparison(&state_name).await?))
}

pub async fn crime_type_analysis(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CrimeTypeQuery>, QueryRejection>,
) -> Result<Json<CrimeTypeReport>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.analytics_service.crime_type_analysis(&query.into()).await?))
}
