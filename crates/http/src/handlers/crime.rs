use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use crimestat_core::{CrimeDetail, CrimeInput, CrimeSummary, RecordFilter};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::CrimeListQuery;

pub async fn list_records(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CrimeListQuery>, QueryRejection>,
) -> Result<Json<Vec<CrimeSummary>>, ApiError> {
    let Query(query) = query?;
    let filter = RecordFilter::from(query);
    Ok(Json(state.crime_service.list(&filter).await?))
}

pub async fn create_record(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CrimeInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CrimeDetail>), ApiError> {
    let Json(input) = body?;
    let record = state.crime_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(record.detail())))
}

pub async fn get_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CrimeDetail>, ApiError> {
    let Path(id) = id?;
    Ok(Json(state.crime_service.get(id).await?.detail()))
}

pub async fn update_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<CrimeInput>, JsonRejection>,
) -> Result<Json<CrimeDetail>, ApiError> {
    let Path(id) = id?;
    let Json(input) = body?;
    Ok(Json(state.crime_service.update(id, input).await?.detail()))
}

pub async fn delete_record(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    state.crime_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
