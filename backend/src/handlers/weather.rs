//! HTTP handlers for weather observation endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::weather::{
    StoreWeatherObservationInput, WeatherObservation, WeatherObservationService,
};
use crate::AppState;

/// Store a weather observation for a site
pub async fn store_observation(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(input): Json<StoreWeatherObservationInput>,
) -> AppResult<Json<WeatherObservation>> {
    let service = WeatherObservationService::new(state.db);
    let observation = service.store(site_id, input).await?;
    Ok(Json(observation))
}

/// Get the most recent weather observation for a site
pub async fn get_latest_observation(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
) -> AppResult<Json<Option<WeatherObservation>>> {
    let service = WeatherObservationService::new(state.db);
    let observation = service.latest(site_id).await?;
    Ok(Json(observation))
}

/// Query parameters for observations by time range
#[derive(Debug, Deserialize)]
pub struct ObservationRangeQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Get weather observations for a time range
pub async fn list_observations(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Query(query): Query<ObservationRangeQuery>,
) -> AppResult<Json<Vec<WeatherObservation>>> {
    let service = WeatherObservationService::new(state.db);
    let observations = service.list_range(site_id, query.start, query.end).await?;
    Ok(Json(observations))
}
