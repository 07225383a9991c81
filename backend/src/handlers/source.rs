//! HTTP handlers for emission source endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::source::{
    CreateEmissionSourceInput, EmissionSource, EmissionSourceService, UpdateEmissionSourceInput,
};
use crate::AppState;

/// Create an emission source on a site map
pub async fn create_source(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(input): Json<CreateEmissionSourceInput>,
) -> AppResult<Json<EmissionSource>> {
    let service = EmissionSourceService::new(state.db);
    let source = service.create(site_id, input).await?;
    Ok(Json(source))
}

/// List all emission sources for a site
pub async fn list_sources(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
) -> AppResult<Json<Vec<EmissionSource>>> {
    let service = EmissionSourceService::new(state.db);
    let sources = service.list(site_id).await?;
    Ok(Json(sources))
}

/// Get an emission source by ID
pub async fn get_source(
    State(state): State<AppState>,
    Path((site_id, source_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<EmissionSource>> {
    let service = EmissionSourceService::new(state.db);
    let source = service.get(site_id, source_id).await?;
    Ok(Json(source))
}

/// Update an emission source
pub async fn update_source(
    State(state): State<AppState>,
    Path((site_id, source_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateEmissionSourceInput>,
) -> AppResult<Json<EmissionSource>> {
    let service = EmissionSourceService::new(state.db);
    let source = service.update(site_id, source_id, input).await?;
    Ok(Json(source))
}

/// Delete an emission source
pub async fn delete_source(
    State(state): State<AppState>,
    Path((site_id, source_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = EmissionSourceService::new(state.db);
    service.delete(site_id, source_id).await?;
    Ok(Json(()))
}
