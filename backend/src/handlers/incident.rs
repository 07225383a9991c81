//! HTTP handlers for nuisance-odour incident endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::incident::{
    OdourIncident, OdourIncidentService, ReportIncidentInput, UpdateIncidentStatusInput,
};
use crate::AppState;

/// Report a new odour incident for a site
pub async fn report_incident(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Json(input): Json<ReportIncidentInput>,
) -> AppResult<Json<OdourIncident>> {
    let service = OdourIncidentService::new(state.db);
    let incident = service.report(site_id, input).await?;
    Ok(Json(incident))
}

/// Query parameters for the incident listing
#[derive(Debug, Deserialize)]
pub struct IncidentListQuery {
    pub status: Option<String>,
}

/// List incidents for a site
pub async fn list_incidents(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    Query(query): Query<IncidentListQuery>,
) -> AppResult<Json<Vec<OdourIncident>>> {
    let service = OdourIncidentService::new(state.db);
    let incidents = service.list(site_id, query.status).await?;
    Ok(Json(incidents))
}

/// Get an incident by ID
pub async fn get_incident(
    State(state): State<AppState>,
    Path((site_id, incident_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<OdourIncident>> {
    let service = OdourIncidentService::new(state.db);
    let incident = service.get(site_id, incident_id).await?;
    Ok(Json(incident))
}

/// Update an incident's follow-up status
pub async fn update_incident_status(
    State(state): State<AppState>,
    Path((site_id, incident_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateIncidentStatusInput>,
) -> AppResult<Json<OdourIncident>> {
    let service = OdourIncidentService::new(state.db);
    let incident = service.update_status(site_id, incident_id, input).await?;
    Ok(Json(incident))
}

/// Delete an incident
pub async fn delete_incident(
    State(state): State<AppState>,
    Path((site_id, incident_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<()>> {
    let service = OdourIncidentService::new(state.db);
    service.delete(site_id, incident_id).await?;
    Ok(Json(()))
}
