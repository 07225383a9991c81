//! HTTP handlers for odour prediction endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::prediction::{GenerationOutcome, OdourPrediction, PredictionService};
use crate::AppState;
use shared::dispersion::intensity::{decay_curve, plume_v2_extent, DecaySample};
use shared::dispersion::DispersionModel;
use shared::models::StabilityClass;
use shared::validation::{validate_base_intensity, validate_wind_speed};

fn prediction_service(state: &AppState) -> AppResult<PredictionService> {
    let prediction = &state.config.prediction;
    if prediction.duration_minutes <= 0.0 {
        return Err(AppError::Configuration(
            "prediction.duration_minutes must be positive".to_string(),
        ));
    }
    let model =
        DispersionModel::from_version(prediction.model_version, prediction.duration_minutes);
    Ok(PredictionService::new(
        state.db.clone(),
        model,
        prediction.validity_hours,
    ))
}

/// Request body for triggering a generation run
#[derive(Debug, Default, Deserialize)]
pub struct GeneratePredictionsInput {
    pub validity_hours: Option<i64>,
}

/// Run prediction generation for a site. Callable by an operator or a
/// scheduler; the body is optional.
pub async fn generate_predictions(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
    input: Option<Json<GeneratePredictionsInput>>,
) -> AppResult<Json<GenerationOutcome>> {
    let validity_hours = input.and_then(|Json(input)| input.validity_hours);
    let service = prediction_service(&state)?;
    let outcome = service.generate_for_site(site_id, validity_hours).await?;
    Ok(Json(outcome))
}

/// List the current (non-expired) predictions for a site
pub async fn list_current_predictions(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
) -> AppResult<Json<Vec<OdourPrediction>>> {
    let service = prediction_service(&state)?;
    let predictions = service.current_for_site(site_id).await?;
    Ok(Json(predictions))
}

/// Response for manual expiry cleanup
#[derive(Debug, Serialize)]
pub struct ExpiredCleanupResponse {
    pub deleted: u64,
}

/// Delete expired predictions for a site (manual garbage collection for
/// schedulers)
pub async fn delete_expired_predictions(
    State(state): State<AppState>,
    Path(site_id): Path<Uuid>,
) -> AppResult<Json<ExpiredCleanupResponse>> {
    let service = prediction_service(&state)?;
    let deleted = service.delete_expired(site_id).await?;
    Ok(Json(ExpiredCleanupResponse { deleted }))
}

/// Query parameters for the diagnostic decay curve
#[derive(Debug, Deserialize)]
pub struct DecayCurveQuery {
    pub wind_speed_mps: f64,
    pub base_intensity: Option<f64>,
    pub stability: Option<String>,
    pub duration_minutes: Option<f64>,
}

/// Response carrying the sampled intensity-vs-distance curve
#[derive(Debug, Serialize)]
pub struct DecayCurveResponse {
    pub extent_percent: f64,
    pub peak_intensity: f64,
    pub samples: Vec<DecaySample>,
}

/// Sample the plume-v2 decay law for plotting and diagnostics
pub async fn get_decay_curve(
    State(state): State<AppState>,
    Query(query): Query<DecayCurveQuery>,
) -> AppResult<Json<DecayCurveResponse>> {
    validate_wind_speed(query.wind_speed_mps).map_err(|msg| AppError::Validation {
        field: "wind_speed_mps".to_string(),
        message: msg.to_string(),
    })?;

    let base_intensity = query.base_intensity.unwrap_or(3.0);
    validate_base_intensity(base_intensity).map_err(|msg| AppError::Validation {
        field: "base_intensity".to_string(),
        message: msg.to_string(),
    })?;

    let stability = StabilityClass::from_code(query.stability.as_deref().unwrap_or("D"));
    let duration_minutes = query
        .duration_minutes
        .unwrap_or(state.config.prediction.duration_minutes);

    let extent = plume_v2_extent(
        base_intensity,
        query.wind_speed_mps,
        stability,
        duration_minutes,
    );

    Ok(Json(DecayCurveResponse {
        extent_percent: extent.length,
        peak_intensity: extent.peak_intensity,
        samples: decay_curve(base_intensity, extent.length),
    }))
}
