//! Prediction lifecycle service
//!
//! Orchestrates a full regeneration pass for one site: load the emission
//! sources and the latest weather observation, run the configured
//! dispersion model per source, garbage-collect expired predictions, and
//! atomically replace the site's current batch. Predictions are never
//! mutated in place.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::dispersion::{predict_for_source, DispersionModel, PlumeFootprint};
use shared::models::{DispersionWeather, SourceGeometry};
use shared::validation::validate_validity_hours;

/// Service driving odour prediction generation and expiry
#[derive(Clone)]
pub struct PredictionService {
    db: PgPool,
    model: DispersionModel,
    default_validity_hours: i64,
}

/// A stored odour prediction for one source, current during
/// `[valid_from, valid_to)`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OdourPrediction {
    pub id: Uuid,
    pub site_id: Uuid,
    pub source_id: Uuid,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub geometry: serde_json::Value,
    pub peak_intensity: f64,
    pub model_version: String,
    pub created_at: DateTime<Utc>,
}

/// Source fields a generation pass needs
#[derive(Debug, sqlx::FromRow)]
struct PredictionSource {
    id: Uuid,
    geometry: serde_json::Value,
    base_intensity: f64,
}

/// Latest-observation fields a generation pass needs
#[derive(Debug, sqlx::FromRow)]
struct LatestObservation {
    wind_speed_mps: Option<f64>,
    wind_direction_deg: Option<f64>,
    stability_class: Option<String>,
}

/// Weather values a batch was generated from, echoed for observability
#[derive(Debug, Clone, Serialize)]
pub struct WeatherUsed {
    pub wind_speed_mps: f64,
    pub wind_direction_deg: f64,
    pub stability_class: String,
}

/// Outcome of one generation run
#[derive(Debug, Serialize)]
pub struct GenerationOutcome {
    pub generated: usize,
    /// Sources dropped for unresolvable geometry. A bad source never
    /// fails the batch.
    pub skipped: usize,
    pub predictions: Vec<OdourPrediction>,
    /// Absent only when the run ended early because the site has no
    /// sources.
    pub weather: Option<WeatherUsed>,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(db: PgPool, model: DispersionModel, default_validity_hours: i64) -> Self {
        Self {
            db,
            model,
            default_validity_hours,
        }
    }

    /// Run a full regeneration pass for a site.
    pub async fn generate_for_site(
        &self,
        site_id: Uuid,
        validity_hours: Option<i64>,
    ) -> AppResult<GenerationOutcome> {
        let validity_hours = validity_hours.unwrap_or(self.default_validity_hours);
        validate_validity_hours(validity_hours).map_err(|msg| AppError::Validation {
            field: "validity_hours".to_string(),
            message: msg.to_string(),
        })?;

        let site_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1)")
                .bind(site_id)
                .fetch_one(&self.db)
                .await?;
        if !site_exists {
            return Err(AppError::NotFound("Site".to_string()));
        }

        // Step 1: load sources. A site without sources is a successful
        // no-op, not an error.
        let sources = sqlx::query_as::<_, PredictionSource>(
            r#"
            SELECT id, geometry, base_intensity
            FROM emission_sources
            WHERE site_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(&self.db)
        .await?;

        if sources.is_empty() {
            self.cleanup_expired(site_id).await;
            return Ok(GenerationOutcome {
                generated: 0,
                skipped: 0,
                predictions: Vec::new(),
                weather: None,
            });
        }

        // Step 2: latest weather. Weather is site-wide; a missing or
        // partial observation fails the whole batch.
        let observation = sqlx::query_as::<_, LatestObservation>(
            r#"
            SELECT wind_speed_mps, wind_direction_deg, stability_class
            FROM weather_observations
            WHERE site_id = $1
            ORDER BY observed_at DESC
            LIMIT 1
            "#,
        )
        .bind(site_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            AppError::IncompleteWeatherData("no weather observation recorded for this site".into())
        })?;

        let weather = shared::models::dispersion_weather(
            observation.wind_speed_mps,
            observation.wind_direction_deg,
            observation.stability_class.as_deref(),
        )
        .ok_or_else(|| {
            AppError::IncompleteWeatherData(
                "wind speed, wind direction and stability class are all required".into(),
            )
        })?;

        // Step 3: one prediction per source; bad geometry skips the
        // source and the batch continues.
        let now = Utc::now();
        let valid_to = now + Duration::hours(validity_hours);
        let mut drafts = Vec::with_capacity(sources.len());
        let mut skipped = 0usize;
        for source in &sources {
            match Self::build_footprint(&self.model, source, &weather) {
                Some(footprint) => drafts.push((source.id, footprint)),
                None => {
                    skipped += 1;
                    tracing::warn!(
                        source_id = %source.id,
                        "skipping emission source with unresolvable geometry"
                    );
                }
            }
        }

        // Step 4: best-effort cleanup of expired predictions. Leftover
        // expired rows are recoverable by the next run.
        self.cleanup_expired(site_id).await;

        // Step 5: replace the site's current predictions as one
        // transaction, so a partial failure never leaves some sources
        // updated and others stale.
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM odour_predictions WHERE site_id = $1")
            .bind(site_id)
            .execute(&mut *tx)
            .await?;

        let mut predictions = Vec::with_capacity(drafts.len());
        for (source_id, footprint) in drafts {
            let geometry = serde_json::to_value(&footprint.geometry)
                .map_err(|e| AppError::Internal(e.to_string()))?;

            let prediction = sqlx::query_as::<_, OdourPrediction>(
                r#"
                INSERT INTO odour_predictions (
                    site_id, source_id, valid_from, valid_to,
                    geometry, peak_intensity, model_version
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, site_id, source_id, valid_from, valid_to,
                          geometry, peak_intensity, model_version, created_at
                "#,
            )
            .bind(site_id)
            .bind(source_id)
            .bind(now)
            .bind(valid_to)
            .bind(&geometry)
            .bind(footprint.peak_intensity)
            .bind(self.model.version().as_str())
            .fetch_one(&mut *tx)
            .await?;

            predictions.push(prediction);
        }

        tx.commit().await?;

        tracing::info!(
            site_id = %site_id,
            generated = predictions.len(),
            skipped,
            wind_speed_mps = weather.wind_speed_mps,
            wind_direction_deg = weather.wind_direction_deg,
            stability_class = %weather.stability,
            "generated odour predictions"
        );

        Ok(GenerationOutcome {
            generated: predictions.len(),
            skipped,
            predictions,
            weather: Some(WeatherUsed {
                wind_speed_mps: weather.wind_speed_mps,
                wind_direction_deg: weather.wind_direction_deg,
                stability_class: weather.stability.code().to_string(),
            }),
        })
    }

    /// Footprint for one source, or `None` when its stored geometry does
    /// not resolve to a center point.
    fn build_footprint(
        model: &DispersionModel,
        source: &PredictionSource,
        weather: &DispersionWeather,
    ) -> Option<PlumeFootprint> {
        let geometry: SourceGeometry = serde_json::from_value(source.geometry.clone()).ok()?;
        predict_for_source(model, &geometry, weather, source.base_intensity)
    }

    /// Current (non-expired) predictions for a site
    pub async fn current_for_site(&self, site_id: Uuid) -> AppResult<Vec<OdourPrediction>> {
        let predictions = sqlx::query_as::<_, OdourPrediction>(
            r#"
            SELECT id, site_id, source_id, valid_from, valid_to,
                   geometry, peak_intensity, model_version, created_at
            FROM odour_predictions
            WHERE site_id = $1 AND valid_to > NOW()
            ORDER BY created_at ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(&self.db)
        .await?;

        Ok(predictions)
    }

    /// Delete expired predictions for a site; returns the number removed
    pub async fn delete_expired(&self, site_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM odour_predictions WHERE site_id = $1 AND valid_to <= NOW()")
                .bind(site_id)
                .execute(&self.db)
                .await?;

        Ok(result.rows_affected())
    }

    /// Best-effort expiry cleanup used inside generation runs: a failure
    /// here is logged and swallowed, it never aborts the run.
    async fn cleanup_expired(&self, site_id: Uuid) {
        if let Err(e) = self.delete_expired(site_id).await {
            tracing::warn!(
                site_id = %site_id,
                error = %e,
                "failed to clean up expired predictions"
            );
        }
    }
}
