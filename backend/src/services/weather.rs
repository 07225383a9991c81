//! Weather observation service
//!
//! Observations arrive from ingestion collaborators or manual operator
//! entry; the prediction engine only ever reads the most recent one per
//! site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{dispersion_weather, DispersionWeather};
use shared::validation::{validate_stability_code, validate_wind_direction, validate_wind_speed};

/// Service for storing and retrieving site weather observations
#[derive(Clone)]
pub struct WeatherObservationService {
    db: PgPool,
}

/// A timestamped weather snapshot for a site. The dispersion fields are
/// nullable: a station can report partial data, but predictions refuse
/// to run until speed, direction and stability are all present.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct WeatherObservation {
    pub id: Uuid,
    pub site_id: Uuid,
    pub observed_at: DateTime<Utc>,
    pub wind_speed_mps: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub stability_class: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl WeatherObservation {
    /// Engine inputs, if the observation is complete enough for a
    /// prediction run.
    pub fn dispersion_inputs(&self) -> Option<DispersionWeather> {
        dispersion_weather(
            self.wind_speed_mps,
            self.wind_direction_deg,
            self.stability_class.as_deref(),
        )
    }
}

/// Input for storing a weather observation
#[derive(Debug, Deserialize)]
pub struct StoreWeatherObservationInput {
    pub observed_at: Option<DateTime<Utc>>,
    pub wind_speed_mps: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub stability_class: Option<String>,
    pub temperature_celsius: Option<f64>,
    pub source: Option<String>,
}

impl WeatherObservationService {
    /// Create a new WeatherObservationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a weather observation for a site
    pub async fn store(
        &self,
        site_id: Uuid,
        input: StoreWeatherObservationInput,
    ) -> AppResult<WeatherObservation> {
        if let Some(speed) = input.wind_speed_mps {
            validate_wind_speed(speed).map_err(|msg| AppError::Validation {
                field: "wind_speed_mps".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(direction) = input.wind_direction_deg {
            validate_wind_direction(direction).map_err(|msg| AppError::Validation {
                field: "wind_direction_deg".to_string(),
                message: msg.to_string(),
            })?;
        }
        if let Some(code) = &input.stability_class {
            validate_stability_code(code).map_err(|msg| AppError::Validation {
                field: "stability_class".to_string(),
                message: msg.to_string(),
            })?;
        }

        let site_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1)")
                .bind(site_id)
                .fetch_one(&self.db)
                .await?;
        if !site_exists {
            return Err(AppError::NotFound("Site".to_string()));
        }

        let observed_at = input.observed_at.unwrap_or_else(Utc::now);
        let source = input.source.unwrap_or_else(|| "station".to_string());
        let stability = input
            .stability_class
            .map(|code| code.trim().to_ascii_uppercase());

        let observation = sqlx::query_as::<_, WeatherObservation>(
            r#"
            INSERT INTO weather_observations (
                site_id, observed_at, wind_speed_mps, wind_direction_deg,
                stability_class, temperature_celsius, source
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, site_id, observed_at, wind_speed_mps, wind_direction_deg,
                      stability_class, temperature_celsius, source, created_at
            "#,
        )
        .bind(site_id)
        .bind(observed_at)
        .bind(input.wind_speed_mps)
        .bind(input.wind_direction_deg)
        .bind(&stability)
        .bind(input.temperature_celsius)
        .bind(&source)
        .fetch_one(&self.db)
        .await?;

        Ok(observation)
    }

    /// Get the most recent observation for a site
    pub async fn latest(&self, site_id: Uuid) -> AppResult<Option<WeatherObservation>> {
        let observation = sqlx::query_as::<_, WeatherObservation>(
            r#"
            SELECT id, site_id, observed_at, wind_speed_mps, wind_direction_deg,
                   stability_class, temperature_celsius, source, created_at
            FROM weather_observations
            WHERE site_id = $1
            ORDER BY observed_at DESC
            LIMIT 1
            "#,
        )
        .bind(site_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(observation)
    }

    /// Get observations for a time range
    pub async fn list_range(
        &self,
        site_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<WeatherObservation>> {
        let observations = sqlx::query_as::<_, WeatherObservation>(
            r#"
            SELECT id, site_id, observed_at, wind_speed_mps, wind_direction_deg,
                   stability_class, temperature_celsius, source, created_at
            FROM weather_observations
            WHERE site_id = $1
              AND observed_at >= $2
              AND observed_at < $3
            ORDER BY observed_at DESC
            "#,
        )
        .bind(site_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(observations)
    }
}
