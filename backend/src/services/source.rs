//! Emission source management service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{SourceGeometry, DEFAULT_BASE_INTENSITY};
use shared::validation::{validate_base_intensity, validate_source_geometry};

/// Service for managing odour emission sources on a site map
#[derive(Clone)]
pub struct EmissionSourceService {
    db: PgPool,
}

/// An odour-generating location on a site map. Geometry is stored as
/// drawn (point or polygon) and resolved to a center point only when a
/// prediction run needs it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct EmissionSource {
    pub id: Uuid,
    pub site_id: Uuid,
    pub name: Option<String>,
    pub geometry: serde_json::Value,
    pub base_intensity: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an emission source
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmissionSourceInput {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    pub geometry: SourceGeometry,
    pub base_intensity: Option<f64>,
}

/// Input for updating an emission source
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmissionSourceInput {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    pub geometry: Option<SourceGeometry>,
    pub base_intensity: Option<f64>,
}

impl EmissionSourceService {
    /// Create a new EmissionSourceService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    async fn ensure_site_exists(&self, site_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1)")
                .bind(site_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Site".to_string()));
        }
        Ok(())
    }

    /// Create an emission source on a site map
    pub async fn create(
        &self,
        site_id: Uuid,
        input: CreateEmissionSourceInput,
    ) -> AppResult<EmissionSource> {
        input.validate()?;
        validate_source_geometry(&input.geometry).map_err(|msg| AppError::Validation {
            field: "geometry".to_string(),
            message: msg.to_string(),
        })?;

        let base_intensity = input.base_intensity.unwrap_or(DEFAULT_BASE_INTENSITY);
        validate_base_intensity(base_intensity).map_err(|msg| AppError::Validation {
            field: "base_intensity".to_string(),
            message: msg.to_string(),
        })?;

        self.ensure_site_exists(site_id).await?;

        let geometry =
            serde_json::to_value(&input.geometry).map_err(|e| AppError::Internal(e.to_string()))?;

        let source = sqlx::query_as::<_, EmissionSource>(
            r#"
            INSERT INTO emission_sources (site_id, name, geometry, base_intensity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, site_id, name, geometry, base_intensity, created_at, updated_at
            "#,
        )
        .bind(site_id)
        .bind(&input.name)
        .bind(&geometry)
        .bind(base_intensity)
        .fetch_one(&self.db)
        .await?;

        Ok(source)
    }

    /// List all emission sources for a site
    pub async fn list(&self, site_id: Uuid) -> AppResult<Vec<EmissionSource>> {
        let sources = sqlx::query_as::<_, EmissionSource>(
            r#"
            SELECT id, site_id, name, geometry, base_intensity, created_at, updated_at
            FROM emission_sources
            WHERE site_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(&self.db)
        .await?;

        Ok(sources)
    }

    /// Get an emission source by ID
    pub async fn get(&self, site_id: Uuid, source_id: Uuid) -> AppResult<EmissionSource> {
        let source = sqlx::query_as::<_, EmissionSource>(
            r#"
            SELECT id, site_id, name, geometry, base_intensity, created_at, updated_at
            FROM emission_sources
            WHERE id = $1 AND site_id = $2
            "#,
        )
        .bind(source_id)
        .bind(site_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Emission source".to_string()))?;

        Ok(source)
    }

    /// Update an emission source
    pub async fn update(
        &self,
        site_id: Uuid,
        source_id: Uuid,
        input: UpdateEmissionSourceInput,
    ) -> AppResult<EmissionSource> {
        input.validate()?;

        let geometry = match &input.geometry {
            Some(geometry) => {
                validate_source_geometry(geometry).map_err(|msg| AppError::Validation {
                    field: "geometry".to_string(),
                    message: msg.to_string(),
                })?;
                Some(
                    serde_json::to_value(geometry)
                        .map_err(|e| AppError::Internal(e.to_string()))?,
                )
            }
            None => None,
        };

        if let Some(base_intensity) = input.base_intensity {
            validate_base_intensity(base_intensity).map_err(|msg| AppError::Validation {
                field: "base_intensity".to_string(),
                message: msg.to_string(),
            })?;
        }

        let source = sqlx::query_as::<_, EmissionSource>(
            r#"
            UPDATE emission_sources
            SET name = COALESCE($3, name),
                geometry = COALESCE($4, geometry),
                base_intensity = COALESCE($5, base_intensity),
                updated_at = NOW()
            WHERE id = $1 AND site_id = $2
            RETURNING id, site_id, name, geometry, base_intensity, created_at, updated_at
            "#,
        )
        .bind(source_id)
        .bind(site_id)
        .bind(&input.name)
        .bind(&geometry)
        .bind(input.base_intensity)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Emission source".to_string()))?;

        Ok(source)
    }

    /// Delete an emission source
    pub async fn delete(&self, site_id: Uuid, source_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM emission_sources WHERE id = $1 AND site_id = $2")
            .bind(source_id)
            .bind(site_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Emission source".to_string()));
        }

        Ok(())
    }
}
