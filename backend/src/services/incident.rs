//! Nuisance-odour incident tracking service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::types::MapPoint;
use shared::validation::validate_map_coordinate;

/// Service for tracking odour complaints and their follow-up
#[derive(Clone)]
pub struct OdourIncidentService {
    db: PgPool,
}

/// A reported nuisance-odour incident
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OdourIncident {
    pub id: Uuid,
    pub site_id: Uuid,
    pub reported_at: DateTime<Utc>,
    pub location: Option<serde_json::Value>,
    pub intensity: i32,
    pub description: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for reporting an incident
#[derive(Debug, Deserialize, Validate)]
pub struct ReportIncidentInput {
    pub reported_at: Option<DateTime<Utc>>,
    /// Map-relative location of the complaint, when known
    pub location: Option<MapPoint>,
    #[validate(range(min = 1, max = 5))]
    pub intensity: i32,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

/// Input for moving an incident through its follow-up workflow
#[derive(Debug, Deserialize)]
pub struct UpdateIncidentStatusInput {
    pub status: String,
}

fn is_valid_status(status: &str) -> bool {
    matches!(status, "reported" | "investigating" | "resolved" | "dismissed")
}

impl OdourIncidentService {
    /// Create a new OdourIncidentService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Report a new incident for a site
    pub async fn report(
        &self,
        site_id: Uuid,
        input: ReportIncidentInput,
    ) -> AppResult<OdourIncident> {
        input.validate()?;

        let location = match input.location {
            Some(point) => {
                validate_map_coordinate(point.x)
                    .and_then(|_| validate_map_coordinate(point.y))
                    .map_err(|msg| AppError::Validation {
                        field: "location".to_string(),
                        message: msg.to_string(),
                    })?;
                Some(serde_json::to_value(point).map_err(|e| AppError::Internal(e.to_string()))?)
            }
            None => None,
        };

        let site_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM sites WHERE id = $1)")
                .bind(site_id)
                .fetch_one(&self.db)
                .await?;
        if !site_exists {
            return Err(AppError::NotFound("Site".to_string()));
        }

        let reported_at = input.reported_at.unwrap_or_else(Utc::now);

        let incident = sqlx::query_as::<_, OdourIncident>(
            r#"
            INSERT INTO odour_incidents (site_id, reported_at, location, intensity, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, site_id, reported_at, location, intensity, description,
                      status, created_at, updated_at
            "#,
        )
        .bind(site_id)
        .bind(reported_at)
        .bind(&location)
        .bind(input.intensity)
        .bind(&input.description)
        .fetch_one(&self.db)
        .await?;

        Ok(incident)
    }

    /// List incidents for a site, optionally filtered by status
    pub async fn list(
        &self,
        site_id: Uuid,
        status: Option<String>,
    ) -> AppResult<Vec<OdourIncident>> {
        if let Some(status) = &status {
            if !is_valid_status(status) {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: format!("Unknown incident status: {}", status),
                });
            }
        }

        let incidents = sqlx::query_as::<_, OdourIncident>(
            r#"
            SELECT id, site_id, reported_at, location, intensity, description,
                   status, created_at, updated_at
            FROM odour_incidents
            WHERE site_id = $1
              AND ($2::text IS NULL OR status = $2)
            ORDER BY reported_at DESC
            "#,
        )
        .bind(site_id)
        .bind(&status)
        .fetch_all(&self.db)
        .await?;

        Ok(incidents)
    }

    /// Get an incident by ID
    pub async fn get(&self, site_id: Uuid, incident_id: Uuid) -> AppResult<OdourIncident> {
        let incident = sqlx::query_as::<_, OdourIncident>(
            r#"
            SELECT id, site_id, reported_at, location, intensity, description,
                   status, created_at, updated_at
            FROM odour_incidents
            WHERE id = $1 AND site_id = $2
            "#,
        )
        .bind(incident_id)
        .bind(site_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Odour incident".to_string()))?;

        Ok(incident)
    }

    /// Update an incident's follow-up status
    pub async fn update_status(
        &self,
        site_id: Uuid,
        incident_id: Uuid,
        input: UpdateIncidentStatusInput,
    ) -> AppResult<OdourIncident> {
        if !is_valid_status(&input.status) {
            return Err(AppError::Validation {
                field: "status".to_string(),
                message: format!(
                    "Unknown incident status: {}. Must be one of: reported, investigating, resolved, dismissed",
                    input.status
                ),
            });
        }

        let incident = sqlx::query_as::<_, OdourIncident>(
            r#"
            UPDATE odour_incidents
            SET status = $3, updated_at = NOW()
            WHERE id = $1 AND site_id = $2
            RETURNING id, site_id, reported_at, location, intensity, description,
                      status, created_at, updated_at
            "#,
        )
        .bind(incident_id)
        .bind(site_id)
        .bind(&input.status)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Odour incident".to_string()))?;

        Ok(incident)
    }

    /// Delete an incident
    pub async fn delete(&self, site_id: Uuid, incident_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM odour_incidents WHERE id = $1 AND site_id = $2")
            .bind(incident_id)
            .bind(site_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Odour incident".to_string()));
        }

        Ok(())
    }
}
