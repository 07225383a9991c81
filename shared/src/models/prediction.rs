//! Odour prediction artifacts

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::types::MapPoint;

/// Identifies which dispersion algorithm produced a stored prediction.
/// The stored tag is authoritative for historical records: predictions
/// from an older version are regenerated, never reinterpreted or
/// "upgraded" with the other version's constants.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ModelVersion {
    #[serde(rename = "gaussian-v1")]
    GaussianV1,
    #[serde(rename = "plume-v2")]
    PlumeV2,
}

impl ModelVersion {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVersion::GaussianV1 => "gaussian-v1",
            ModelVersion::PlumeV2 => "plume-v2",
        }
    }
}

impl std::fmt::Display for ModelVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown model version: {0}")]
pub struct ParseModelVersionError(String);

impl FromStr for ModelVersion {
    type Err = ParseModelVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gaussian-v1" => Ok(ModelVersion::GaussianV1),
            "plume-v2" => Ok(ModelVersion::PlumeV2),
            other => Err(ParseModelVersionError(other.to_string())),
        }
    }
}

/// Footprint polygon for one prediction, with optional nested intensity
/// contours. Rings are implicitly closed; every coordinate is clamped to
/// the map bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionGeometry {
    /// Always `"polygon"`.
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<MapPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contours: Vec<IntensityContour>,
}

impl PredictionGeometry {
    pub fn polygon(coordinates: Vec<MapPoint>) -> Self {
        Self {
            geometry_type: "polygon".to_string(),
            coordinates,
            contours: Vec::new(),
        }
    }
}

/// A nested iso-intensity ring inside the full footprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntensityContour {
    /// Display label: `high`, `medium` or `low`.
    pub level: String,
    /// Fraction of peak intensity this ring encloses.
    pub threshold: f64,
    /// Absolute intensity at the ring, rounded to one decimal.
    pub intensity: f64,
    pub coordinates: Vec<MapPoint>,
}
