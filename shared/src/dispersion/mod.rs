//! Odour dispersion prediction engine
//!
//! Computes, for one emission source under one weather observation, the
//! map-relative footprint polygon where odour is likely to be
//! perceptible. Two model versions coexist (see [`intensity`]); which
//! one runs is a configuration choice, and every stored prediction is
//! tagged with the version that produced it.

pub mod contour;
pub mod geometry;
pub mod intensity;
pub mod stability;

pub use intensity::{DecaySample, PlumeExtent};

use crate::models::{
    DispersionWeather, ModelVersion, PredictionGeometry, SourceGeometry,
};
use crate::types::MapPoint;

/// Dispersion strategy selected by configuration. A small closed set of
/// named strategies with explicit dispatch; the versions encode genuinely
/// different physical assumptions and stay independently auditable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DispersionModel {
    GaussianV1,
    PlumeV2 {
        /// Travel-time window feeding the distance model.
        duration_minutes: f64,
    },
}

/// Full engine output for one source: the outer footprint with any
/// nested contours, plus the peak intensity at the source.
#[derive(Debug, Clone, PartialEq)]
pub struct PlumeFootprint {
    pub geometry: PredictionGeometry,
    pub peak_intensity: f64,
}

impl DispersionModel {
    pub fn from_version(version: ModelVersion, duration_minutes: f64) -> Self {
        match version {
            ModelVersion::GaussianV1 => DispersionModel::GaussianV1,
            ModelVersion::PlumeV2 => DispersionModel::PlumeV2 { duration_minutes },
        }
    }

    /// Version tag stored alongside every prediction this model emits.
    pub fn version(&self) -> ModelVersion {
        match self {
            DispersionModel::GaussianV1 => ModelVersion::GaussianV1,
            DispersionModel::PlumeV2 { .. } => ModelVersion::PlumeV2,
        }
    }

    /// Compute the footprint for a source centered at `center`.
    pub fn footprint(
        &self,
        center: MapPoint,
        weather: &DispersionWeather,
        base_intensity: f64,
    ) -> PlumeFootprint {
        match self {
            DispersionModel::GaussianV1 => {
                let extent = intensity::gaussian_v1_extent(
                    base_intensity,
                    weather.wind_speed_mps,
                    weather.stability,
                );
                let ring = geometry::cone_at_fraction(
                    center,
                    weather.wind_direction_deg,
                    extent.length,
                    extent.max_width,
                    1.0,
                );
                PlumeFootprint {
                    geometry: PredictionGeometry::polygon(ring),
                    peak_intensity: extent.peak_intensity,
                }
            }
            DispersionModel::PlumeV2 { duration_minutes } => {
                let extent = intensity::plume_v2_extent(
                    base_intensity,
                    weather.wind_speed_mps,
                    weather.stability,
                    *duration_minutes,
                );
                let ring = geometry::cone_at_fraction(
                    center,
                    weather.wind_direction_deg,
                    extent.length,
                    extent.max_width,
                    1.0,
                );
                let mut geometry = PredictionGeometry::polygon(ring);
                geometry.contours = contour::extract_contours(
                    center,
                    weather.wind_direction_deg,
                    &extent,
                    base_intensity,
                );
                PlumeFootprint {
                    geometry,
                    peak_intensity: extent.peak_intensity,
                }
            }
        }
    }
}

/// Run the model against a source geometry. Returns `None` when the
/// geometry cannot be resolved to a center point; callers skip such a
/// source and continue the batch.
pub fn predict_for_source(
    model: &DispersionModel,
    geometry: &SourceGeometry,
    weather: &DispersionWeather,
    base_intensity: f64,
) -> Option<PlumeFootprint> {
    let center = geometry.center()?;
    Some(model.footprint(center, weather, base_intensity))
}
