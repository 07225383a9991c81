//! Plume extent and peak intensity models
//!
//! Two independently evolved versions coexist. `gaussian-v1` derives the
//! extent from wind speed and the sigma table directly; `plume-v2` uses a
//! travel-time distance with an exponential decay law. They encode
//! different physical assumptions and are never folded into one formula.

use crate::dispersion::stability;
use crate::models::StabilityClass;
use serde::Serialize;

/// Map scale used by `plume-v2`: one meter is roughly 0.02 map-percent,
/// assuming a site map covering about 500 m across.
pub const METERS_TO_MAP_PERCENT: f64 = 0.02;

/// Cap on plume extent in map units.
pub const MAX_EXTENT_PERCENT: f64 = 60.0;

/// Default travel-time window for the `plume-v2` distance model.
pub const DEFAULT_DURATION_MINUTES: f64 = 60.0;

/// Decay length scale as a fraction of the plume extent (`plume-v2`).
pub const DECAY_SCALE: f64 = 0.6;

/// Sample count of the diagnostic intensity-vs-distance curve.
pub const DECAY_CURVE_SAMPLES: usize = 11;

/// Extent and strength of one plume under given weather.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlumeExtent {
    /// Downwind reach in map-percent.
    pub length: f64,
    /// Full width at the far end, in map-percent.
    pub max_width: f64,
    pub peak_intensity: f64,
}

/// `gaussian-v1` extent: wind stretches the plume, the sigma table widens
/// it, base intensity scales it around the nominal midpoint of 3.
pub fn gaussian_v1_extent(
    base_intensity: f64,
    wind_speed_mps: f64,
    stability: StabilityClass,
) -> PlumeExtent {
    let params = stability::sigma_params(stability);
    let length = (15.0 + 4.0 * wind_speed_mps) * (base_intensity / 3.0) * params.spread_factor;
    PlumeExtent {
        length,
        max_width: length * params.sigma_y * 2.0,
        peak_intensity: base_intensity * (1.0 + 0.1 * wind_speed_mps),
    }
}

/// `plume-v2` extent: distance an air parcel travels over the duration
/// window, converted to map units and capped at the map scale limit.
pub fn plume_v2_extent(
    base_intensity: f64,
    wind_speed_mps: f64,
    stability: StabilityClass,
    duration_minutes: f64,
) -> PlumeExtent {
    let distance_meters = wind_speed_mps * duration_minutes * 60.0;
    let length = (distance_meters * METERS_TO_MAP_PERCENT).min(MAX_EXTENT_PERCENT);
    PlumeExtent {
        length,
        max_width: length * stability::spread_fraction(stability),
        peak_intensity: base_intensity * (1.0 + 0.05 * wind_speed_mps),
    }
}

/// `plume-v2` decay law: intensity at `distance` map-percent downwind of
/// the source. Zero-length plumes (calm air) collapse onto the source.
pub fn intensity_at(base_intensity: f64, extent_length: f64, distance: f64) -> f64 {
    if extent_length <= 0.0 {
        return if distance <= 0.0 { base_intensity } else { 0.0 };
    }
    base_intensity * (-distance / (DECAY_SCALE * extent_length)).exp()
}

/// One point on the diagnostic intensity-vs-distance curve.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct DecaySample {
    /// Distance from the source in map-percent.
    pub distance: f64,
    pub intensity: f64,
}

/// Sample the decay law at evenly spaced points from the source to the
/// full plume extent, for plotting and diagnostics.
pub fn decay_curve(base_intensity: f64, extent_length: f64) -> Vec<DecaySample> {
    (0..DECAY_CURVE_SAMPLES)
        .map(|i| {
            let distance = extent_length * i as f64 / (DECAY_CURVE_SAMPLES - 1) as f64;
            DecaySample {
                distance,
                intensity: intensity_at(base_intensity, extent_length, distance),
            }
        })
        .collect()
}
