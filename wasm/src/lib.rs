//! WebAssembly module for the Wastewater Operations Platform
//!
//! Provides client-side computation for the site map UI:
//! - Live footprint preview while an operator drags an emission source
//! - Intensity contour preview
//! - Decay curve sampling for the diagnostics panel
//! - Source geometry center resolution

use wasm_bindgen::prelude::*;

use shared::dispersion::{geometry, intensity, DispersionModel};
use shared::models::{DispersionWeather, ModelVersion, SourceGeometry, StabilityClass};
use shared::types::MapPoint;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_model(model_version: &str, duration_minutes: f64) -> Result<DispersionModel, JsValue> {
    let version: ModelVersion = model_version
        .parse()
        .map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    Ok(DispersionModel::from_version(version, duration_minutes))
}

/// Compute a footprint preview for a source at `(x, y)` under the given
/// weather, returned as the same JSON geometry the backend persists.
#[wasm_bindgen]
pub fn preview_footprint(
    x: f64,
    y: f64,
    wind_from_deg: f64,
    wind_speed_mps: f64,
    stability_code: &str,
    base_intensity: f64,
    model_version: &str,
    duration_minutes: f64,
) -> Result<String, JsValue> {
    let model = parse_model(model_version, duration_minutes)?;
    let weather = DispersionWeather {
        wind_speed_mps,
        wind_direction_deg: wind_from_deg,
        stability: StabilityClass::from_code(stability_code),
    };

    let footprint = model.footprint(MapPoint::new(x, y).clamped(), &weather, base_intensity);
    serde_json::to_string(&footprint.geometry)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize geometry: {}", e)))
}

/// Peak intensity a model would report for the given inputs.
#[wasm_bindgen]
pub fn preview_peak_intensity(
    wind_speed_mps: f64,
    base_intensity: f64,
    model_version: &str,
) -> Result<f64, JsValue> {
    let model = parse_model(model_version, intensity::DEFAULT_DURATION_MINUTES)?;
    let weather = DispersionWeather {
        wind_speed_mps,
        wind_direction_deg: 0.0,
        stability: StabilityClass::D,
    };
    Ok(model
        .footprint(MapPoint::new(50.0, 50.0), &weather, base_intensity)
        .peak_intensity)
}

/// Sample the plume-v2 decay law for the diagnostics panel.
#[wasm_bindgen]
pub fn decay_curve_json(
    base_intensity: f64,
    wind_speed_mps: f64,
    stability_code: &str,
    duration_minutes: f64,
) -> Result<String, JsValue> {
    let extent = intensity::plume_v2_extent(
        base_intensity,
        wind_speed_mps,
        StabilityClass::from_code(stability_code),
        duration_minutes,
    );
    let samples = intensity::decay_curve(base_intensity, extent.length);
    serde_json::to_string(&samples)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize curve: {}", e)))
}

/// Resolve a source geometry (as stored JSON) to its plume anchor point.
/// Returns a `{x, y}` JSON string, or an error when no center exists.
#[wasm_bindgen]
pub fn resolve_source_center(geometry_json: &str) -> Result<String, JsValue> {
    let geometry: SourceGeometry = serde_json::from_str(geometry_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid geometry JSON: {}", e)))?;
    let center = geometry
        .center()
        .ok_or_else(|| JsValue::from_str("Geometry does not resolve to a center point"))?;
    serde_json::to_string(&center)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize center: {}", e)))
}

/// Direction the plume travels for a given wind-from direction, for the
/// map's wind arrow.
#[wasm_bindgen]
pub fn travel_bearing(wind_from_deg: f64) -> f64 {
    geometry::travel_bearing_deg(wind_from_deg)
}
