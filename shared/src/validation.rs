//! Validation utilities for the Wastewater Operations Platform

use crate::models::SourceGeometry;
use crate::types::MAP_EXTENT;

// ============================================================================
// Map Geometry Validations
// ============================================================================

/// Validate a single map-relative coordinate value.
pub fn validate_map_coordinate(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() {
        return Err("Map coordinates must be finite numbers");
    }
    if !(0.0..=MAP_EXTENT).contains(&value) {
        return Err("Map coordinates must be between 0 and 100");
    }
    Ok(())
}

/// Validate an emission source geometry as drawn by an operator. Polygons
/// need at least three vertices to outline an area on the map.
pub fn validate_source_geometry(geometry: &SourceGeometry) -> Result<(), &'static str> {
    match geometry {
        SourceGeometry::Point { x, y } => {
            validate_map_coordinate(*x)?;
            validate_map_coordinate(*y)
        }
        SourceGeometry::Polygon { points } => {
            if points.len() < 3 {
                return Err("Polygon sources need at least 3 vertices");
            }
            for p in points {
                validate_map_coordinate(p.x)?;
                validate_map_coordinate(p.y)?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Odour Intensity Validations
// ============================================================================

/// Validate a base intensity on the nominal 1..5 scale.
pub fn validate_base_intensity(intensity: f64) -> Result<(), &'static str> {
    if !intensity.is_finite() || !(1.0..=5.0).contains(&intensity) {
        return Err("Base intensity must be between 1 and 5");
    }
    Ok(())
}

/// Validate an incident intensity rating on the 1..5 scale.
pub fn validate_intensity_rating(rating: i32) -> Result<(), &'static str> {
    if !(1..=5).contains(&rating) {
        return Err("Intensity rating must be between 1 and 5");
    }
    Ok(())
}

// ============================================================================
// Weather Validations
// ============================================================================

/// Validate a wind speed in m/s.
pub fn validate_wind_speed(speed_mps: f64) -> Result<(), &'static str> {
    if !speed_mps.is_finite() || speed_mps < 0.0 {
        return Err("Wind speed must be zero or positive");
    }
    Ok(())
}

/// Validate a meteorological wind direction in degrees.
pub fn validate_wind_direction(direction_deg: f64) -> Result<(), &'static str> {
    if !direction_deg.is_finite() || !(0.0..360.0).contains(&direction_deg) {
        return Err("Wind direction must be at least 0 and below 360 degrees");
    }
    Ok(())
}

/// Validate an operator-entered stability code. Stored historical rows
/// may hold anything (the parameter table defaults unknowns to neutral),
/// but new input must be a recognized class.
pub fn validate_stability_code(code: &str) -> Result<(), &'static str> {
    let trimmed = code.trim();
    if trimmed.len() == 1 && matches!(trimmed.to_ascii_uppercase().as_str(), "A" | "B" | "C" | "D" | "E" | "F") {
        Ok(())
    } else {
        Err("Stability class must be a letter A through F")
    }
}

// ============================================================================
// Prediction Validations
// ============================================================================

/// Validate a prediction validity window length in hours.
pub fn validate_validity_hours(hours: i64) -> Result<(), &'static str> {
    if hours < 1 {
        return Err("Validity window must be at least 1 hour");
    }
    if hours > 168 {
        return Err("Validity window must be at most 168 hours");
    }
    Ok(())
}
