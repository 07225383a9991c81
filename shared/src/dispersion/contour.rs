//! Iso-intensity contour extraction (`plume-v2` only)

use crate::dispersion::geometry;
use crate::dispersion::intensity::{PlumeExtent, DECAY_SCALE};
use crate::models::IntensityContour;
use crate::types::MapPoint;

/// Fixed thresholds as fractions of peak intensity, with display labels.
/// The order here is display order only; nesting follows from the
/// monotonic distance fractions and is never re-validated downstream.
pub const CONTOUR_THRESHOLDS: [(f64, &str); 3] = [(0.8, "high"), (0.5, "medium"), (0.2, "low")];

/// Contours smaller than this fraction of the plume carry no information
/// and are omitted rather than emitted as degenerate polygons.
pub const MIN_CONTOUR_FRACTION: f64 = 0.05;

/// Invert the decay law: the distance, as a fraction of the plume extent,
/// at which intensity falls to `threshold` of the source value.
pub fn distance_fraction(threshold: f64) -> f64 {
    (-threshold.ln() * DECAY_SCALE).min(1.0)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Materialize one contour polygon per threshold, innermost first.
pub fn extract_contours(
    center: MapPoint,
    wind_from_deg: f64,
    extent: &PlumeExtent,
    base_intensity: f64,
) -> Vec<IntensityContour> {
    CONTOUR_THRESHOLDS
        .iter()
        .filter_map(|&(threshold, level)| {
            let fraction = distance_fraction(threshold);
            if fraction <= MIN_CONTOUR_FRACTION {
                return None;
            }
            Some(IntensityContour {
                level: level.to_string(),
                threshold,
                intensity: round1(base_intensity * threshold),
                coordinates: geometry::cone_at_fraction(
                    center,
                    wind_from_deg,
                    extent.length,
                    extent.max_width,
                    fraction,
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispersion::intensity;

    #[test]
    fn test_distance_fractions_strictly_increase_as_threshold_drops() {
        let fractions: Vec<f64> = CONTOUR_THRESHOLDS
            .iter()
            .map(|&(threshold, _)| distance_fraction(threshold))
            .collect();
        for pair in fractions.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        for fraction in &fractions {
            assert!(*fraction <= 1.0);
            assert!(*fraction > MIN_CONTOUR_FRACTION);
        }
    }

    #[test]
    fn test_decay_round_trip() {
        // Walking out to the inverted distance must land back on the
        // threshold intensity, for every entry in the table.
        let extent_length = 40.0;
        let base = 3.0;
        for &(threshold, _) in &CONTOUR_THRESHOLDS {
            let d = distance_fraction(threshold) * extent_length;
            let intensity = intensity::intensity_at(base, extent_length, d);
            assert!((intensity - threshold * base).abs() < 1e-9);
        }
    }

    #[test]
    fn test_contours_emitted_for_standard_thresholds() {
        let extent = PlumeExtent {
            length: 40.0,
            max_width: 10.0,
            peak_intensity: 3.6,
        };
        let contours = extract_contours(MapPoint::new(50.0, 50.0), 270.0, &extent, 3.0);
        assert_eq!(contours.len(), 3);
        assert_eq!(contours[0].level, "high");
        assert_eq!(contours[2].level, "low");
        // Absolute intensities are base * threshold, one decimal.
        assert_eq!(contours[0].intensity, 2.4);
        assert_eq!(contours[1].intensity, 1.5);
        assert_eq!(contours[2].intensity, 0.6);
    }

    #[test]
    fn test_near_unity_threshold_is_omitted() {
        // ln(0.95) * -0.6 is about 0.03, under the minimum fraction.
        assert!(distance_fraction(0.95) <= MIN_CONTOUR_FRACTION);
    }

    #[test]
    fn test_contour_polygons_stay_in_bounds() {
        let extent = PlumeExtent {
            length: 80.0,
            max_width: 30.0,
            peak_intensity: 5.0,
        };
        let contours = extract_contours(MapPoint::new(90.0, 10.0), 225.0, &extent, 4.0);
        for contour in &contours {
            for p in &contour.coordinates {
                assert!(p.in_bounds());
            }
        }
    }
}
