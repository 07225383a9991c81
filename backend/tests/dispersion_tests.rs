//! Dispersion engine integration tests
//!
//! Exercises the plume geometry, intensity models and contour extraction
//! end to end, including:
//! - map bounds clamping of every emitted vertex
//! - contour nesting order
//! - decay law inversion round trips

use proptest::prelude::*;

use shared::dispersion::contour::{distance_fraction, CONTOUR_THRESHOLDS, MIN_CONTOUR_FRACTION};
use shared::dispersion::geometry::{cone_at_fraction, travel_bearing_deg, PLUME_SEGMENTS};
use shared::dispersion::intensity::{
    decay_curve, gaussian_v1_extent, intensity_at, plume_v2_extent, MAX_EXTENT_PERCENT,
};
use shared::dispersion::DispersionModel;
use shared::models::{DispersionWeather, StabilityClass};
use shared::types::MapPoint;

fn weather(wind_speed_mps: f64, wind_direction_deg: f64, stability: StabilityClass) -> DispersionWeather {
    DispersionWeather {
        wind_speed_mps,
        wind_direction_deg,
        stability,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Unknown stability codes fall back to the neutral class D.
    #[test]
    fn test_stability_defaults_to_neutral() {
        for code in ["G", "Z", "", "banana", "7"] {
            assert_eq!(StabilityClass::from_code(code), StabilityClass::D);
        }
    }

    /// Worked example: source at (50,50), wind from 270 degrees at 5 m/s,
    /// stability D, base intensity 3 under gaussian-v1. Plume length is
    /// (15 + 20) * 1 * 1.0 = 35 and the tip sits at roughly (85, 50).
    #[test]
    fn test_v1_worked_example_eastward() {
        let extent = gaussian_v1_extent(3.0, 5.0, StabilityClass::D);
        assert!((extent.length - 35.0).abs() < 1e-9);

        let footprint = DispersionModel::GaussianV1.footprint(
            MapPoint::new(50.0, 50.0),
            &weather(5.0, 270.0, StabilityClass::D),
            3.0,
        );
        let tip = footprint.geometry.coordinates[PLUME_SEGMENTS + 1];
        assert!((tip.x - 85.0).abs() < 1e-6);
        assert!((tip.y - 50.0).abs() < 1e-6);
    }

    /// The full-extent ring starts at the source and its last vertex
    /// stays adjacent to it.
    #[test]
    fn test_full_cone_anchored_at_source() {
        let center = MapPoint::new(40.0, 70.0);
        let ring = cone_at_fraction(center, 135.0, 25.0, 8.0, 1.0);
        assert_eq!(ring[0], center);

        let last = ring.last().unwrap();
        let gap = ((last.x - center.x).powi(2) + (last.y - center.y).powi(2)).sqrt();
        assert!(gap < 25.0 / PLUME_SEGMENTS as f64 * 2.0);
    }

    /// Contour distance fractions strictly increase as the threshold
    /// decreases, and never exceed the full plume.
    #[test]
    fn test_contour_nesting_order() {
        let fractions: Vec<f64> = CONTOUR_THRESHOLDS
            .iter()
            .map(|&(threshold, _)| distance_fraction(threshold))
            .collect();

        assert!(fractions[0] < fractions[1]);
        assert!(fractions[1] < fractions[2]);
        for fraction in fractions {
            assert!(fraction > MIN_CONTOUR_FRACTION);
            assert!(fraction <= 1.0);
        }
    }

    /// Inverting the decay law and evaluating it again lands on the
    /// threshold intensity for every entry in the table.
    #[test]
    fn test_decay_law_round_trip() {
        let base = 4.0;
        let extent = plume_v2_extent(base, 6.0, StabilityClass::C, 30.0);
        for &(threshold, _) in &CONTOUR_THRESHOLDS {
            let d = distance_fraction(threshold) * extent.length;
            let intensity = intensity_at(base, extent.length, d);
            assert!(
                (intensity - threshold * base).abs() < 1e-9,
                "threshold {} round-tripped to {}",
                threshold,
                intensity
            );
        }
    }

    /// plume-v2 footprints carry the three standard contours; gaussian-v1
    /// footprints carry none.
    #[test]
    fn test_contours_per_model_version() {
        let w = weather(4.0, 180.0, StabilityClass::B);
        let center = MapPoint::new(50.0, 50.0);

        let v1 = DispersionModel::GaussianV1.footprint(center, &w, 3.0);
        assert!(v1.geometry.contours.is_empty());

        let v2 = DispersionModel::PlumeV2 {
            duration_minutes: 60.0,
        }
        .footprint(center, &w, 3.0);
        assert_eq!(v2.geometry.contours.len(), 3);
        assert_eq!(v2.geometry.contours[0].level, "high");
        assert_eq!(v2.geometry.contours[1].level, "medium");
        assert_eq!(v2.geometry.contours[2].level, "low");
    }

    /// An unstable atmosphere spreads the plume further than a stable one
    /// under identical wind.
    #[test]
    fn test_unstable_air_spreads_further() {
        let unstable = gaussian_v1_extent(3.0, 5.0, StabilityClass::A);
        let stable = gaussian_v1_extent(3.0, 5.0, StabilityClass::F);
        assert!(unstable.length > stable.length);
        assert!(unstable.max_width > stable.max_width);

        let v2_unstable = plume_v2_extent(3.0, 5.0, StabilityClass::A, 60.0);
        let v2_stable = plume_v2_extent(3.0, 5.0, StabilityClass::F, 60.0);
        assert!(v2_unstable.max_width > v2_stable.max_width);
    }

    /// The decay curve starts at the base intensity and decreases
    /// monotonically out to the plume extent.
    #[test]
    fn test_decay_curve_shape() {
        let extent = plume_v2_extent(3.0, 5.0, StabilityClass::D, 60.0);
        let curve = decay_curve(3.0, extent.length);
        assert_eq!(curve.len(), 11);
        assert!((curve[0].intensity - 3.0).abs() < 1e-9);
        for pair in curve.windows(2) {
            assert!(pair[0].intensity > pair[1].intensity);
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating map coordinates
    fn coordinate_strategy() -> impl Strategy<Value = f64> {
        0.0..=100.0f64
    }

    /// Strategy for generating wind-from directions
    fn direction_strategy() -> impl Strategy<Value = f64> {
        0.0..360.0f64
    }

    /// Strategy for generating wind speeds
    fn wind_strategy() -> impl Strategy<Value = f64> {
        0.0..=30.0f64
    }

    /// Strategy for generating base intensities
    fn intensity_strategy() -> impl Strategy<Value = f64> {
        1.0..=5.0f64
    }

    /// Strategy for generating stability codes, valid or not
    fn stability_code_strategy() -> impl Strategy<Value = String> {
        "[A-H?]"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Every vertex of every footprint stays inside the map, for any
        /// source position, wind and model.
        #[test]
        fn prop_footprint_vertices_in_bounds(
            x in coordinate_strategy(),
            y in coordinate_strategy(),
            direction in direction_strategy(),
            wind in wind_strategy(),
            base in intensity_strategy(),
            code in stability_code_strategy()
        ) {
            let w = weather(wind, direction, StabilityClass::from_code(&code));
            let center = MapPoint::new(x, y);

            for model in [
                DispersionModel::GaussianV1,
                DispersionModel::PlumeV2 { duration_minutes: 60.0 },
            ] {
                let footprint = model.footprint(center, &w, base);
                for p in &footprint.geometry.coordinates {
                    prop_assert!(p.in_bounds());
                }
                for contour in &footprint.geometry.contours {
                    for p in &contour.coordinates {
                        prop_assert!(p.in_bounds());
                    }
                }
            }
        }

        /// The travel bearing is always a normalized compass angle
        /// opposite the wind-from direction.
        #[test]
        fn prop_travel_bearing_normalized(direction in direction_strategy()) {
            let bearing = travel_bearing_deg(direction);
            prop_assert!((0.0..360.0).contains(&bearing));
            let diff = (bearing - direction).rem_euclid(360.0);
            prop_assert!((diff - 180.0).abs() < 1e-9);
        }

        /// plume-v2 extent never exceeds the map-scale cap.
        #[test]
        fn prop_v2_extent_capped(
            wind in wind_strategy(),
            base in intensity_strategy(),
            duration in 1.0..=240.0f64
        ) {
            let extent = plume_v2_extent(base, wind, StabilityClass::D, duration);
            prop_assert!(extent.length <= MAX_EXTENT_PERCENT);
            prop_assert!(extent.length >= 0.0);
        }

        /// Peak intensity never drops below the base intensity and grows
        /// with wind speed.
        #[test]
        fn prop_peak_intensity_bounded_below(
            wind in wind_strategy(),
            base in intensity_strategy()
        ) {
            let v1 = gaussian_v1_extent(base, wind, StabilityClass::D);
            let v2 = plume_v2_extent(base, wind, StabilityClass::D, 60.0);
            prop_assert!(v1.peak_intensity >= base);
            prop_assert!(v2.peak_intensity >= base);
            prop_assert!(v1.peak_intensity >= v2.peak_intensity);
        }

        /// Decay intensity is positive and bounded by the base value.
        #[test]
        fn prop_decay_bounded(
            base in intensity_strategy(),
            length in 0.1..=60.0f64,
            fraction in 0.0..=1.0f64
        ) {
            let intensity = intensity_at(base, length, length * fraction);
            prop_assert!(intensity > 0.0);
            prop_assert!(intensity <= base + 1e-9);
        }

        /// The ring always has the fixed vertex count set by the
        /// resolution, regardless of inputs.
        #[test]
        fn prop_ring_vertex_count(
            x in coordinate_strategy(),
            y in coordinate_strategy(),
            direction in direction_strategy(),
            length in 0.0..=80.0f64,
            width in 0.0..=40.0f64,
            fraction in 0.05..=1.0f64
        ) {
            let ring = cone_at_fraction(MapPoint::new(x, y), direction, length, width, fraction);
            prop_assert_eq!(ring.len(), 2 * PLUME_SEGMENTS + 2);
        }
    }
}
