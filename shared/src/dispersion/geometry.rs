//! Plume footprint polygon generation

use crate::types::MapPoint;

/// Number of edge steps per side of the footprint polygon. More segments
/// only smooths the outline, it does not change the physics.
pub const PLUME_SEGMENTS: usize = 12;

/// Direction the plume travels, given the meteorological wind-from
/// direction, in compass degrees.
pub fn travel_bearing_deg(wind_from_deg: f64) -> f64 {
    (wind_from_deg + 180.0).rem_euclid(360.0)
}

/// Unit step across the map image for a compass bearing. The map origin
/// is top-left, so north points toward decreasing y.
fn bearing_step(bearing_deg: f64) -> (f64, f64) {
    let rad = bearing_deg.to_radians();
    (rad.sin(), -rad.cos())
}

/// Closed teardrop polygon approximating the footprint at `fraction` of
/// the full plume extent, anchored at the source center and oriented
/// along the direction the wind blows toward.
///
/// The ring starts at the source point, walks the right edge outward with
/// the half-width growing linearly, places the tip on the centerline at
/// the full (fractional) distance, then walks the left edge back toward
/// the source. The ring is implicitly closed and every vertex is clamped
/// to the map bounds.
///
/// The full footprint is `fraction = 1.0`; each intensity contour reuses
/// this with its own smaller fraction.
pub fn cone_at_fraction(
    center: MapPoint,
    wind_from_deg: f64,
    length: f64,
    max_width: f64,
    fraction: f64,
) -> Vec<MapPoint> {
    let bearing = travel_bearing_deg(wind_from_deg);
    let (dx, dy) = bearing_step(bearing);
    // Right-hand perpendicular of the travel direction.
    let (px, py) = bearing_step(bearing + 90.0);

    let reach = length * fraction;
    let half_width = max_width * fraction * 0.5;

    let mut ring = Vec::with_capacity(2 * PLUME_SEGMENTS + 2);
    ring.push(center.clamped());

    for i in 1..=PLUME_SEGMENTS {
        let t = i as f64 / PLUME_SEGMENTS as f64;
        ring.push(
            MapPoint::new(
                center.x + dx * reach * t + px * half_width * t,
                center.y + dy * reach * t + py * half_width * t,
            )
            .clamped(),
        );
    }

    // Tip on the centerline at full reach.
    ring.push(MapPoint::new(center.x + dx * reach, center.y + dy * reach).clamped());

    for i in (1..=PLUME_SEGMENTS).rev() {
        let t = i as f64 / PLUME_SEGMENTS as f64;
        ring.push(
            MapPoint::new(
                center.x + dx * reach * t - px * half_width * t,
                center.y + dy * reach * t - py * half_width * t,
            )
            .clamped(),
        );
    }

    ring
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dist(a: MapPoint, b: MapPoint) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    #[test]
    fn test_travel_bearing_flips_wind_direction() {
        assert_eq!(travel_bearing_deg(270.0), 90.0);
        assert_eq!(travel_bearing_deg(0.0), 180.0);
        assert_eq!(travel_bearing_deg(359.0), 179.0);
    }

    #[test]
    fn test_eastward_tip_position() {
        // Wind from 270 degrees blows eastward; a 35-unit plume from
        // (50,50) must put its tip at roughly (85,50).
        let ring = cone_at_fraction(MapPoint::new(50.0, 50.0), 270.0, 35.0, 5.6, 1.0);
        let tip = ring[PLUME_SEGMENTS + 1];
        assert!((tip.x - 85.0).abs() < 1e-9);
        assert!((tip.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_northward_travel_decreases_y() {
        // Wind from the south (180) blows north, which is up the image.
        let ring = cone_at_fraction(MapPoint::new(50.0, 50.0), 180.0, 20.0, 4.0, 1.0);
        let tip = ring[PLUME_SEGMENTS + 1];
        assert!((tip.x - 50.0).abs() < 1e-9);
        assert!((tip.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_ring_starts_and_ends_adjacent_to_source() {
        let center = MapPoint::new(50.0, 50.0);
        let ring = cone_at_fraction(center, 45.0, 30.0, 10.0, 1.0);
        assert_eq!(ring[0], center);
        let step = 30.0 / PLUME_SEGMENTS as f64;
        assert!(dist(*ring.last().unwrap(), center) < 2.0 * step);
    }

    #[test]
    fn test_every_vertex_clamped_to_map() {
        // A long plume from near the edge must truncate, not escape.
        let ring = cone_at_fraction(MapPoint::new(95.0, 5.0), 270.0, 50.0, 30.0, 1.0);
        for p in &ring {
            assert!(p.in_bounds(), "vertex out of bounds: {:?}", p);
        }
    }

    #[test]
    fn test_vertex_count_is_fixed_by_resolution() {
        let ring = cone_at_fraction(MapPoint::new(50.0, 50.0), 10.0, 12.0, 3.0, 0.5);
        assert_eq!(ring.len(), 2 * PLUME_SEGMENTS + 2);
    }

    #[test]
    fn test_fraction_scales_reach() {
        let center = MapPoint::new(50.0, 50.0);
        let full = cone_at_fraction(center, 270.0, 40.0, 8.0, 1.0);
        let half = cone_at_fraction(center, 270.0, 40.0, 8.0, 0.5);
        let full_tip = full[PLUME_SEGMENTS + 1];
        let half_tip = half[PLUME_SEGMENTS + 1];
        assert!((dist(full_tip, center) - 2.0 * dist(half_tip, center)).abs() < 1e-9);
    }
}
