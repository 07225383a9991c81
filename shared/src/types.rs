//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Upper bound of the map coordinate space on both axes.
pub const MAP_EXTENT: f64 = 100.0;

/// Map-relative position expressed as percentages of the site-map image,
/// `x, y ∈ [0, 100]`, origin top-left. Independent of image resolution;
/// every consumer (map rendering included) relies on this contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

impl MapPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes to the map bounds. Footprints that would extend
    /// past the image edge are truncated at the boundary, not wrapped or
    /// rejected.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, MAP_EXTENT),
            y: self.y.clamp(0.0, MAP_EXTENT),
        }
    }

    pub fn in_bounds(&self) -> bool {
        (0.0..=MAP_EXTENT).contains(&self.x) && (0.0..=MAP_EXTENT).contains(&self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_truncates_to_map() {
        let p = MapPoint::new(104.2, -3.0).clamped();
        assert_eq!(p, MapPoint::new(100.0, 0.0));
    }

    #[test]
    fn test_clamped_leaves_interior_points_alone() {
        let p = MapPoint::new(50.0, 61.5).clamped();
        assert_eq!(p, MapPoint::new(50.0, 61.5));
    }

    #[test]
    fn test_in_bounds() {
        assert!(MapPoint::new(0.0, 100.0).in_bounds());
        assert!(!MapPoint::new(100.1, 50.0).in_bounds());
        assert!(!MapPoint::new(50.0, -0.1).in_bounds());
    }
}
