//! Emission source models

use serde::{Deserialize, Serialize};

use crate::types::MapPoint;

/// Base intensity assigned to a source when the operator does not pick one.
pub const DEFAULT_BASE_INTENSITY: f64 = 3.0;

/// Geometry of an emission source as drawn on the site map. A point marks
/// a single outlet (vent, stack, inlet works); a polygon outlines an area
/// source such as a lagoon or sludge bed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceGeometry {
    Point { x: f64, y: f64 },
    Polygon { points: Vec<MapPoint> },
}

impl SourceGeometry {
    /// Resolve the geometry to the single center point that anchors a
    /// plume. A polygon resolves to the arithmetic mean of its vertices.
    /// Returns `None` when no center can be derived (empty polygon); such
    /// a source is skipped during prediction, it never fails the batch.
    pub fn center(&self) -> Option<MapPoint> {
        match self {
            SourceGeometry::Point { x, y } => Some(MapPoint::new(*x, *y)),
            SourceGeometry::Polygon { points } => {
                if points.is_empty() {
                    return None;
                }
                let n = points.len() as f64;
                let (sx, sy) = points
                    .iter()
                    .fold((0.0, 0.0), |(ax, ay), p| (ax + p.x, ay + p.y));
                Some(MapPoint::new(sx / n, sy / n))
            }
        }
    }
}
