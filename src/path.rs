//! Route path representation for traced geometries.
//!
//! Routing collaborators answer with a GeoJSON line in (lon, lat) axis
//! order. The conversion to the (lat, lon) convention used everywhere else
//! happens here, at the boundary, not within the planning core.

use serde::{Deserialize, Serialize};

use crate::coord::Coord;

/// An ordered point sequence tracing a route, start to end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    points: Vec<Coord>,
}

impl RoutePath {
    pub fn new(points: Vec<Coord>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Coord] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coord> {
        self.points
    }
}

/// A GeoJSON line geometry exactly as the routing collaborator returned it.
///
/// Kept in the collaborator's native (lon, lat) axis order so it can be
/// passed through to map frontends untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<[f64; 2]>,
}

impl LineGeometry {
    /// Decodes the geometry into a (lat, lon) point sequence.
    pub fn to_path(&self) -> RoutePath {
        let points = self
            .coordinates
            .iter()
            .map(|&[lon, lat]| Coord::new(lat, lon))
            .collect();
        RoutePath::new(points)
    }
}

/// A routing collaborator's full answer for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedPath {
    /// Decoded (lat, lon) point sequence of the traced route.
    pub path: RoutePath,
    /// Total route length in metres.
    pub distance_m: f64,
    /// Collaborator-native geometry, passed through for display.
    pub geometry: LineGeometry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_points() {
        let points = vec![Coord::new(38.5, -120.2), Coord::new(40.7, -120.95)];
        let path = RoutePath::new(points.clone());
        assert_eq!(path.points(), &points[..]);
    }

    #[test]
    fn test_into_points() {
        let points = vec![Coord::new(38.5, -120.2), Coord::new(40.7, -120.95)];
        let path = RoutePath::new(points.clone());
        assert_eq!(path.into_points(), points);
    }

    #[test]
    fn test_empty_path() {
        let path = RoutePath::new(vec![]);
        assert!(path.points().is_empty());
    }

    #[test]
    fn test_geometry_axis_order_conversion() {
        let geometry = LineGeometry {
            kind: "LineString".to_string(),
            coordinates: vec![[37.618423, 55.751244], [37.62, 55.76]],
        };
        let path = geometry.to_path();
        assert_eq!(path.points()[0], Coord::new(55.751244, 37.618423));
        assert_eq!(path.points()[1], Coord::new(55.76, 37.62));
    }

    #[test]
    fn test_geometry_round_trips_through_json() {
        let geometry = LineGeometry {
            kind: "LineString".to_string(),
            coordinates: vec![[4.3517, 50.8503]],
        };
        let json = serde_json::to_string(&geometry).unwrap();
        assert!(json.contains("\"type\":\"LineString\""));
        let back: LineGeometry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, geometry);
    }
}
