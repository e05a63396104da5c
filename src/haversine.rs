//! Haversine distance matrix provider (fallback when OSRM is unavailable).
//!
//! Straight-line distance ignores the street network, so detours read
//! shorter than they walk, but it needs no collaborator at all.

use crate::coord::Coord;
use crate::traits::DistanceMatrixProvider;

/// Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance matrix provider, in metres.
#[derive(Debug, Clone, Copy, Default)]
pub struct HaversineMatrix;

/// Great-circle distance between two points in metres.
pub fn haversine_m(from: Coord, to: Coord) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lon = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

impl DistanceMatrixProvider for HaversineMatrix {
    fn matrix_for(&self, locations: &[Coord]) -> Option<Vec<Vec<f64>>> {
        let n = locations.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for (i, from) in locations.iter().enumerate() {
            for (j, to) in locations.iter().enumerate() {
                if i != j {
                    matrix[i][j] = haversine_m(*from, *to);
                }
            }
        }

        Some(matrix)
    }
}
