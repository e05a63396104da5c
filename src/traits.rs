//! Collaborator traits for the stopover planner.
//!
//! These are intentionally minimal. Concrete adapters (Nominatim, Overpass,
//! OSRM) implement them over HTTP; tests substitute in-memory doubles.

use crate::coord::Coord;
use crate::path::RoutedPath;

/// Resolves a free-text address to its best-matching coordinate.
pub trait Geocoder {
    /// `None` covers zero matches as well as transport-level failures.
    fn resolve(&self, address: &str) -> Option<Coord>;
}

/// Searches points of interest of one amenity category around a centre point.
pub trait PoiProvider {
    /// Matches within `radius_m` metres of `centre`. A failed lookup yields
    /// an empty list so that callers can tolerate partial coverage.
    fn search(&self, centre: Coord, radius_m: u32, amenity: &str) -> Vec<Coord>;
}

/// Requests one routed path visiting the given coordinates in order.
pub trait RouteProvider {
    /// `None` when the collaborator offers no route between the points.
    fn route(&self, points: &[Coord]) -> Option<RoutedPath>;
}

/// Provides an all-pairs distance matrix in metres for a set of locations.
///
/// The matrix is indexed by the provided location order. Walking distances
/// need not be symmetric; consumers must look up `matrix[i][j]` directionally.
pub trait DistanceMatrixProvider {
    /// `None` when the collaborator cannot produce a table.
    fn matrix_for(&self, locations: &[Coord]) -> Option<Vec<Vec<f64>>>;
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn resolve(&self, address: &str) -> Option<Coord> {
        (**self).resolve(address)
    }
}

impl<T: PoiProvider + ?Sized> PoiProvider for &T {
    fn search(&self, centre: Coord, radius_m: u32, amenity: &str) -> Vec<Coord> {
        (**self).search(centre, radius_m, amenity)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn route(&self, points: &[Coord]) -> Option<RoutedPath> {
        (**self).route(points)
    }
}

impl<T: DistanceMatrixProvider + ?Sized> DistanceMatrixProvider for &T {
    fn matrix_for(&self, locations: &[Coord]) -> Option<Vec<Vec<f64>>> {
        (**self).matrix_for(locations)
    }
}

/// Yields a price tier for a waypoint candidate.
///
/// Production draws tiers pseudo-randomly per request; tests inject fixed
/// mappings. The scoring formula itself never touches a RNG.
pub trait PriceSource {
    fn tier_for(&self, waypoint: Coord) -> f64;
}

impl<F> PriceSource for F
where
    F: Fn(Coord) -> f64,
{
    fn tier_for(&self, waypoint: Coord) -> f64 {
        self(waypoint)
    }
}

/// Paces outbound calls to collaborators with a request-rate ceiling.
///
/// One instance is shared by every client of the same collaborator so the
/// ceiling holds process-wide.
pub trait RateLimiter {
    /// Blocks until the next call may be issued.
    fn pace(&self);
}
