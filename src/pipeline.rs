//! End-to-end planning pipeline.
//!
//! Resolves both addresses, traces the direct walking route, discovers
//! pharmacies along it, builds the all-pairs distance matrix, and hands the
//! candidate list to one of the two selection policies. Every stage failure
//! short-circuits with a [`PlanError`]; nothing is retried and nothing
//! persists between calls.

use std::fmt;

use crate::coord::Coord;
use crate::path::LineGeometry;
use crate::sampler::sample_waypoints;
use crate::selector::{best_combined_path, best_value_waypoint};
use crate::traits::{DistanceMatrixProvider, Geocoder, PoiProvider, PriceSource, RouteProvider};

#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Amenity category sampled along the route.
    pub amenity: String,
    /// Points-of-interest search radius around each sampled point, metres.
    pub sample_radius_m: u32,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            amenity: "pharmacy".to_string(),
            sample_radius_m: 500,
        }
    }
}

/// Why planning stopped. Each variant maps to one pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// Geocoding yielded no match for one or both addresses.
    AddressNotFound,
    /// The routing collaborator found no path between the endpoints.
    NoDirectRoute,
    /// Sampling produced zero points of interest along the whole route.
    NoWaypointsFound,
    /// The distance table was missing, malformed, or mis-dimensioned.
    MatrixUnavailable,
    /// A selection policy produced no candidate.
    SelectionImpossible,
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::AddressNotFound => "no coordinates found for one or both addresses",
            Self::NoDirectRoute => "no walking route found between the addresses",
            Self::NoWaypointsFound => "no pharmacies found along the route",
            Self::MatrixUnavailable => "distance matrix unavailable for the candidate locations",
            Self::SelectionImpossible => "no suitable pharmacy among the candidates",
        };
        f.write_str(message)
    }
}

impl std::error::Error for PlanError {}

/// A materialized route: collaborator geometry, total length, visited points.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedRoute {
    /// Pass-through geometry for map display.
    pub geometry: LineGeometry,
    /// Total route length in kilometres.
    pub distance_km: f64,
    /// The coordinates actually visited, in visiting order.
    pub points: Vec<Coord>,
}

/// A best-value route with the scoring that selected its stopover.
#[derive(Debug, Clone, PartialEq)]
pub struct BestValueRoute {
    pub route: PlannedRoute,
    /// Raw price tier of the chosen pharmacy.
    pub price_tier: f64,
    /// Tier plus the detour penalty that won the selection.
    pub effective_score: f64,
}

/// Candidate list and matrix shared by both policies.
struct Prepared {
    /// Index 0 = hospital (origin), last = home (destination), waypoint
    /// candidates in between. Every downstream lookup is positional.
    locations: Vec<Coord>,
    matrix: Vec<Vec<f64>>,
    direct_distance_m: f64,
}

/// Composes the four collaborators into the planning pipeline.
pub struct Planner<G, P, R, M> {
    geocoder: G,
    pois: P,
    router: R,
    matrix: M,
    options: PlanOptions,
}

impl<G, P, R, M> Planner<G, P, R, M>
where
    G: Geocoder,
    P: PoiProvider,
    R: RouteProvider,
    M: DistanceMatrixProvider,
{
    pub fn new(geocoder: G, pois: P, router: R, matrix: M) -> Self {
        Self::with_options(geocoder, pois, router, matrix, PlanOptions::default())
    }

    pub fn with_options(
        geocoder: G,
        pois: P,
        router: R,
        matrix: M,
        options: PlanOptions,
    ) -> Self {
        Self {
            geocoder,
            pois,
            router,
            matrix,
            options,
        }
    }

    /// Shortest combined path through up to three pharmacies near the route.
    pub fn shortest_route(&self, home: &str, hospital: &str) -> Result<PlannedRoute, PlanError> {
        let prepared = self.prepare(home, hospital)?;
        let path = best_combined_path(&prepared.matrix).ok_or(PlanError::SelectionImpossible)?;
        self.materialize(&prepared.locations, &path)
    }

    /// Route through the single pharmacy with the best price-versus-detour
    /// score. The price source is injected per call so each request draws
    /// fresh tiers (and tests substitute fixed ones).
    pub fn best_value_route<S: PriceSource>(
        &self,
        home: &str,
        hospital: &str,
        prices: &S,
    ) -> Result<BestValueRoute, PlanError> {
        let prepared = self.prepare(home, hospital)?;
        let pick = best_value_waypoint(
            &prepared.matrix,
            &prepared.locations,
            prepared.direct_distance_m,
            prices,
        )
        .ok_or(PlanError::SelectionImpossible)?;

        let path = vec![0, pick.index, prepared.locations.len() - 1];
        let route = self.materialize(&prepared.locations, &path)?;
        Ok(BestValueRoute {
            route,
            price_tier: pick.price_tier,
            effective_score: pick.effective_score,
        })
    }

    /// Stages shared by both policies: geocode, direct route, sampling,
    /// matrix. The first failing stage aborts the whole plan.
    fn prepare(&self, home: &str, hospital: &str) -> Result<Prepared, PlanError> {
        let home_coord = self
            .geocoder
            .resolve(home)
            .ok_or(PlanError::AddressNotFound)?;
        let hospital_coord = self
            .geocoder
            .resolve(hospital)
            .ok_or(PlanError::AddressNotFound)?;

        let direct = self
            .router
            .route(&[hospital_coord, home_coord])
            .ok_or(PlanError::NoDirectRoute)?;
        tracing::debug!(distance_m = direct.distance_m, "direct route traced");

        let waypoints = sample_waypoints(
            &self.pois,
            &direct.path,
            &self.options.amenity,
            self.options.sample_radius_m,
        );
        if waypoints.is_empty() {
            return Err(PlanError::NoWaypointsFound);
        }

        let mut locations = Vec::with_capacity(waypoints.len() + 2);
        locations.push(hospital_coord);
        locations.extend(waypoints);
        locations.push(home_coord);

        let matrix = self
            .matrix
            .matrix_for(&locations)
            .ok_or(PlanError::MatrixUnavailable)?;
        // A mis-dimensioned table breaks the positional indexing contract.
        if matrix.len() != locations.len()
            || matrix.iter().any(|row| row.len() != locations.len())
        {
            return Err(PlanError::MatrixUnavailable);
        }

        Ok(Prepared {
            locations,
            matrix,
            direct_distance_m: direct.distance_m,
        })
    }

    /// Requests final geometry for the ordered index path and converts the
    /// collaborator's metres to kilometres.
    fn materialize(
        &self,
        locations: &[Coord],
        path: &[usize],
    ) -> Result<PlannedRoute, PlanError> {
        let ordered: Vec<Coord> = path.iter().map(|&i| locations[i]).collect();
        let routed = self.router.route(&ordered).ok_or(PlanError::NoDirectRoute)?;

        Ok(PlannedRoute {
            geometry: routed.geometry,
            distance_km: routed.distance_m / 1000.0,
            points: ordered,
        })
    }
}
