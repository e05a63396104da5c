//! OSRM HTTP adapter for walking routes and distance matrices.
//!
//! One client serves both collaborator roles: the `route` service for traced
//! paths and the `table` service for all-pairs distances.

use serde::Deserialize;

use crate::coord::Coord;
use crate::path::{LineGeometry, RoutedPath};
use crate::traits::{DistanceMatrixProvider, RouteProvider};

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://routing.openstreetmap.de/routed-foot".to_string(),
            profile: "foot".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// OSRM expects `lon,lat` pairs joined with `;`.
    fn coord_string(points: &[Coord]) -> String {
        points
            .iter()
            .map(|point| format!("{:.6},{:.6}", point.lon, point.lat))
            .collect::<Vec<_>>()
            .join(";")
    }
}

impl RouteProvider for OsrmClient {
    fn route(&self, points: &[Coord]) -> Option<RoutedPath> {
        if points.len() < 2 {
            return None;
        }

        let url = format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.config.base_url,
            self.config.profile,
            Self::coord_string(points)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        let body = match response {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(%err, "route request failed");
                return None;
            }
        };

        let route = body.routes.into_iter().next()?;
        Some(RoutedPath {
            path: route.geometry.to_path(),
            distance_m: route.distance,
            geometry: route.geometry,
        })
    }
}

impl DistanceMatrixProvider for OsrmClient {
    fn matrix_for(&self, locations: &[Coord]) -> Option<Vec<Vec<f64>>> {
        if locations.is_empty() {
            return Some(Vec::new());
        }

        let url = format!(
            "{}/table/v1/{}/{}?sources=all&destinations=all&annotations=distance",
            self.config.base_url,
            self.config.profile,
            Self::coord_string(locations)
        );

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>());

        match response {
            Ok(body) => body.distances,
            Err(err) => {
                tracing::warn!(%err, "table request failed");
                None
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: LineGeometry,
    distance: f64,
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    distances: Option<Vec<Vec<f64>>>,
}
