//! Nominatim HTTP adapter for forward geocoding.

use std::sync::Arc;

use serde::Deserialize;

use crate::coord::Coord;
use crate::traits::{Geocoder, RateLimiter};

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim rejects anonymous clients; always send an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "stopover-planner/0.1".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Clone)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
    limiter: Arc<dyn RateLimiter + Send + Sync>,
}

impl NominatimClient {
    pub fn new(
        config: NominatimConfig,
        limiter: Arc<dyn RateLimiter + Send + Sync>,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            config,
            client,
            limiter,
        })
    }
}

impl Geocoder for NominatimClient {
    fn resolve(&self, address: &str) -> Option<Coord> {
        self.limiter.pace();

        let url = format!("{}/search", self.config.base_url);
        let response = self
            .client
            .get(url)
            .query(&[("q", address), ("format", "json")])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<Vec<NominatimPlace>>());

        let places = match response {
            Ok(places) => places,
            Err(err) => {
                tracing::warn!(%err, address, "geocoding lookup failed");
                return None;
            }
        };

        let place = places.into_iter().next()?;
        // Nominatim serialises lat/lon as strings.
        let lat: f64 = place.lat.parse().ok()?;
        let lon: f64 = place.lon.parse().ok()?;
        Some(Coord::new(lat, lon))
    }
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_best_match_first() {
        let body = r#"[{"lat":"55.7520","lon":"37.6175"},{"lat":"1.0","lon":"2.0"}]"#;
        let places: Vec<NominatimPlace> = serde_json::from_str(body).unwrap();
        let place = places.into_iter().next().unwrap();
        assert_eq!(place.lat.parse::<f64>().unwrap(), 55.752);
        assert_eq!(place.lon.parse::<f64>().unwrap(), 37.6175);
    }

    #[test]
    fn empty_result_set_means_not_found() {
        let places: Vec<NominatimPlace> = serde_json::from_str("[]").unwrap();
        assert!(places.is_empty());
    }
}
