//! Overpass HTTP adapter for points-of-interest lookups.

use serde::Deserialize;

use crate::coord::Coord;
use crate::traits::PoiProvider;

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            base_url: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }
}

impl PoiProvider for OverpassClient {
    fn search(&self, centre: Coord, radius_m: u32, amenity: &str) -> Vec<Coord> {
        let query = format!(
            "[out:json];node[\"amenity\"=\"{}\"](around:{},{},{});out;",
            amenity, radius_m, centre.lat, centre.lon
        );

        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("data", query.as_str())])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OverpassResponse>());

        match response {
            Ok(body) => body
                .elements
                .into_iter()
                .map(|node| Coord::new(node.lat, node.lon))
                .collect(),
            Err(err) => {
                tracing::warn!(%err, lat = centre.lat, lon = centre.lon, "poi lookup failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassNode>,
}

#[derive(Debug, Deserialize)]
struct OverpassNode {
    lat: f64,
    lon: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_node_coordinates() {
        let body = r#"{"elements":[{"type":"node","id":1,"lat":55.75,"lon":37.62},
                                    {"type":"node","id":2,"lat":55.76,"lon":37.63}]}"#;
        let parsed: OverpassResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.elements.len(), 2);
        assert_eq!(parsed.elements[0].lat, 55.75);
        assert_eq!(parsed.elements[1].lon, 37.63);
    }

    #[test]
    fn missing_elements_field_parses_as_empty() {
        let parsed: OverpassResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.elements.is_empty());
    }
}
