//! Waypoint discovery along a routed path.

use std::collections::HashSet;

use crate::coord::Coord;
use crate::path::RoutePath;
use crate::traits::PoiProvider;

/// Queries `provider` around every other point of `path` and returns the
/// deduplicated matches in first-seen order.
///
/// Only even positional indices are visited: a traced route can carry
/// hundreds of points and the 2:1 thinning bounds the number of outbound
/// lookups. Lookups run sequentially to keep the outbound rate bounded.
/// Missing coverage at one point does not abort the search; the provider
/// yields an empty list for a failed lookup and sampling continues.
pub fn sample_waypoints<P: PoiProvider>(
    provider: &P,
    path: &RoutePath,
    amenity: &str,
    radius_m: u32,
) -> Vec<Coord> {
    let mut found = Vec::new();
    for (i, point) in path.points().iter().enumerate() {
        if i % 2 != 0 {
            continue;
        }
        found.extend(provider.search(*point, radius_m, amenity));
    }

    let unique = dedupe(found);
    tracing::debug!(count = unique.len(), amenity, "sampled waypoints along route");
    unique
}

fn dedupe(coords: Vec<Coord>) -> Vec<Coord> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for coord in coords {
        if seen.insert(coord.key()) {
            unique.push(coord);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Provider double returning canned results per queried centre.
    struct ScriptedPois {
        results: Vec<Vec<Coord>>,
        queried: RefCell<Vec<Coord>>,
    }

    impl ScriptedPois {
        fn new(results: Vec<Vec<Coord>>) -> Self {
            Self {
                results,
                queried: RefCell::new(Vec::new()),
            }
        }
    }

    impl PoiProvider for ScriptedPois {
        fn search(&self, centre: Coord, _radius_m: u32, _amenity: &str) -> Vec<Coord> {
            let mut queried = self.queried.borrow_mut();
            let call = queried.len();
            queried.push(centre);
            self.results.get(call).cloned().unwrap_or_default()
        }
    }

    fn path_of(n: usize) -> RoutePath {
        RoutePath::new((0..n).map(|i| Coord::new(i as f64, 0.0)).collect())
    }

    #[test]
    fn queries_only_even_indexed_points() {
        let provider = ScriptedPois::new(vec![Vec::new(); 3]);
        sample_waypoints(&provider, &path_of(5), "pharmacy", 500);

        let queried = provider.queried.borrow();
        assert_eq!(
            *queried,
            vec![
                Coord::new(0.0, 0.0),
                Coord::new(2.0, 0.0),
                Coord::new(4.0, 0.0)
            ]
        );
    }

    #[test]
    fn repeated_coordinates_appear_once_in_first_seen_order() {
        let shared = Coord::new(9.0, 9.0);
        let other = Coord::new(8.0, 8.0);
        let provider = ScriptedPois::new(vec![
            vec![shared, other],
            vec![shared],
            vec![other, shared],
        ]);

        let waypoints = sample_waypoints(&provider, &path_of(5), "pharmacy", 500);
        assert_eq!(waypoints, vec![shared, other]);
    }

    #[test]
    fn failed_lookup_skips_a_point_but_keeps_sampling() {
        // Second sampled point yields nothing (the adapter maps failures to
        // empty lists); the third still contributes.
        let provider = ScriptedPois::new(vec![
            vec![Coord::new(1.0, 1.0)],
            Vec::new(),
            vec![Coord::new(2.0, 2.0)],
        ]);

        let waypoints = sample_waypoints(&provider, &path_of(5), "pharmacy", 500);
        assert_eq!(waypoints, vec![Coord::new(1.0, 1.0), Coord::new(2.0, 2.0)]);
    }

    #[test]
    fn no_matches_anywhere_yields_empty() {
        let provider = ScriptedPois::new(vec![Vec::new(); 2]);
        let waypoints = sample_waypoints(&provider, &path_of(3), "pharmacy", 500);
        assert!(waypoints.is_empty());
    }
}
