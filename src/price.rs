//! Price tiers for waypoint candidates.
//!
//! Real pricing data is not available, so tiers stand in for it: a uniform
//! draw from [1.0, 2.0] rounded to one decimal, regenerated on every request.
//! The draw lives behind [`PriceSource`](crate::traits::PriceSource) so tests
//! can substitute deterministic mappings.

use rand::Rng;

use crate::coord::Coord;
use crate::traits::PriceSource;

/// Uniform pseudo-random tier in [1.0, 2.0], one-decimal granularity.
///
/// Tiers are not stable across calls for the same waypoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPriceSource;

impl PriceSource for UniformPriceSource {
    fn tier_for(&self, _waypoint: Coord) -> f64 {
        let tier: f64 = rand::thread_rng().gen_range(1.0..=2.0);
        (tier * 10.0).round() / 10.0
    }
}
