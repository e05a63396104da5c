//! Geographic coordinates.

use serde::{Deserialize, Serialize};

/// A (latitude, longitude) pair in floating-point degrees.
///
/// Immutable once resolved; equality is exact on both components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Hashable exact-equality key for deduplication.
    ///
    /// Keyed on the bit patterns of both floats: no rounding, no epsilon.
    pub fn key(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}
