//! stopover-planner
//!
//! Plans a walking route between two addresses that passes near a pharmacy,
//! aggregating public geocoding, points-of-interest, and routing services.

pub mod traits;
pub mod coord;
pub mod path;
pub mod limiter;
pub mod nominatim;
pub mod overpass;
pub mod osrm;
pub mod osrm_data;
pub mod haversine;
pub mod price;
pub mod sampler;
pub mod selector;
pub mod pipeline;
