// Geolocation helpers — place-name geocoding and the regional fallback.
//
// Everything in here lives outside the analysis core: the core passes
// coordinates through unchanged, and these helpers fill them in (or make
// them up) before a batch is scored.

pub mod geocode;
pub mod random;

pub use geocode::{Geocoder, NominatimGeocoder};
pub use random::{random_latlon, Region};
