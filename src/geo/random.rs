// Random regional coordinates — the fallback when geocoding fails.
//
// Picks a plausible point inside a coarse bounding box so ungeolocated
// posts still land somewhere sensible on the map. The randomness stays
// out here; the analysis core is deterministic.

use rand::Rng;

/// Coarse region profile for the coordinate fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    India,
    Usa,
    /// Global-ish box excluding the polar latitudes.
    #[default]
    Any,
}

impl Region {
    /// Parse a region name case-insensitively. Unknown names get the
    /// global box rather than an error.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "india" => Region::India,
            "usa" => Region::Usa,
            _ => Region::Any,
        }
    }

    /// (lat_min, lat_max, lon_min, lon_max) for this profile.
    pub fn bounds(self) -> (f64, f64, f64, f64) {
        match self {
            Region::India => (8.0, 28.0, 68.0, 97.0),
            Region::Usa => (25.0, 49.0, -125.0, -67.0),
            Region::Any => (-30.0, 55.0, -130.0, 150.0),
        }
    }
}

/// Generate a random (lat, lon) inside the region's box, rounded to four
/// decimals.
pub fn random_latlon(region: Region) -> (f64, f64) {
    let (lat_min, lat_max, lon_min, lon_max) = region.bounds();
    let mut rng = rand::rng();
    (
        round4(rng.random_range(lat_min..=lat_max)),
        round4(rng.random_range(lon_min..=lon_max)),
    )
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
