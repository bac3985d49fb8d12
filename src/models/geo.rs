use serde::Serialize;
use std::fmt;

/// Geocoordinate attached to a duty record.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon) {
            Some(Self { lat, lon })
        } else {
            None
        }
    }

    /// Records logged without a position (e.g. from a terminal) carry
    /// the null island placeholder.
    pub fn unknown() -> Self {
        Self { lat: 0.0, lon: 0.0 }
    }

    /// Parse "lat,lon" as given on the command line.
    pub fn parse(s: &str) -> Option<Self> {
        let (lat_raw, lon_raw) = s.split_once(',')?;
        let lat: f64 = lat_raw.trim().parse().ok()?;
        let lon: f64 = lon_raw.trim().parse().ok()?;
        Self::new(lat, lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}
