use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Rectangle between a south-west and a north-east corner, edges inclusive.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl Bounds {
    pub fn new(sw: LatLng, ne: LatLng) -> Self {
        Self { sw, ne }
    }

    /// Zero-area bounds around a single point.
    pub fn from_point(point: LatLng) -> Self {
        Self { sw: point, ne: point }
    }

    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.sw.lat
            && point.lat <= self.ne.lat
            && point.lng >= self.sw.lng
            && point.lng <= self.ne.lng
    }

    pub fn extend(&mut self, point: LatLng) {
        self.sw.lat = self.sw.lat.min(point.lat);
        self.sw.lng = self.sw.lng.min(point.lng);
        self.ne.lat = self.ne.lat.max(point.lat);
        self.ne.lng = self.ne.lng.max(point.lng);
    }

    pub fn center(&self) -> LatLng {
        LatLng::new((self.sw.lat + self.ne.lat) / 2.0, (self.sw.lng + self.ne.lng) / 2.0)
    }
}

/// Wire form used by the `bounds` query parameter: `swLat,swLng,neLat,neLng`.
impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.sw.lat, self.sw.lng, self.ne.lat, self.ne.lng)
    }
}

impl FromStr for Bounds {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("invalid bounds '{}': {}", s, e))?;
        match parts.as_slice() {
            [sw_lat, sw_lng, ne_lat, ne_lng] => Ok(Self::new(LatLng::new(*sw_lat, *sw_lng), LatLng::new(*ne_lat, *ne_lng))),
            _ => Err(anyhow::anyhow!("invalid bounds '{}': expected 4 values, got {}", s, parts.len())),
        }
    }
}
