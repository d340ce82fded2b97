use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLng;

/// One row of the upstream mobile food facility permit dataset. Only the
/// fields the service reads are kept.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct PermitRecord {
    #[serde(default)]
    pub applicant: String,
    #[serde(default)]
    pub status: String,
    pub location: Option<PermitLocation>,
    pub address: Option<String>,
    pub fooditems: Option<String>,
    pub schedule: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PermitLocation {
    #[serde(deserialize_with = "coordinate_string")]
    pub latitude: String,
    #[serde(deserialize_with = "coordinate_string")]
    pub longitude: String,
}

/// A truck as served by `/trucks`. Coordinates stay in the decimal string
/// form the dataset uses so clients can key markers on them verbatim.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Truck {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(deserialize_with = "coordinate_string")]
    pub latitude: String,
    #[serde(deserialize_with = "coordinate_string")]
    pub longitude: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fooditems: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

impl Truck {
    pub fn position(&self) -> Option<LatLng> {
        let lat = self.latitude.trim().parse().ok()?;
        let lng = self.longitude.trim().parse().ok()?;
        Some(LatLng::new(lat, lng))
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

/// Body of a `/trucks` response. An `error` field wins over `resp`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TrucksResponse {
    Error(ErrorBody),
    Trucks { resp: Vec<Truck> },
}

impl TrucksResponse {
    pub fn error(message: impl Into<String>, status: u16) -> Self {
        TrucksResponse::Error(ErrorBody { error: message.into(), status: Some(status) })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Text(String),
    Number(f64),
}

fn coordinate_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Coordinate::deserialize(deserializer)? {
        Coordinate::Text(s) => s,
        Coordinate::Number(n) => n.to_string(),
    })
}
