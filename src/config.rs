use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::geo::LatLng;

pub const DEFAULT_CONFIG: &str = "truckmap.toml";
pub const EXAMPLE_CONFIG: &str = "truckmap.example.toml";

pub const DEFAULT_DATASET_URL: &str = "http://data.sfgov.org/resource/rqzj-sfat.json";

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    #[serde(default = "default_dataset_url")]
    pub dataset_url: String,
    #[serde(default)]
    pub maps_api_key: String,
    pub thread_count: Option<usize>,
    pub cache_dir: Option<PathBuf>,
    pub cache_ttl_secs: Option<u64>,
    pub cache_size_mb: Option<u64>,
    pub template_dir: Option<PathBuf>,
    pub static_dir: Option<PathBuf>,
    #[serde(default)]
    pub map: MapDefaults,
    #[serde(default = "default_categories")]
    pub categories: Vec<Category>,
}

/// Initial viewport of the map page.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct MapDefaults {
    pub center: LatLng,
    pub zoom: u8,
    pub geo_zoom: u8,
}

impl Default for MapDefaults {
    fn default() -> Self {
        Self {
            center: LatLng::new(37.7833, -122.4167),
            zoom: 13,
            geo_zoom: 15,
        }
    }
}

/// A food category rendered as a toggle button. The id doubles as the
/// `food` filter term sent to `/trucks`.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: String,
    pub label: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_dataset_url() -> String {
    DEFAULT_DATASET_URL.to_string()
}

fn default_categories() -> Vec<Category> {
    [
        ("taco", "Tacos"),
        ("burrito", "Burritos"),
        ("burger", "Burgers"),
        ("sandwich", "Sandwiches"),
        ("noodle", "Noodles"),
        ("coffee", "Coffee"),
        ("donut", "Donuts"),
        ("salad", "Salads"),
    ]
    .into_iter()
    .map(|(id, label)| Category { id: id.to_string(), label: label.to_string() })
    .collect()
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_in(Path::new("."))
    }

    /// Reads `truckmap.toml` from `dir`, falling back to `truckmap.example.toml`.
    pub fn load_in(dir: &Path) -> anyhow::Result<Self> {
        let path = [DEFAULT_CONFIG, EXAMPLE_CONFIG]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
            .ok_or_else(|| anyhow::anyhow!("Configuration file not found. Please create {} or provide {}.", DEFAULT_CONFIG, EXAMPLE_CONFIG))?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(|| PathBuf::from("data/cache"))
    }

    /// A TTL of zero disables the dataset cache.
    pub fn cache_ttl_secs(&self) -> u64 {
        self.cache_ttl_secs.unwrap_or(300)
    }

    pub fn cache_size_mb(&self) -> u64 {
        self.cache_size_mb.unwrap_or(64)
    }

    pub fn template_dir(&self) -> PathBuf {
        self.template_dir.clone().unwrap_or_else(|| PathBuf::from("data/templates"))
    }

    /// Directory served under `/static` (marker icons).
    pub fn static_dir(&self) -> PathBuf {
        self.static_dir.clone().unwrap_or_else(|| PathBuf::from("data/static"))
    }
}
