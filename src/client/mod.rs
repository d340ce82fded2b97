//! Map-side half of truckmap: the controller that keeps truck markers on a
//! map widget in step with `/trucks`.
//!
//! The widget, the device location service and the transport are reached
//! through [`MapWidget`], [`Geolocator`] and [`TruckFeed`]; the host
//! forwards UI events to [`MapController`].

use std::time::Duration;

use thiserror::Error;

use crate::geo::{Bounds, LatLng};
use crate::models::TrucksResponse;
use crate::query::TruckQuery;

mod controller;
mod feed;
mod info;
mod registry;

pub use controller::{ControllerOptions, MapController, ToggleButton};
pub use feed::{print_trucks, HttpTruckFeed};
pub use info::info_window_content;
pub use registry::{MarkerEntry, MarkerKey, MarkerRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const TRUCK_ICON: MarkerIcon = MarkerIcon { url: "/static/images/foodtruck.png", width: 26, height: 45 };
pub const SEARCH_ICON: MarkerIcon = MarkerIcon { url: "/static/images/searchpin.png", width: 26, height: 45 };

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub title: String,
    pub icon: MarkerIcon,
}

/// Inline messages the controller can put on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    /// Location services are missing or turned off.
    Geolocation,
    /// The truck service reported an error; carries its message.
    Request(String),
}

impl Banner {
    pub fn css_class(&self) -> &'static str {
        match self {
            Banner::Geolocation => "geo-error",
            Banner::Request(_) => "map-error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Banner::Geolocation => "Your browser does not support geolocation or you have geolocation turned off.",
            Banner::Request(msg) => msg,
        }
    }
}

/// The map widget and the page around it.
pub trait MapWidget {
    /// Opaque handle to a marker placed on the map.
    type Marker: Clone;

    /// Visible region, or `None` before the map has been laid out.
    fn bounds(&self) -> Option<Bounds>;
    fn set_center(&mut self, center: LatLng);
    fn set_zoom(&mut self, zoom: u8);
    fn fit_bounds(&mut self, bounds: Bounds);

    /// Bias place autocomplete towards `bounds`.
    fn set_search_bounds(&mut self, bounds: Bounds);
    fn clear_search_input(&mut self);

    /// Drops a new marker onto the map after `drop_delay`.
    fn add_marker(&mut self, spec: MarkerSpec, drop_delay: Duration) -> Self::Marker;
    fn move_marker(&mut self, marker: &Self::Marker, position: LatLng, title: &str);
    fn set_marker_visible(&mut self, marker: &Self::Marker, visible: bool);
    fn open_info_window(&mut self, marker: &Self::Marker, content: &str);

    /// Places or moves the current-location dot.
    fn show_location_marker(&mut self, position: LatLng);

    fn hide_map(&mut self);
    fn show_banner(&mut self, banner: Banner);
}

/// Source of `/trucks` responses.
#[allow(async_fn_in_trait)]
pub trait TruckFeed {
    async fn fetch(&self, query: &TruckQuery) -> anyhow::Result<TrucksResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOptions {
    pub timeout: Duration,
    /// Oldest cached position that may be reused.
    pub maximum_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(5), maximum_age: Duration::from_secs(60) }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("geolocation timed out")]
    Timeout,
}

/// Device location service.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    async fn current_position(&mut self, options: &GeoOptions) -> Result<LatLng, GeoError>;
}

/// A place picked from the search box.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub location: LatLng,
}
