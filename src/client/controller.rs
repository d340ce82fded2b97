use std::collections::HashSet;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::registry::{MarkerKey, MarkerRegistry};
use super::{
    info_window_content, Banner, GeoOptions, Geolocator, MapWidget, MarkerSpec, Place, TruckFeed, SEARCH_ICON,
    TRUCK_ICON,
};
use crate::config::MapDefaults;
use crate::geo::{Bounds, LatLng};
use crate::models::{Truck, TrucksResponse};
use crate::query::TruckQuery;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerOptions {
    pub default_center: LatLng,
    pub default_zoom: u8,
    /// Zoom after the first layout and after a place search; one more after
    /// locating the user.
    pub geo_zoom: u8,
    /// Extra drop delay per truck within one response.
    pub drop_stagger: Duration,
    pub geo: GeoOptions,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&MapDefaults::default())
    }
}

impl From<&MapDefaults> for ControllerOptions {
    fn from(defaults: &MapDefaults) -> Self {
        Self {
            default_center: defaults.center,
            default_zoom: defaults.zoom,
            geo_zoom: defaults.geo_zoom,
            drop_stagger: Duration::from_millis(5),
            geo: GeoOptions::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleButton {
    pub id: String,
    pub down: bool,
}

/// Keeps the truck markers of a [`MapWidget`] in step with a [`TruckFeed`].
///
/// Every method corresponds to one UI event and runs to completion before
/// the next one; the host forwards widget and page events in order.
pub struct MapController<W: MapWidget, F: TruckFeed> {
    widget: W,
    feed: F,
    options: ControllerOptions,
    registry: MarkerRegistry<W::Marker>,
    toggles: Vec<ToggleButton>,
    search_marker: Option<W::Marker>,
    bounds_seen: bool,
    last_position: Option<LatLng>,
}

impl<W: MapWidget, F: TruckFeed> MapController<W, F> {
    /// Centers the map on the defaults and registers one toggle button per
    /// category id, all up.
    pub fn new<I, S>(mut widget: W, feed: F, options: ControllerOptions, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        widget.set_center(options.default_center);
        widget.set_zoom(options.default_zoom);
        let toggles = categories
            .into_iter()
            .map(|id| ToggleButton { id: id.into(), down: false })
            .collect();
        Self {
            widget,
            feed,
            options,
            registry: MarkerRegistry::new(),
            toggles,
            search_marker: None,
            bounds_seen: false,
            last_position: None,
        }
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut W {
        &mut self.widget
    }

    pub fn registry(&self) -> &MarkerRegistry<W::Marker> {
        &self.registry
    }

    pub fn toggle_buttons(&self) -> &[ToggleButton] {
        &self.toggles
    }

    pub fn active_categories(&self) -> impl Iterator<Item = &str> {
        self.toggles.iter().filter(|t| t.down).map(|t| t.id.as_str())
    }

    /// Query for the current view. Without bounds the map is not laid out
    /// yet and the filters are not applied either.
    pub fn query(&self) -> TruckQuery {
        match self.widget.bounds() {
            Some(bounds) => TruckQuery::within(bounds).with_food(self.active_categories()),
            None => TruckQuery::default(),
        }
    }

    /// Handles the widget's bounds-changed event. Only the first one does
    /// anything: it biases place search to the view and zooms in.
    pub fn on_bounds_changed(&mut self) {
        if self.bounds_seen {
            return;
        }
        let Some(bounds) = self.widget.bounds() else {
            return;
        };
        self.bounds_seen = true;
        self.widget.set_search_bounds(bounds);
        self.widget.set_zoom(self.options.geo_zoom);
    }

    /// Handles zoom-changed and drag-end: fetches trucks in view, drops
    /// markers for new coordinates and re-shows hidden ones.
    pub async fn on_view_changed(&mut self) {
        let Some(trucks) = self.fetch_trucks().await else {
            return;
        };

        for (i, truck) in trucks.into_iter().enumerate() {
            let key = MarkerKey::for_truck(&truck);
            if self.registry.contains(&key) {
                if let Some(marker) = self.registry.set_visible(&key, true) {
                    self.widget.set_marker_visible(marker, true);
                }
                continue;
            }
            let Some(position) = truck.position() else {
                warn!("skipping truck '{}' with unreadable coordinates {}", truck.name, key);
                continue;
            };
            let spec = MarkerSpec { position, title: truck.name.clone(), icon: TRUCK_ICON };
            let marker = self.widget.add_marker(spec, self.options.drop_stagger * i as u32);
            self.registry.insert(key, marker, truck);
        }
        debug!("{} markers registered, {} visible", self.registry.len(), self.registry.visible_keys().len());
    }

    /// Flips a category button, then shows exactly the registered markers
    /// that the refreshed query returns. The query covers the current view
    /// only, so markers outside it are hidden until a later view change.
    pub async fn on_toggle(&mut self, category: &str) {
        let Some(button) = self.toggles.iter_mut().find(|t| t.id == category) else {
            warn!("no toggle button for category '{}'", category);
            return;
        };
        button.down = !button.down;
        info!("category '{}' toggled {}", category, if button.down { "on" } else { "off" });

        let Some(trucks) = self.fetch_trucks().await else {
            return;
        };
        let matching = trucks.iter().map(MarkerKey::for_truck).collect::<HashSet<_>>();

        let keys = self.registry.keys().cloned().collect::<Vec<_>>();
        for key in keys {
            let visible = matching.contains(&key);
            if let Some(marker) = self.registry.set_visible(&key, visible) {
                self.widget.set_marker_visible(marker, visible);
            }
        }
    }

    /// Opens the info window of a registered marker from its cached truck.
    pub fn on_marker_clicked(&mut self, key: &MarkerKey) {
        let Some(entry) = self.registry.get(key) else {
            warn!("click on unknown marker {}", key);
            return;
        };
        let content = info_window_content(&entry.truck);
        self.widget.open_info_window(&entry.marker, &content);
    }

    /// Moves the search marker to the top result and zooms to it.
    pub fn on_places_changed(&mut self, places: &[Place]) {
        let Some(top) = places.first() else {
            return;
        };
        match self.search_marker.clone() {
            Some(marker) => self.widget.move_marker(&marker, top.location, &top.name),
            None => {
                let spec = MarkerSpec { position: top.location, title: top.name.clone(), icon: SEARCH_ICON };
                self.search_marker = Some(self.widget.add_marker(spec, Duration::ZERO));
            }
        }
        self.widget.fit_bounds(Bounds::from_point(top.location));
        self.widget.set_zoom(self.options.geo_zoom);
    }

    pub fn on_search_focused(&mut self) {
        self.widget.clear_search_input();
    }

    /// Centers on the device position, or falls back to the default view
    /// with a banner when location is unavailable.
    pub async fn geolocate<G: Geolocator>(&mut self, geolocator: &mut G) {
        match geolocator.current_position(&self.options.geo).await {
            Ok(position) => {
                self.on_position_update(position);
                self.center_on(position);
            }
            Err(e) => {
                info!("geolocation unavailable: {}", e);
                self.widget.set_center(self.options.default_center);
                self.widget.set_zoom(self.options.default_zoom);
                self.widget.show_banner(Banner::Geolocation);
            }
        }
    }

    /// Records a position reported by the location watch and moves the
    /// current-location dot there.
    pub fn on_position_update(&mut self, position: LatLng) {
        self.last_position = Some(position);
        self.widget.show_location_marker(position);
    }

    /// Recenters on the last known position, if any.
    pub fn on_geolocate_clicked(&mut self) {
        if let Some(position) = self.last_position {
            self.center_on(position);
        }
    }

    fn center_on(&mut self, position: LatLng) {
        self.widget.set_center(position);
        self.widget.set_zoom(self.options.geo_zoom.saturating_add(1));
    }

    /// Runs the current query. Server-reported errors replace the map with a
    /// banner; transport failures are logged and ignored.
    async fn fetch_trucks(&mut self) -> Option<Vec<Truck>> {
        let query = self.query();
        match self.feed.fetch(&query).await {
            Ok(TrucksResponse::Trucks { resp }) => Some(resp),
            Ok(TrucksResponse::Error(body)) => {
                warn!("truck service error: {}", body.error);
                self.widget.hide_map();
                self.widget.show_banner(Banner::Request(body.error));
                None
            }
            Err(e) => {
                warn!("truck request {} failed: {:#}", query.to_query_string(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::GeoError;
    use crate::filter::select_trucks;
    use crate::models::{PermitLocation, PermitRecord};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    struct FakeMarker {
        spec: MarkerSpec,
        delay: Duration,
        visible: bool,
        moves: usize,
    }

    #[derive(Default)]
    struct FakeWidget {
        bounds: Option<Bounds>,
        center: Option<LatLng>,
        zoom: Option<u8>,
        fitted: Option<Bounds>,
        search_bounds: Option<Bounds>,
        search_cleared: bool,
        markers: Vec<FakeMarker>,
        info: Option<(usize, String)>,
        location_dot: Option<LatLng>,
        map_hidden: bool,
        banners: Vec<Banner>,
    }

    impl MapWidget for FakeWidget {
        type Marker = usize;

        fn bounds(&self) -> Option<Bounds> {
            self.bounds
        }
        fn set_center(&mut self, center: LatLng) {
            self.center = Some(center);
        }
        fn set_zoom(&mut self, zoom: u8) {
            self.zoom = Some(zoom);
        }
        fn fit_bounds(&mut self, bounds: Bounds) {
            self.fitted = Some(bounds);
        }
        fn set_search_bounds(&mut self, bounds: Bounds) {
            self.search_bounds = Some(bounds);
        }
        fn clear_search_input(&mut self) {
            self.search_cleared = true;
        }
        fn add_marker(&mut self, spec: MarkerSpec, drop_delay: Duration) -> usize {
            self.markers.push(FakeMarker { spec, delay: drop_delay, visible: true, moves: 0 });
            self.markers.len() - 1
        }
        fn move_marker(&mut self, marker: &usize, position: LatLng, title: &str) {
            let m = &mut self.markers[*marker];
            m.spec.position = position;
            m.spec.title = title.to_string();
            m.moves += 1;
        }
        fn set_marker_visible(&mut self, marker: &usize, visible: bool) {
            self.markers[*marker].visible = visible;
        }
        fn open_info_window(&mut self, marker: &usize, content: &str) {
            self.info = Some((*marker, content.to_string()));
        }
        fn show_location_marker(&mut self, position: LatLng) {
            self.location_dot = Some(position);
        }
        fn hide_map(&mut self) {
            self.map_hidden = true;
        }
        fn show_banner(&mut self, banner: Banner) {
            self.banners.push(banner);
        }
    }

    /// Answers queries from a fixed permit list, or with a canned error.
    #[derive(Default)]
    struct FakeFeed {
        permits: Vec<PermitRecord>,
        error: Option<String>,
        unreachable: bool,
        queries: RefCell<Vec<TruckQuery>>,
    }

    impl TruckFeed for FakeFeed {
        async fn fetch(&self, query: &TruckQuery) -> anyhow::Result<TrucksResponse> {
            self.queries.borrow_mut().push(query.clone());
            if self.unreachable {
                return Err(anyhow::anyhow!("connection refused"));
            }
            if let Some(error) = &self.error {
                return Ok(TrucksResponse::error(error.clone(), 500));
            }
            Ok(TrucksResponse::Trucks { resp: select_trucks(&self.permits, query) })
        }
    }

    struct FakeGeolocator(VecDeque<Result<LatLng, GeoError>>);

    impl Geolocator for FakeGeolocator {
        async fn current_position(&mut self, options: &GeoOptions) -> Result<LatLng, GeoError> {
            assert_eq!(options.timeout, Duration::from_secs(5));
            self.0.pop_front().unwrap_or(Err(GeoError::Unsupported))
        }
    }

    fn permit(name: &str, lat: &str, lng: &str, food: &str) -> PermitRecord {
        PermitRecord {
            applicant: name.into(),
            status: "APPROVED".into(),
            location: Some(PermitLocation { latitude: lat.into(), longitude: lng.into() }),
            address: Some(format!("{} address", name)),
            fooditems: Some(food.into()),
            schedule: Some(format!("http://example.com/{}.pdf", name)),
        }
    }

    fn permits() -> Vec<PermitRecord> {
        vec![
            permit("Taco Loco", "37.76", "-122.42", "Tacos: Burritos"),
            permit("Burger Bus", "37.78", "-122.40", "Burgers: Fries"),
            permit("Coffee Cart", "37.77", "-122.41", "Coffee: Pastries"),
            permit("Far Away Tacos", "37.90", "-122.20", "Tacos"),
        ]
    }

    fn city() -> Bounds {
        Bounds::new(LatLng::new(37.70, -122.50), LatLng::new(37.80, -122.35))
    }

    fn controller(feed: FakeFeed) -> MapController<FakeWidget, FakeFeed> {
        let widget = FakeWidget { bounds: Some(city()), ..Default::default() };
        MapController::new(widget, feed, ControllerOptions::default(), ["taco", "burger", "coffee"])
    }

    fn with_permits() -> MapController<FakeWidget, FakeFeed> {
        controller(FakeFeed { permits: permits(), ..Default::default() })
    }

    #[test]
    fn new_starts_at_default_view_with_buttons_up() {
        let c = with_permits();
        assert_eq!(c.widget().center, Some(LatLng::new(37.7833, -122.4167)));
        assert_eq!(c.widget().zoom, Some(13));
        assert_eq!(c.active_categories().count(), 0);
        assert_eq!(c.toggle_buttons().len(), 3);
    }

    #[test]
    fn query_uses_bounds_and_active_filters_in_button_order() {
        let mut c = with_permits();
        c.toggles[2].down = true;
        c.toggles[0].down = true;
        assert_eq!(
            c.query().to_query_string(),
            "?bounds=37.7,-122.5,37.8,-122.35&food=taco,coffee"
        );
    }

    #[test]
    fn query_without_bounds_is_empty_even_with_filters() {
        let mut c = with_permits();
        c.toggles[0].down = true;
        c.widget_mut().bounds = None;
        assert_eq!(c.query(), TruckQuery::default());
        assert_eq!(c.query().to_query_string(), "");
    }

    #[test]
    fn first_bounds_change_biases_search_and_zooms_once() {
        let mut c = with_permits();
        c.on_bounds_changed();
        assert_eq!(c.widget().search_bounds, Some(city()));
        assert_eq!(c.widget().zoom, Some(15));
        c.widget_mut().zoom = Some(3);
        c.widget_mut().bounds = Some(Bounds::from_point(LatLng::new(0.0, 0.0)));
        c.on_bounds_changed();
        assert_eq!(c.widget().zoom, Some(3));
        assert_eq!(c.widget().search_bounds, Some(city()));
    }

    #[tokio::test]
    async fn view_change_drops_staggered_markers_for_trucks_in_view() {
        let mut c = with_permits();
        c.on_view_changed().await;
        let markers = &c.widget().markers;
        assert_eq!(markers.len(), 3);
        assert_eq!(markers.iter().map(|m| m.delay).collect::<Vec<_>>(), vec![
            Duration::ZERO,
            Duration::from_millis(5),
            Duration::from_millis(10),
        ]);
        assert!(markers.iter().all(|m| m.spec.icon == TRUCK_ICON && m.visible));
        assert_eq!(markers[0].spec.title, "Taco Loco");
        assert_eq!(c.registry().len(), 3);
    }

    #[tokio::test]
    async fn repeated_view_changes_never_duplicate_markers() {
        let mut c = with_permits();
        c.on_view_changed().await;
        c.on_view_changed().await;
        c.widget_mut().bounds = Some(Bounds::new(LatLng::new(37.0, -123.0), LatLng::new(38.0, -122.0)));
        c.on_view_changed().await;
        assert_eq!(c.widget().markers.len(), 4);
        assert_eq!(c.registry().len(), 4);
    }

    #[tokio::test]
    async fn duplicate_coordinates_in_one_response_make_one_marker() {
        let mut permits = permits();
        permits.push(permit("Taco Loco Twin", "37.76", "-122.42", "Tacos"));
        let mut c = controller(FakeFeed { permits, ..Default::default() });
        c.on_view_changed().await;
        assert_eq!(c.widget().markers.len(), 3);
        assert_eq!(c.registry().len(), 3);
    }

    #[tokio::test]
    async fn view_change_reshows_hidden_markers_without_recreating() {
        let mut c = with_permits();
        c.on_view_changed().await;
        c.on_toggle("coffee").await;
        assert_eq!(c.registry().visible_keys().len(), 1);
        c.toggles[2].down = false;
        c.on_view_changed().await;
        assert_eq!(c.widget().markers.len(), 3);
        assert!(c.widget().markers.iter().all(|m| m.visible));
        assert_eq!(c.registry().visible_keys().len(), 3);
    }

    #[tokio::test]
    async fn toggle_hides_markers_missing_from_filtered_result() {
        let mut c = with_permits();
        c.on_view_changed().await;
        c.on_toggle("burger").await;
        assert!(c.toggle_buttons()[1].down);
        assert_eq!(c.feed.queries.borrow().last().unwrap().food, vec!["burger"]);
        let visible = c.widget().markers.iter().filter(|m| m.visible).map(|m| m.spec.title.as_str()).collect::<Vec<_>>();
        assert_eq!(visible, vec!["Burger Bus"]);
        assert_eq!(c.registry().len(), 3);
    }

    #[tokio::test]
    async fn toggling_on_then_off_restores_visibility() {
        let mut c = with_permits();
        c.on_view_changed().await;
        let before = c.registry().visible_keys();
        c.on_toggle("taco").await;
        c.on_toggle("coffee").await;
        assert_eq!(c.registry().visible_keys().len(), 2);
        c.on_toggle("coffee").await;
        c.on_toggle("taco").await;
        assert_eq!(c.registry().visible_keys(), before);
        assert!(c.widget().markers.iter().all(|m| m.visible));
    }

    #[tokio::test]
    async fn toggle_after_pan_hides_off_screen_markers_until_they_return() {
        let mut c = with_permits();
        c.on_view_changed().await;
        c.widget_mut().bounds = Some(Bounds::new(LatLng::new(37.775, -122.405), LatLng::new(37.785, -122.395)));
        c.on_toggle("burger").await;
        c.on_toggle("burger").await;
        assert_eq!(c.registry().visible_keys().len(), 1);
        c.widget_mut().bounds = Some(city());
        c.on_view_changed().await;
        assert_eq!(c.registry().visible_keys().len(), 3);
    }

    #[tokio::test]
    async fn unknown_toggle_is_ignored() {
        let mut c = with_permits();
        c.on_toggle("pizza").await;
        assert!(c.feed.queries.borrow().is_empty());
    }

    #[tokio::test]
    async fn server_error_hides_map_and_creates_no_markers() {
        let mut c = controller(FakeFeed { permits: permits(), error: Some("Unable to load food truck data.".into()), ..Default::default() });
        c.on_view_changed().await;
        c.on_toggle("taco").await;
        assert!(c.widget().markers.is_empty());
        assert!(c.registry().is_empty());
        assert!(c.widget().map_hidden);
        assert_eq!(c.widget().banners[0], Banner::Request("Unable to load food truck data.".into()));
        assert_eq!(c.widget().banners[0].css_class(), "map-error");
    }

    #[tokio::test]
    async fn transport_failure_leaves_map_alone() {
        let mut c = controller(FakeFeed { unreachable: true, ..Default::default() });
        c.on_view_changed().await;
        assert!(c.widget().markers.is_empty());
        assert!(!c.widget().map_hidden);
        assert!(c.widget().banners.is_empty());
    }

    #[tokio::test]
    async fn marker_click_opens_cached_details() {
        let mut c = with_permits();
        c.on_view_changed().await;
        let queries = c.feed.queries.borrow().len();
        let key = c.registry().keys().find(|k| k.as_str() == "37.78,-122.40").unwrap().clone();
        c.on_marker_clicked(&key);
        let (marker, content) = c.widget().info.clone().unwrap();
        assert_eq!(c.widget().markers[marker].spec.title, "Burger Bus");
        assert!(content.contains("<h3>Burger Bus</h3>"));
        assert!(content.contains("Burgers, Fries"));
        assert!(content.contains("Download Schedule"));
        assert_eq!(c.feed.queries.borrow().len(), queries);
    }

    #[test]
    fn place_search_reuses_one_search_marker() {
        let mut c = with_permits();
        c.on_places_changed(&[]);
        assert!(c.widget().markers.is_empty());

        let ferry = Place { name: "Ferry Building".into(), location: LatLng::new(37.7955, -122.3937) };
        let park = Place { name: "Dolores Park".into(), location: LatLng::new(37.7596, -122.4269) };
        c.on_places_changed(&[ferry.clone(), park.clone()]);
        c.on_places_changed(&[park.clone()]);

        let markers = &c.widget().markers;
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].spec.icon, SEARCH_ICON);
        assert_eq!(markers[0].spec.title, "Dolores Park");
        assert_eq!(markers[0].moves, 1);
        assert_eq!(c.widget().fitted, Some(Bounds::from_point(park.location)));
        assert_eq!(c.widget().zoom, Some(15));
        assert!(c.registry().is_empty());
    }

    #[test]
    fn search_focus_clears_input() {
        let mut c = with_permits();
        c.on_search_focused();
        assert!(c.widget().search_cleared);
    }

    #[tokio::test]
    async fn geolocation_success_centers_and_zooms_in() {
        let mut c = with_permits();
        let here = LatLng::new(37.77, -122.44);
        c.geolocate(&mut FakeGeolocator(VecDeque::from([Ok(here)]))).await;
        assert_eq!(c.widget().center, Some(here));
        assert_eq!(c.widget().zoom, Some(16));
        assert_eq!(c.widget().location_dot, Some(here));
        assert!(c.widget().banners.is_empty());
    }

    #[tokio::test]
    async fn geolocation_failure_places_no_location_dot() {
        let mut c = with_permits();
        c.geolocate(&mut FakeGeolocator(VecDeque::from([Err(GeoError::PermissionDenied)]))).await;
        assert_eq!(c.widget().location_dot, None);
    }

    #[test]
    fn position_updates_move_location_dot_without_recentering() {
        let mut c = with_permits();
        c.on_position_update(LatLng::new(37.70, -122.45));
        assert_eq!(c.widget().location_dot, Some(LatLng::new(37.70, -122.45)));
        c.on_position_update(LatLng::new(37.71, -122.46));
        assert_eq!(c.widget().location_dot, Some(LatLng::new(37.71, -122.46)));
        assert_eq!(c.widget().center, Some(LatLng::new(37.7833, -122.4167)));
        assert_eq!(c.widget().zoom, Some(13));
    }

    #[tokio::test]
    async fn maximum_geo_zoom_does_not_overflow() {
        let options = ControllerOptions { geo_zoom: u8::MAX, ..Default::default() };
        let widget = FakeWidget { bounds: Some(city()), ..Default::default() };
        let mut c = MapController::new(widget, FakeFeed::default(), options, ["taco"]);
        c.geolocate(&mut FakeGeolocator(VecDeque::from([Ok(LatLng::new(37.77, -122.44))]))).await;
        assert_eq!(c.widget().zoom, Some(u8::MAX));
        c.on_geolocate_clicked();
        assert_eq!(c.widget().zoom, Some(u8::MAX));
    }

    #[tokio::test]
    async fn geolocation_failure_shows_banner_at_default_view() {
        for error in [GeoError::PermissionDenied, GeoError::Unsupported, GeoError::Timeout] {
            let mut c = with_permits();
            c.widget_mut().center = None;
            c.geolocate(&mut FakeGeolocator(VecDeque::from([Err(error)]))).await;
            assert_eq!(c.widget().center, Some(LatLng::new(37.7833, -122.4167)));
            assert_eq!(c.widget().zoom, Some(13));
            assert_eq!(c.widget().banners, vec![Banner::Geolocation]);
            assert!(!c.widget().map_hidden);
        }
    }

    #[test]
    fn geolocate_button_uses_latest_watched_position() {
        let mut c = with_permits();
        c.on_geolocate_clicked();
        assert_eq!(c.widget().zoom, Some(13));

        c.on_position_update(LatLng::new(37.70, -122.45));
        c.on_position_update(LatLng::new(37.71, -122.46));
        c.on_geolocate_clicked();
        assert_eq!(c.widget().center, Some(LatLng::new(37.71, -122.46)));
        assert_eq!(c.widget().zoom, Some(16));
    }
}
