use crate::types::Coordinate;

pub const DEFAULT_ZOOM: u8 = 15;
pub const OSM_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Map widget state: the view `center` and the user's `marker`.
///
/// The two move independently. Geolocation recenters the view; clicks only
/// move the marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Coordinate,
    marker: Coordinate,
    zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Coordinate::ORIGIN,
            marker: Coordinate::ORIGIN,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn marker(&self) -> Coordinate {
        self.marker
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn tile_url(&self) -> &'static str {
        OSM_TILE_URL
    }

    pub fn recenter(&mut self, center: Coordinate) {
        self.center = center;
    }

    pub fn click(&mut self, at: Coordinate) {
        self.marker = at;
    }
}
