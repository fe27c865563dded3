use common::constants::DEFAULT_CENTER;
use common::types::lat_lng::LatLng;

/// The single current-focus coordinate. Map pin, registration default and
/// assistant context all read it at use time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationCursor {
    coords: LatLng,
}

impl LocationCursor {
    pub fn new(coords: LatLng) -> Self {
        Self { coords }
    }

    pub fn get(&self) -> LatLng {
        self.coords
    }

    pub fn set(&mut self, coords: LatLng) {
        self.coords = coords;
    }
}

impl Default for LocationCursor {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER)
    }
}
