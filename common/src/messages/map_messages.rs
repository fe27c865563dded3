use crate::types::lat_lng::LatLng;
use crate::types::shop::Shop;
use actix::prelude::*;

/// Events the map emits towards the controller on user interaction.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub enum MapEvent {
    /// The base map was clicked or the cursor marker was dragged.
    LocationChanged(LatLng),
    /// A shop marker was clicked.
    ShopClicked(Shop),
}

/// Controller → map: the full marker set and the cursor position.
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct SyncMap {
    pub center: LatLng,
    pub shops: Vec<Shop>,
}

/// Raw pointer input delivered to the map by the front-end.
#[derive(Message, Debug, Clone, PartialEq)]
#[rtype(result = "()")]
pub enum MapInput {
    ClickMarker(String),
    ClickMap(LatLng),
    DragCursor(LatLng),
}

/// Query for the markers and cursor the map currently shows.
#[derive(Message, Debug)]
#[rtype(result = "MapView")]
pub struct GetMapView;

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub markers: Vec<Shop>,
}
