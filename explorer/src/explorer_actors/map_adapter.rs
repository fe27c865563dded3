use actix::prelude::*;
use common::logger::Logger;
use common::messages::{GetMapView, MapEvent, MapInput, MapView, SyncMap};
use common::types::lat_lng::LatLng;
use common::types::shop::Shop;

/// Actor MapAdapter: owns the shop markers and the draggable cursor marker.
///
/// Pointer input arrives as [`MapInput`] and leaves as typed [`MapEvent`]s
/// for the controller; no business logic lives here.
pub struct MapAdapter {
    /// Where map events are delivered.
    pub events: Recipient<MapEvent>,
    /// Position of the cursor marker.
    pub center: LatLng,
    /// Shop markers currently placed, in display order.
    pub markers: Vec<Shop>,
    pub logger: Logger,
}

impl MapAdapter {
    pub fn new(events: Recipient<MapEvent>, center: LatLng, logger: Logger) -> Self {
        Self {
            events,
            center,
            markers: Vec::new(),
            logger,
        }
    }

    fn marker(&self, id: &str) -> Option<&Shop> {
        self.markers.iter().find(|shop| shop.id == id)
    }
}

impl Actor for MapAdapter {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info(format!("Map centred on {}", self.center));
    }
}

impl Handler<SyncMap> for MapAdapter {
    type Result = ();

    fn handle(&mut self, msg: SyncMap, _ctx: &mut Self::Context) -> Self::Result {
        if msg.shops.len() != self.markers.len() {
            self.logger
                .info(format!("Placing {} shop markers", msg.shops.len()));
        }
        self.center = msg.center;
        self.markers = msg.shops;
    }
}

impl Handler<MapInput> for MapAdapter {
    type Result = ();

    fn handle(&mut self, msg: MapInput, _ctx: &mut Self::Context) -> Self::Result {
        match msg {
            MapInput::ClickMarker(id) => match self.marker(&id) {
                Some(shop) => {
                    self.events.do_send(MapEvent::ShopClicked(shop.clone()));
                }
                None => self.logger.warn(format!("No marker with id '{id}'")),
            },
            MapInput::ClickMap(coords) | MapInput::DragCursor(coords) => {
                self.center = coords;
                self.events.do_send(MapEvent::LocationChanged(coords));
            }
        }
    }
}

impl Handler<GetMapView> for MapAdapter {
    type Result = MessageResult<GetMapView>;

    fn handle(&mut self, _msg: GetMapView, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(MapView {
            center: self.center,
            markers: self.markers.clone(),
        })
    }
}
