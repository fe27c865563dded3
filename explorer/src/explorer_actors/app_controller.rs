use crate::gateway::AssistantGateway;
use crate::state::chat_log::ChatLog;
use crate::state::geo_store::GeoStore;
use crate::state::location_cursor::LocationCursor;
use actix::prelude::*;
use common::constants::GREETING_MESSAGE;
use common::errors::{ChatError, GeoStoreError};
use common::logger::Logger;
use common::messages::{
    AttachViews, CancelRegistration, ClearChat, Deselect, FilterShops, GetSnapshot, MapEvent,
    NearbyShops, OpenRegistration, RegisterVendor, Render, SetVendorStatus, SubmitChat, SyncMap,
};
use common::types::app_state::{AppSnapshot, ViewState};
use common::types::assistant::AssistantQuery;
use common::types::chat_message::MessageId;
use common::types::shop::Shop;
use std::sync::Arc;

/// The `AppController` actor owns every piece of application state and is
/// its only writer.
///
/// ## Responsibilities:
/// - Route map events and user actions into the geo store, the location
///   cursor and the chat log.
/// - Run the shop-selection flow (`Idle`, `ShopSelected`, `Registering`).
/// - Dispatch assistant requests and land each answer in the placeholder it
///   was created for, whatever order they come back in.
/// - Publish the new state to the map and the UI after every change.
pub struct AppController {
    geo_store: GeoStore,
    cursor: LocationCursor,
    chat: ChatLog,
    state: ViewState,
    gateway: Arc<dyn AssistantGateway>,
    map: Option<Recipient<SyncMap>>,
    ui: Option<Recipient<Render>>,
    logger: Logger,
}

impl AppController {
    pub fn new(geo_store: GeoStore, gateway: Arc<dyn AssistantGateway>, logger: Logger) -> Self {
        Self {
            geo_store,
            cursor: LocationCursor::default(),
            chat: ChatLog::with_greeting(GREETING_MESSAGE),
            state: ViewState::Idle,
            gateway,
            map: None,
            ui: None,
            logger,
        }
    }

    fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            state: self.state.clone(),
            cursor: self.cursor.get(),
            shops: self.geo_store.list_all(),
            messages: self.chat.messages().to_vec(),
        }
    }

    /// Pushes the current state to whichever views are attached.
    fn publish(&self) {
        if let Some(map) = &self.map {
            map.do_send(SyncMap {
                center: self.cursor.get(),
                shops: self.geo_store.list_all(),
            });
        }
        if let Some(ui) = &self.ui {
            ui.do_send(Render(self.snapshot()));
        }
    }

    /// Appends the question and its placeholder, then asks the assistant in
    /// the background. The answer is matched back by placeholder id.
    fn submit(&mut self, text: &str, ctx: &mut Context<Self>) -> Result<MessageId, ChatError> {
        let pending = self.chat.submit(text)?;
        let placeholder_id = pending.placeholder_id;

        let query = AssistantQuery {
            prompt: pending.prompt,
            location: self.cursor.get(),
            context: self.geo_store.context_summary(),
        };

        let request = self
            .gateway
            .ask(query)
            .into_actor(self)
            .map(move |outcome, act, _ctx| {
                if let Err(e) = &outcome {
                    act.logger
                        .warn(format!("Assistant request {placeholder_id} failed: {e}"));
                }
                if act.chat.resolve(placeholder_id, outcome) {
                    act.publish();
                } else {
                    act.logger
                        .info(format!("Discarding stale reply for {placeholder_id}"));
                }
            });
        ctx.spawn(request);

        Ok(placeholder_id)
    }

    fn select_shop(&mut self, shop: Shop, ctx: &mut Context<Self>) {
        // Prefer our own copy: the map may hold an outdated status.
        let shop = self.geo_store.find(&shop.id).cloned().unwrap_or(shop);
        self.logger.info(format!("Selected {} ({})", shop.name, shop.id));

        self.cursor.set(shop.coords);
        if !shop.is_vendor {
            let prompt = place_prompt(&shop);
            if let Err(e) = self.submit(&prompt, ctx) {
                self.logger
                    .error(format!("Could not ask about {}: {}", shop.name, e));
            }
        }
        self.state = ViewState::ShopSelected(shop);
    }
}

/// The question asked on the user's behalf when a landmark is clicked.
pub fn place_prompt(shop: &Shop) -> String {
    format!(
        "Tell me about {} at {}. What is it famous for, and what should I order?",
        shop.name, shop.address
    )
}

impl Actor for AppController {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info(format!(
            "Controller ready with {} shops around {}",
            self.geo_store.list_all().len(),
            self.cursor.get()
        ));
    }
}

impl Handler<MapEvent> for AppController {
    type Result = ();

    fn handle(&mut self, msg: MapEvent, ctx: &mut Self::Context) -> Self::Result {
        match msg {
            MapEvent::LocationChanged(coords) => {
                // No transition: a selected shop stays selected.
                self.cursor.set(coords);
            }
            MapEvent::ShopClicked(shop) => self.select_shop(shop, ctx),
        }
        self.publish();
    }
}

impl Handler<SubmitChat> for AppController {
    type Result = Result<MessageId, ChatError>;

    fn handle(&mut self, msg: SubmitChat, ctx: &mut Self::Context) -> Self::Result {
        let id = self.submit(&msg.text, ctx)?;
        self.publish();
        Ok(id)
    }
}

impl Handler<Deselect> for AppController {
    type Result = ();

    fn handle(&mut self, _msg: Deselect, _ctx: &mut Self::Context) -> Self::Result {
        if let ViewState::ShopSelected(_) = self.state {
            self.state = ViewState::Idle;
            self.publish();
        }
    }
}

impl Handler<OpenRegistration> for AppController {
    type Result = ();

    fn handle(&mut self, _msg: OpenRegistration, _ctx: &mut Self::Context) -> Self::Result {
        if self.state != ViewState::Registering {
            self.state = ViewState::Registering;
            self.publish();
        }
    }
}

impl Handler<CancelRegistration> for AppController {
    type Result = ();

    fn handle(&mut self, _msg: CancelRegistration, _ctx: &mut Self::Context) -> Self::Result {
        if self.state == ViewState::Registering {
            self.state = ViewState::Idle;
            self.publish();
        }
    }
}

impl Handler<RegisterVendor> for AppController {
    type Result = Result<Shop, GeoStoreError>;

    fn handle(&mut self, msg: RegisterVendor, _ctx: &mut Self::Context) -> Self::Result {
        let coords = msg.coords.unwrap_or_else(|| self.cursor.get());
        let shop = self
            .geo_store
            .register(&msg.name, &msg.address, coords, msg.menu)
            .inspect_err(|e| self.logger.warn(format!("Registration rejected: {e}")))?;

        // The new vendor is not selected; the form just closes.
        if self.state == ViewState::Registering {
            self.state = ViewState::Idle;
        }
        self.publish();
        Ok(shop)
    }
}

impl Handler<SetVendorStatus> for AppController {
    type Result = Result<Shop, GeoStoreError>;

    fn handle(&mut self, msg: SetVendorStatus, _ctx: &mut Self::Context) -> Self::Result {
        let shop = self.geo_store.set_status(&msg.shop_id, msg.status)?;
        if let ViewState::ShopSelected(selected) = &mut self.state {
            if selected.id == shop.id {
                *selected = shop.clone();
            }
        }
        self.logger
            .info(format!("{} is now {}", shop.name, msg.status));
        self.publish();
        Ok(shop)
    }
}

impl Handler<FilterShops> for AppController {
    type Result = MessageResult<FilterShops>;

    fn handle(&mut self, msg: FilterShops, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.geo_store.filter(&msg.query))
    }
}

impl Handler<NearbyShops> for AppController {
    type Result = MessageResult<NearbyShops>;

    fn handle(&mut self, msg: NearbyShops, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.geo_store.nearest(self.cursor.get(), msg.limit))
    }
}

impl Handler<ClearChat> for AppController {
    type Result = ();

    fn handle(&mut self, _msg: ClearChat, _ctx: &mut Self::Context) -> Self::Result {
        let pending = self.chat.pending();
        if pending > 0 {
            self.logger
                .info(format!("Clearing chat; {pending} replies will be discarded"));
        }
        self.chat.clear();
        self.publish();
    }
}

impl Handler<GetSnapshot> for AppController {
    type Result = MessageResult<GetSnapshot>;

    fn handle(&mut self, _msg: GetSnapshot, _ctx: &mut Self::Context) -> Self::Result {
        MessageResult(self.snapshot())
    }
}

impl Handler<AttachViews> for AppController {
    type Result = ();

    fn handle(&mut self, msg: AttachViews, _ctx: &mut Self::Context) -> Self::Result {
        self.map = msg.map;
        self.ui = msg.ui;
        self.publish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::legend::legend_shops;
    use crate::state::vendor_repository::VendorRepository;
    use crate::test_support::{ScriptedGateway, TempDir, silent_logger, wait_for};
    use common::constants::{APOLOGY_MESSAGE, DEFAULT_CENTER};
    use common::errors::{GatewayError, RegistrationField, ValidationError};
    use common::types::assistant::AssistantReply;
    use common::types::chat_message::ChatRole;
    use common::types::lat_lng::LatLng;
    use common::types::shop::VendorStatus;

    fn start(dir: &TempDir, gateway: Arc<ScriptedGateway>) -> Addr<AppController> {
        let store = GeoStore::open(
            legend_shops(),
            VendorRepository::new(dir.path()),
            silent_logger("geo store"),
        );
        AppController::new(store, gateway, silent_logger("controller")).start()
    }

    fn user_messages(snapshot: &AppSnapshot) -> Vec<&str> {
        snapshot
            .messages
            .iter()
            .filter(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
            .collect()
    }

    fn register(name: &str) -> RegisterVendor {
        RegisterVendor {
            name: name.to_string(),
            address: "Town Hall Rd".to_string(),
            coords: None,
            menu: vec![],
        }
    }

    #[actix_rt::test]
    async fn test_starts_idle_at_city_centre_with_greeting() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.state, ViewState::Idle);
        assert_eq!(snapshot.cursor, DEFAULT_CENTER);
        assert_eq!(snapshot.shops, legend_shops());
        assert_eq!(snapshot.messages.len(), 1);
        assert_eq!(snapshot.messages[0].content, GREETING_MESSAGE);
    }

    #[actix_rt::test]
    async fn test_selecting_legend_shop_asks_about_it() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());
        let konar = legend_shops()[2].clone();

        controller.send(MapEvent::ShopClicked(konar.clone())).await.unwrap();

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.cursor, konar.coords);
        assert_eq!(snapshot.state, ViewState::ShopSelected(konar.clone()));
        assert_eq!(user_messages(&snapshot), vec![place_prompt(&konar).as_str()]);
        assert_eq!(snapshot.pending_replies(), 1);

        let queries = gateway.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].location, konar.coords);
        assert!(queries[0].context.contains("Konar Kadai"));
    }

    #[actix_rt::test]
    async fn test_selecting_vendor_only_moves_cursor() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        let vendor = controller
            .send(RegisterVendor {
                coords: Some(LatLng::new(9.91, 78.11)),
                ..register("Selvi Paniyaram")
            })
            .await
            .unwrap()
            .unwrap();
        let before = controller.send(GetSnapshot).await.unwrap();

        controller.send(MapEvent::ShopClicked(vendor.clone())).await.unwrap();

        let after = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(after.cursor, vendor.coords);
        assert_eq!(after.state, ViewState::ShopSelected(vendor));
        assert_eq!(after.messages, before.messages);
        assert!(gateway.queries().is_empty());
    }

    #[actix_rt::test]
    async fn test_out_of_order_replies_land_in_their_own_placeholder() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        let first = controller
            .send(SubmitChat {
                text: "best kari dosa?".into(),
            })
            .await
            .unwrap()
            .unwrap();
        let second = controller
            .send(SubmitChat {
                text: "anything open late?".into(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_ne!(first, second);

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.pending_replies(), 2);
        assert_eq!(gateway.queries().len(), 2);

        gateway.settle(1, Ok(AssistantReply::text("Konar Kadai stays open late.")));
        gateway.settle(0, Ok(AssistantReply::text("Konar Kadai for kari dosa.")));

        let snapshot = wait_for(&controller, |s| s.pending_replies() == 0).await;
        let content = |id: MessageId| {
            snapshot
                .messages
                .iter()
                .find(|m| m.id == id)
                .map(|m| m.content.clone())
                .unwrap()
        };
        assert_eq!(content(first), "Konar Kadai for kari dosa.");
        assert_eq!(content(second), "Konar Kadai stays open late.");
        // greeting + two questions + two answers, nothing duplicated
        assert_eq!(snapshot.messages.len(), 5);
    }

    #[actix_rt::test]
    async fn test_gateway_failure_becomes_apology() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        let id = controller
            .send(SubmitChat {
                text: "hello".into(),
            })
            .await
            .unwrap()
            .unwrap();
        gateway.settle(0, Err(GatewayError::Network("connection reset".into())));

        let snapshot = wait_for(&controller, |s| s.pending_replies() == 0).await;
        let answer = snapshot.messages.iter().find(|m| m.id == id).unwrap();
        assert_eq!(answer.content, APOLOGY_MESSAGE);
        assert!(!answer.content.contains("connection reset"));
    }

    #[actix_rt::test]
    async fn test_abandoned_request_becomes_apology() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        let id = controller
            .send(SubmitChat {
                text: "still there?".into(),
            })
            .await
            .unwrap()
            .unwrap();
        gateway.abandon(0);

        let snapshot = wait_for(&controller, |s| s.pending_replies() == 0).await;
        let answer = snapshot.messages.iter().find(|m| m.id == id).unwrap();
        assert_eq!(answer.content, APOLOGY_MESSAGE);
    }

    #[actix_rt::test]
    async fn test_blank_chat_is_ignored() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        let result = controller.send(SubmitChat { text: "  ".into() }).await.unwrap();
        assert_eq!(result, Err(ChatError::EmptyInput));

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.messages.len(), 1);
        assert!(gateway.queries().is_empty());
    }

    #[actix_rt::test]
    async fn test_hung_request_keeps_placeholder_loading() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        controller
            .send(SubmitChat {
                text: "slow one".into(),
            })
            .await
            .unwrap()
            .unwrap();
        controller
            .send(SubmitChat {
                text: "fast one".into(),
            })
            .await
            .unwrap()
            .unwrap();
        gateway.settle(1, Ok(AssistantReply::text("quick answer")));

        let snapshot = wait_for(&controller, |s| s.pending_replies() == 1).await;
        assert!(snapshot.messages.last().is_some_and(|m| !m.is_loading));
    }

    #[actix_rt::test]
    async fn test_reply_after_clear_is_discarded() {
        let dir = TempDir::new();
        let gateway = ScriptedGateway::new();
        let controller = start(&dir, gateway.clone());

        controller
            .send(SubmitChat {
                text: "hello".into(),
            })
            .await
            .unwrap()
            .unwrap();
        controller.send(ClearChat).await.unwrap();
        gateway.settle(0, Ok(AssistantReply::text("too late")));

        // Give the spawned request a chance to run.
        actix_rt::time::sleep(std::time::Duration::from_millis(20)).await;
        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert!(snapshot.messages.is_empty());
    }

    #[actix_rt::test]
    async fn test_map_click_moves_cursor_without_leaving_selection() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());
        let amma = legend_shops()[0].clone();

        controller.send(MapEvent::ShopClicked(amma.clone())).await.unwrap();
        let elsewhere = LatLng::new(9.95, 78.15);
        controller.send(MapEvent::LocationChanged(elsewhere)).await.unwrap();

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.cursor, elsewhere);
        assert_eq!(snapshot.state, ViewState::ShopSelected(amma));
    }

    #[actix_rt::test]
    async fn test_deselect_returns_to_idle() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());

        controller
            .send(MapEvent::ShopClicked(legend_shops()[1].clone()))
            .await
            .unwrap();
        controller.send(Deselect).await.unwrap();

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.state, ViewState::Idle);
    }

    #[actix_rt::test]
    async fn test_registration_flow() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());
        let pin = LatLng::new(9.912, 78.101);
        controller.send(MapEvent::LocationChanged(pin)).await.unwrap();

        controller.send(OpenRegistration).await.unwrap();
        assert_eq!(
            controller.send(GetSnapshot).await.unwrap().state,
            ViewState::Registering
        );

        // Validation failure keeps the form open and reports the field.
        let err = controller
            .send(RegisterVendor {
                address: "   ".into(),
                ..register("Ravi's Kothu Cart")
            })
            .await
            .unwrap()
            .unwrap_err();
        assert!(matches!(
            err,
            GeoStoreError::Validation(ValidationError {
                field: RegistrationField::Address,
                ..
            })
        ));
        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.state, ViewState::Registering);
        assert_eq!(snapshot.shops.len(), legend_shops().len());

        // Success closes the form, defaults to the cursor, selects nothing.
        let shop = controller
            .send(register("Ravi's Kothu Cart"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(shop.coords, pin);

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.state, ViewState::Idle);
        assert_eq!(snapshot.shops.last(), Some(&shop));
    }

    #[actix_rt::test]
    async fn test_cancel_registration() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());

        controller.send(OpenRegistration).await.unwrap();
        controller.send(CancelRegistration).await.unwrap();
        assert_eq!(controller.send(GetSnapshot).await.unwrap().state, ViewState::Idle);
    }

    #[actix_rt::test]
    async fn test_status_change_refreshes_selected_vendor() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());
        let vendor = controller
            .send(register("Night Dosa Stall"))
            .await
            .unwrap()
            .unwrap();
        controller.send(MapEvent::ShopClicked(vendor.clone())).await.unwrap();

        let updated = controller
            .send(SetVendorStatus {
                shop_id: vendor.id.clone(),
                status: VendorStatus::Offline,
            })
            .await
            .unwrap()
            .unwrap();

        let snapshot = controller.send(GetSnapshot).await.unwrap();
        assert_eq!(snapshot.state, ViewState::ShopSelected(updated));
        assert_eq!(
            snapshot.state.selected_shop().and_then(|s| s.status),
            Some(VendorStatus::Offline)
        );
    }

    #[actix_rt::test]
    async fn test_filter_and_nearby_queries() {
        let dir = TempDir::new();
        let controller = start(&dir, ScriptedGateway::new());

        let listing = controller
            .send(FilterShops {
                query: "MESS".into(),
            })
            .await
            .unwrap();
        assert_eq!(listing.legend.len(), 2);
        assert!(listing.vendors.is_empty());

        let amma = legend_shops()[0].clone();
        controller
            .send(MapEvent::LocationChanged(amma.coords))
            .await
            .unwrap();
        let nearby = controller.send(NearbyShops { limit: 2 }).await.unwrap();
        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[0].id, amma.id);
    }
}
