use crate::commands::{Command, HELP, parse_command};
use crate::explorer_actors::app_controller::AppController;
use crate::explorer_actors::map_adapter::MapAdapter;
use crate::messages::internal_messages::UserInput;
use actix::prelude::*;
use colored::*;
use common::constants::NEARBY_LIMIT;
use common::errors::GeoStoreError;
use common::logger::Logger;
use common::messages::{
    CancelRegistration, ClearChat, Deselect, FilterShops, MapInput, NearbyShops,
    OpenRegistration, RegisterVendor, Render, SetVendorStatus, SubmitChat,
};
use common::types::app_state::{AppSnapshot, ViewState};
use common::types::chat_message::{ChatMessage, ChatRole, MessageId};
use common::types::lat_lng::LatLng;
use common::types::shop::Shop;
use futures_channel::oneshot;
use std::collections::HashSet;

/// Turns successive snapshots into the lines that changed since the last one.
#[derive(Debug, Default)]
pub struct ChatRenderer {
    state: Option<ViewState>,
    cursor: Option<LatLng>,
    /// Messages printed in their final form.
    shown: HashSet<MessageId>,
    /// Placeholders already announced as pending.
    waiting: HashSet<MessageId>,
}

impl ChatRenderer {
    pub fn render(&mut self, snapshot: &AppSnapshot) -> Vec<String> {
        let mut lines = Vec::new();

        if self.state.as_ref() != Some(&snapshot.state) {
            lines.push(describe_state(&snapshot.state));
            self.state = Some(snapshot.state.clone());
        }
        if self.cursor != Some(snapshot.cursor) {
            lines.push(format!("{} {}", "📍".dimmed(), snapshot.cursor));
            self.cursor = Some(snapshot.cursor);
        }

        for message in &snapshot.messages {
            if self.shown.contains(&message.id) {
                continue;
            }
            if message.is_loading {
                if self.waiting.insert(message.id) {
                    lines.push(format!("{}", "guide is thinking…".dimmed().italic()));
                }
                continue;
            }
            self.shown.insert(message.id);
            lines.extend(format_message(message));
        }
        lines
    }
}

fn describe_state(state: &ViewState) -> String {
    match state {
        ViewState::Idle => format!("{}", format!("── {state} ──").dimmed()),
        ViewState::ShopSelected(shop) => {
            let mut line = format!("{} {}", "══".cyan(), shop_line(shop).bold());
            for item in shop.menu_items() {
                line.push_str(&format!("\n     {} ₹{:.0}", item.name, item.price));
            }
            line
        }
        ViewState::Registering => format!(
            "{} name | address | item:price, ... then /vendor, or /cancel",
            "Register your stall:".bold().green()
        ),
    }
}

fn format_message(message: &ChatMessage) -> Vec<String> {
    let mut lines = match message.role {
        ChatRole::User => vec![format!("{} {}", "you ›".bold().blue(), message.content)],
        ChatRole::Assistant => {
            vec![format!("{} {}", "guide ›".bold().green(), message.content)]
        }
    };
    for citation in &message.citations {
        lines.push(format!(
            "   {} {} ({})",
            "↳".dimmed(),
            citation.title,
            citation.uri.underline()
        ));
    }
    lines
}

pub fn shop_line(shop: &Shop) -> String {
    let status = match shop.status {
        Some(status) => format!(" [{status}]"),
        None => String::new(),
    };
    format!("{:<10} {}, {}{}", shop.id, shop.name, shop.address, status)
}

pub fn print_banner() {
    println!("{}", "Street Food Explorer".bold().yellow());
    println!("{}", "Type a question, or /help for commands.".dimmed());
}

/// Actor UIHandler: human-system interface on the terminal.
pub struct UIHandler {
    /// Address of the `AppController`.
    pub controller: Addr<AppController>,
    /// Address of the `MapAdapter`; pointer input goes through the map.
    pub map: Addr<MapAdapter>,
    /// Signalled once when the user asks to quit.
    pub shutdown: Option<oneshot::Sender<()>>,
    pub renderer: ChatRenderer,
    pub logger: Logger,
}

impl UIHandler {
    pub fn new(
        controller: Addr<AppController>,
        map: Addr<MapAdapter>,
        shutdown: oneshot::Sender<()>,
        logger: Logger,
    ) -> Self {
        Self {
            controller,
            map,
            shutdown: Some(shutdown),
            renderer: ChatRenderer::default(),
            logger,
        }
    }

    fn show_shops(&self, title: &str, shops: &[Shop]) {
        println!("{}", title.bold());
        if shops.is_empty() {
            println!("   {}", "nothing found".dimmed());
        }
        for shop in shops {
            println!("   {}", shop_line(shop));
        }
    }

    fn run(&mut self, command: Command, ctx: &mut Context<Self>) {
        match command {
            // Blank chat is rejected by the controller without a trace.
            Command::Chat(text) => self.controller.do_send(SubmitChat { text }),
            Command::List => self.list("", ctx),
            Command::Find(query) => self.list(&query, ctx),
            Command::Nearby => {
                self.controller
                    .send(NearbyShops {
                        limit: NEARBY_LIMIT,
                    })
                    .into_actor(self)
                    .map(|res, act, _ctx| match res {
                        Ok(shops) => act.show_shops("Closest to the pin", &shops),
                        Err(e) => act.logger.error(format!("Controller unavailable: {e}")),
                    })
                    .wait(ctx);
            }
            Command::Open(id) => self.map.do_send(MapInput::ClickMarker(id)),
            Command::Close => self.controller.do_send(Deselect),
            Command::Pin(coords) => self.map.do_send(MapInput::ClickMap(coords)),
            Command::Register => self.controller.do_send(OpenRegistration),
            Command::Vendor {
                name,
                address,
                menu,
            } => {
                self.controller
                    .send(RegisterVendor {
                        name,
                        address,
                        coords: None,
                        menu,
                    })
                    .into_actor(self)
                    .map(|res, act, _ctx| match res {
                        Ok(Ok(shop)) => println!(
                            "{} {}",
                            "Registered".bold().green(),
                            shop_line(&shop)
                        ),
                        Ok(Err(GeoStoreError::Validation(e))) => {
                            println!("   {} {} {}", e.field, "✗".red().bold(), e.reason.red())
                        }
                        Ok(Err(e)) => act.logger.error(format!("Registration failed: {e}")),
                        Err(e) => act.logger.error(format!("Controller unavailable: {e}")),
                    })
                    .wait(ctx);
            }
            Command::Cancel => self.controller.do_send(CancelRegistration),
            Command::Status { shop_id, status } => {
                self.controller
                    .send(SetVendorStatus { shop_id, status })
                    .into_actor(self)
                    .map(|res, act, _ctx| match res {
                        Ok(Ok(shop)) => println!("{}", shop_line(&shop)),
                        Ok(Err(e)) => act.logger.warn(e.to_string()),
                        Err(e) => act.logger.error(format!("Controller unavailable: {e}")),
                    })
                    .wait(ctx);
            }
            Command::Clear => self.controller.do_send(ClearChat),
            Command::Help => println!("{HELP}"),
            Command::Quit => {
                if let Some(shutdown) = self.shutdown.take() {
                    let _ = shutdown.send(());
                }
            }
        }
    }

    fn list(&mut self, query: &str, ctx: &mut Context<Self>) {
        self.controller
            .send(FilterShops {
                query: query.to_string(),
            })
            .into_actor(self)
            .map(|res, act, _ctx| match res {
                Ok(listing) if listing.is_empty() => {
                    println!("   {}", "no shop matches".dimmed())
                }
                Ok(listing) => {
                    act.show_shops("Legends", &listing.legend);
                    act.show_shops("Vendors", &listing.vendors);
                }
                Err(e) => act.logger.error(format!("Controller unavailable: {e}")),
            })
            .wait(ctx);
    }
}

impl Actor for UIHandler {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        self.logger.info("UIHandler started");
    }
}

impl Handler<UserInput> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: UserInput, ctx: &mut Self::Context) {
        match parse_command(&msg.0) {
            Ok(command) => self.run(command, ctx),
            Err(e) => self.logger.warn(e),
        }
    }
}

impl Handler<Render> for UIHandler {
    type Result = ();

    fn handle(&mut self, msg: Render, _ctx: &mut Self::Context) {
        for line in self.renderer.render(&msg.0) {
            println!("{line}");
        }
    }
}
