use actix::Actor;
use colored::Color;
use common::constants::DEFAULT_CENTER;
use common::logger::Logger;
use common::messages::AttachViews;
use explorer::config::{AppConfig, USAGE};
use explorer::explorer_actors::app_controller::AppController;
use explorer::explorer_actors::map_adapter::MapAdapter;
use explorer::explorer_actors::ui_handler::{UIHandler, print_banner};
use explorer::gateway::{AssistantGateway, GeminiGateway, OfflineGateway};
use explorer::messages::internal_messages::UserInput;
use explorer::state::geo_store::GeoStore;
use explorer::state::legend::legend_shops;
use explorer::state::vendor_repository::VendorRepository;
use futures_channel::oneshot;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::ctrl_c;

#[actix::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };
    let level = config.log_level;
    let logger = Logger::new("explorer", Color::Yellow).with_level(level);

    let repository = VendorRepository::new(&config.storage_dir);
    logger.info(format!("Vendor record at {}", repository.path().display()));
    let geo_store = GeoStore::open(
        legend_shops(),
        repository,
        Logger::new("geo store", Color::Green).with_level(level),
    );

    let gateway: Arc<dyn AssistantGateway> = match config.api_key.clone() {
        Some(key) => Arc::new(GeminiGateway::new(
            key,
            config.model.clone(),
            config.endpoint.clone(),
        )),
        None => {
            logger.warn("GEMINI_API_KEY is not set; every question will get the apology");
            Arc::new(OfflineGateway)
        }
    };

    print_banner();

    let controller = AppController::new(
        geo_store,
        gateway,
        Logger::new("controller", Color::Cyan).with_level(level),
    )
    .start();
    let map = MapAdapter::new(
        controller.clone().recipient(),
        DEFAULT_CENTER,
        Logger::new("map", Color::Blue).with_level(level),
    )
    .start();

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let ui = UIHandler::new(
        controller.clone(),
        map.clone(),
        shutdown_tx,
        Logger::new("ui", Color::Magenta).with_level(level),
    )
    .start();

    controller.do_send(AttachViews {
        map: Some(map.recipient()),
        ui: Some(ui.clone().recipient()),
    });

    let input = async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            ui.do_send(UserInput(line));
        }
    };

    tokio::select! {
        _ = ctrl_c() => logger.info("Ctrl-C received, shutting down"),
        _ = shutdown_rx => logger.info("Goodbye"),
        _ = input => logger.info("Input closed, shutting down"),
    }
    actix::System::current().stop();
    Ok(())
}
