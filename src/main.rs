use std::error::Error;

use auction_bids::api;
use auction_bids::config::{self, AppConfig};
use auction_bids::network::{ApiClient, ApiWorker};
use auction_bids::ui::{AuctionApp, AuctionInfo};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

#[derive(Parser)]
#[command(
    name = "auction_bids",
    version,
    about = "Single-auction bid API and desktop client"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run the HTTP bid API (no UI)
    Server,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);

    if cli.mode == Some(Mode::Server) {
        return api::run_server(app_config).await;
    }

    run_desktop_client(app_config).await
}

async fn run_desktop_client(config: AppConfig) -> Result<(), Box<dyn Error>> {
    // UI -> API worker
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // API worker -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    let client = ApiClient::new(&config.api_base_url);
    tokio::spawn(ApiWorker::new(client, event_tx, cmd_rx).run());

    let info = AuctionInfo {
        title: config.auction_title.clone(),
        description: config.auction_description.clone(),
        ends_at: config.auction_ends_at,
    };
    let api_base_url = config.api_base_url.clone();
    let options = eframe::NativeOptions::default();

    eframe::run_native(
        &config.auction_title,
        options,
        Box::new(move |cc| {
            log::info!("Desktop client using API at {api_base_url}");
            Ok(Box::new(AuctionApp::new(cc, info, cmd_tx, event_rx)))
        }),
    )?;

    Ok(())
}
