pub mod auth;
pub mod error;
pub mod payload;
pub mod routes;
pub mod state;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;

pub use error::ApiError;
pub use state::ApiState;

use routes::{
    admin_login_handler, admin_logout_handler, bid_snapshot_handler, create_bid_handler,
    list_bids_handler,
};

pub fn build_router(state: Arc<ApiState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/bids", post(create_bid_handler).get(bid_snapshot_handler))
        .route("/api/lances", get(list_bids_handler))
        .route("/api/admin/login", post(admin_login_handler))
        .route("/api/admin/logout", post(admin_logout_handler))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: AppConfig) -> Result<(), Box<dyn Error>> {
    let address = config.bind_address.clone();
    log::info!(
        "Auction `{}` closes at {}",
        config.auction_title,
        config.auction_ends_at
    );

    let state = ApiState::open(config)?;
    let app = build_router(state);

    let listener = TcpListener::bind(&address).await?;
    log::info!("Bid API listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Bid API shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(err) => {
                log::error!("Failed to listen for Ctrl+C: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                log::error!("Failed to install terminate handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
