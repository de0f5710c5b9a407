//! Single-auction bidding: an HTTP bid API over SQLite and an egui desktop
//! client with the public auction page and the admin listing.
//!
//! Run the API with `auction_bids server`; run the desktop client with no
//! subcommand. Both read `config/auction.json` plus `AUCTION_*` environment
//! overrides (see [`config::AppConfig`]).

pub mod api;
pub mod common;
pub mod config;
pub mod network;
pub mod storage;
pub mod ui;
