pub mod app;
pub mod components;
pub mod format;
pub mod state;

pub use app::{AuctionApp, AuctionInfo};
