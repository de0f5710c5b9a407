pub mod auction_db;
pub mod database;
pub mod models;

pub use auction_db::{AuctionDatabase, PlaceOutcome};
pub use models::{AdminSession, BidOrder};

use std::fs;
use std::path::Path;

/// Ensure the parent directory of a database file exists
pub fn ensure_parent_dir(path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
