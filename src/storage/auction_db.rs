use chrono::{DateTime, Duration, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, Row, TransactionBehavior, params};
use std::path::Path;
use uuid::Uuid;

use crate::common::{Bid, NewBid};

use super::database::Database;
use super::models::{AdminSession, BidOrder};

pub const DEFAULT_DB_PATH: &str = "data/auction.db";

const BID_COLUMNS: &str = "id, name, contact, amount, timestamp";

/// Result of an atomic compare-and-insert
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceOutcome {
    Placed(Bid),
    /// Another bid at or above the offered amount was already stored
    TooLow { highest: f64 },
}

/// Database for the auction (bids and admin sessions)
pub struct AuctionDatabase {
    db: Database,
}

impl AuctionDatabase {
    /// Initialize auction database at custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> SqlResult<Self> {
        Self::init(Database::open(path)?)
    }

    pub fn in_memory() -> SqlResult<Self> {
        Self::init(Database::in_memory()?)
    }

    fn init(db: Database) -> SqlResult<Self> {
        let auction_db = Self { db };
        auction_db.init_schema()?;
        Ok(auction_db)
    }

    fn init_schema(&self) -> SqlResult<()> {
        let conn = self.db.connection();

        // Bids table, timestamp in unix millis
        conn.execute(
            "CREATE TABLE IF NOT EXISTS bids (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                contact TEXT NOT NULL,
                amount REAL NOT NULL,
                timestamp INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS admin_sessions (
                token TEXT PRIMARY KEY,
                username TEXT NOT NULL,
                created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
                expires_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bids_timestamp ON bids(timestamp)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_bids_amount ON bids(amount)",
            [],
        )?;
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_sessions_expires_at ON admin_sessions(expires_at)",
            [],
        )?;

        Ok(())
    }

    // ========== Bids ==========

    /// Insert a bid without looking at the current highest
    pub fn create(&self, bid: &NewBid) -> SqlResult<Bid> {
        insert_bid(self.db.connection(), bid)
    }

    /// Insert a bid only if it beats every stored amount.
    ///
    /// The read and the insert share one `IMMEDIATE` transaction, so two
    /// writers racing on the same highest bid are serialized by SQLite.
    pub fn create_if_higher(&mut self, bid: &NewBid) -> SqlResult<PlaceOutcome> {
        let tx = self
            .db
            .connection_mut()
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let highest: Option<f64> =
            tx.query_row("SELECT MAX(amount) FROM bids", [], |row| row.get(0))?;

        if let Some(highest) = highest {
            if bid.amount <= highest {
                return Ok(PlaceOutcome::TooLow { highest });
            }
        }

        let stored = insert_bid(&tx, bid)?;
        tx.commit()?;
        Ok(PlaceOutcome::Placed(stored))
    }

    pub fn list_all(&self, order: BidOrder) -> SqlResult<Vec<Bid>> {
        let conn = self.db.connection();
        let mut stmt = conn.prepare(&format!(
            "SELECT {BID_COLUMNS} FROM bids ORDER BY {}",
            order.order_by()
        ))?;

        let bids = stmt
            .query_map([], bid_from_row)?
            .collect::<SqlResult<Vec<_>>>()?;

        Ok(bids)
    }

    pub fn find_first(&self, order: BidOrder) -> SqlResult<Option<Bid>> {
        let conn = self.db.connection();
        conn.query_row(
            &format!(
                "SELECT {BID_COLUMNS} FROM bids ORDER BY {} LIMIT 1",
                order.order_by()
            ),
            [],
            bid_from_row,
        )
        .optional()
    }

    pub fn latest(&self) -> SqlResult<Option<Bid>> {
        self.find_first(BidOrder::NewestFirst)
    }

    pub fn highest(&self) -> SqlResult<Option<Bid>> {
        self.find_first(BidOrder::HighestFirst)
    }

    /// Get bid count
    pub fn count(&self) -> SqlResult<usize> {
        let conn = self.db.connection();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM bids", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    // ========== Admin sessions ==========

    pub fn create_session(
        &self,
        username: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> SqlResult<AdminSession> {
        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            created_at: now.timestamp(),
            expires_at: now
                .checked_add_signed(ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC)
                .timestamp(),
        };

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO admin_sessions (token, username, created_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                session.token,
                session.username,
                session.created_at,
                session.expires_at
            ],
        )?;
        Ok(session)
    }

    /// Look up a session that has not expired yet
    pub fn find_active_session(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> SqlResult<Option<AdminSession>> {
        let conn = self.db.connection();
        conn.query_row(
            "SELECT token, username, created_at, expires_at
             FROM admin_sessions
             WHERE token = ?1 AND expires_at > ?2",
            params![token, now.timestamp()],
            |row| {
                Ok(AdminSession {
                    token: row.get(0)?,
                    username: row.get(1)?,
                    created_at: row.get(2)?,
                    expires_at: row.get(3)?,
                })
            },
        )
        .optional()
    }

    pub fn delete_session(&self, token: &str) -> SqlResult<bool> {
        let conn = self.db.connection();
        let removed = conn.execute(
            "DELETE FROM admin_sessions WHERE token = ?1",
            params![token],
        )?;
        Ok(removed > 0)
    }

    pub fn purge_expired_sessions(&self, now: DateTime<Utc>) -> SqlResult<usize> {
        let conn = self.db.connection();
        conn.execute(
            "DELETE FROM admin_sessions WHERE expires_at <= ?1",
            params![now.timestamp()],
        )
    }
}

fn insert_bid(conn: &Connection, bid: &NewBid) -> SqlResult<Bid> {
    // Stored with millisecond precision; echo back what a later read returns
    let timestamp = bid.timestamp.trunc_subsecs(3);
    conn.execute(
        "INSERT INTO bids (name, contact, amount, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![
            bid.name,
            bid.contact,
            bid.amount,
            timestamp.timestamp_millis()
        ],
    )?;

    Ok(Bid {
        id: conn.last_insert_rowid(),
        name: bid.name.clone(),
        contact: bid.contact.clone(),
        amount: bid.amount,
        timestamp,
    })
}

fn bid_from_row(row: &Row<'_>) -> SqlResult<Bid> {
    let millis: i64 = row.get(4)?;
    let timestamp = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Integer,
            format!("timestamp {millis} out of range").into(),
        )
    })?;

    Ok(Bid {
        id: row.get(0)?,
        name: row.get(1)?,
        contact: row.get(2)?,
        amount: row.get(3)?,
        timestamp,
    })
}
