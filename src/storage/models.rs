use chrono::{DateTime, Utc};

/// Row of the `admin_sessions` table
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub token: String,
    pub username: String,
    pub created_at: i64,
    pub expires_at: i64,
}

impl AdminSession {
    pub fn expires_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.expires_at, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Sort keys supported by the bid listing queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOrder {
    /// Timestamp descending, later insert first on ties
    NewestFirst,
    /// Amount descending, earlier insert first on ties
    HighestFirst,
}

impl BidOrder {
    pub(crate) fn order_by(self) -> &'static str {
        match self {
            BidOrder::NewestFirst => "timestamp DESC, id DESC",
            BidOrder::HighestFirst => "amount DESC, id ASC",
        }
    }
}
