use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored auction offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub id: i64,
    pub name: String,
    pub contact: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// A bid that has passed validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBid {
    pub name: String,
    pub contact: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Body of `GET /api/bids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidSnapshot {
    pub latest_bid: Option<Bid>,
    pub highest_bid: Option<Bid>,
}

impl BidSnapshot {
    pub fn highest_amount(&self) -> Option<f64> {
        self.highest_bid.as_ref().map(|bid| bid.amount)
    }
}

/// Body of `GET /api/lances`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BidList {
    pub data: Vec<Bid>,
}

/// Body of a successful `POST /api/bids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BidCreated {
    pub message: String,
    pub bid: Bid,
}

/// Plain `{message}` body used for errors and acknowledgements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Server-issued admin session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionGrant {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
