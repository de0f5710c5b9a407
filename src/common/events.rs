use super::types::{Bid, BidSnapshot, SessionGrant};

/// Which request a failure event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Snapshot,
    SubmitBid,
    BidListing,
}

/// Why the server refused a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidRejection {
    /// 409: someone already bid at least as much
    TooLow(String),
    /// 403: past the auction end
    AuctionClosed(String),
    /// Any other 4xx, e.g. field validation
    Invalid(String),
}

/// Results the API client task reports back to the UI.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    SnapshotLoaded(BidSnapshot),
    BidAccepted(Bid),
    BidRejected(BidRejection),
    LoggedIn(SessionGrant),
    LoginFailed(String),
    BidsLoaded(Vec<Bid>),
    SessionExpired,
    RequestFailed {
        request: RequestKind,
        message: String,
    },
}
