pub mod commands;
pub mod events;
pub mod types;
pub mod validation;

pub use commands::ApiCommand;
pub use events::{ApiEvent, BidRejection, RequestKind};
pub use types::{
    Bid, BidCreated, BidList, BidSnapshot, LoginRequest, MessageBody, NewBid, SessionGrant,
};
