use super::types::NewBid;

/// Requests the UI hands to the API client task.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Re-read the latest and highest bid
    RefreshSnapshot,
    SubmitBid(NewBid),
    Login {
        username: String,
        password: String,
    },
    Logout {
        token: String,
    },
    /// Full listing for the admin table
    FetchAllBids {
        token: String,
    },
}
