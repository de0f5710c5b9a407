use reqwest::StatusCode;
use tokio::sync::mpsc;

use crate::common::{ApiCommand, ApiEvent, BidRejection, RequestKind};

use super::client::ApiClient;
use super::error::ClientError;

/// Background task that runs UI commands against the API and reports back.
pub struct ApiWorker {
    client: ApiClient,
    event_sender: mpsc::Sender<ApiEvent>,
    command_receiver: mpsc::Receiver<ApiCommand>,
}

impl ApiWorker {
    pub fn new(
        client: ApiClient,
        event_sender: mpsc::Sender<ApiEvent>,
        command_receiver: mpsc::Receiver<ApiCommand>,
    ) -> Self {
        Self {
            client,
            event_sender,
            command_receiver,
        }
    }

    pub async fn run(mut self) {
        log::info!("API worker started");

        while let Some(command) = self.command_receiver.recv().await {
            if let Some(event) = self.handle_command(command).await {
                if let Err(err) = self.event_sender.send(event).await {
                    log::warn!("UI dropped before event delivery: {err}");
                    break;
                }
            }
        }

        log::info!("API worker stopped");
    }

    async fn handle_command(&self, command: ApiCommand) -> Option<ApiEvent> {
        let event = match command {
            ApiCommand::RefreshSnapshot => match self.client.fetch_snapshot().await {
                Ok(snapshot) => ApiEvent::SnapshotLoaded(snapshot),
                Err(err) => request_failed(RequestKind::Snapshot, err),
            },
            ApiCommand::SubmitBid(bid) => match self.client.submit_bid(&bid).await {
                Ok(created) => ApiEvent::BidAccepted(created.bid),
                Err(err) => match err.status().and_then(|status| rejection(status, &err)) {
                    Some(rejection) => ApiEvent::BidRejected(rejection),
                    None => request_failed(RequestKind::SubmitBid, err),
                },
            },
            ApiCommand::Login { username, password } => {
                match self.client.login(&username, &password).await {
                    Ok(grant) => ApiEvent::LoggedIn(grant),
                    Err(err) => {
                        log::warn!("Admin login failed: {err}");
                        ApiEvent::LoginFailed(err.user_message())
                    }
                }
            }
            ApiCommand::Logout { token } => {
                if let Err(err) = self.client.logout(&token).await {
                    log::warn!("Logout request failed: {err}");
                }
                return None;
            }
            ApiCommand::FetchAllBids { token } => {
                match self.client.fetch_all_bids(&token).await {
                    Ok(bids) => ApiEvent::BidsLoaded(bids),
                    Err(err) if err.status() == Some(StatusCode::UNAUTHORIZED) => {
                        ApiEvent::SessionExpired
                    }
                    Err(err) => request_failed(RequestKind::BidListing, err),
                }
            }
        };

        Some(event)
    }
}

/// Map a 4xx answer to a bid into the slot the form shows it in
fn rejection(status: StatusCode, err: &ClientError) -> Option<BidRejection> {
    let message = err.user_message();
    match status {
        StatusCode::CONFLICT => Some(BidRejection::TooLow(message)),
        StatusCode::FORBIDDEN => Some(BidRejection::AuctionClosed(message)),
        status if status.is_client_error() => Some(BidRejection::Invalid(message)),
        _ => None,
    }
}

fn request_failed(request: RequestKind, err: ClientError) -> ApiEvent {
    log::warn!("{request:?} request failed: {err}");
    ApiEvent::RequestFailed {
        request,
        message: err.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode, message: &str) -> ClientError {
        ClientError::Status {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn bid_rejections_follow_status() {
        let closed = status_error(StatusCode::FORBIDDEN, "Auction closed");
        assert_eq!(
            rejection(StatusCode::FORBIDDEN, &closed),
            Some(BidRejection::AuctionClosed("Auction closed".to_string()))
        );

        let low = status_error(StatusCode::CONFLICT, "too low");
        assert_eq!(
            rejection(StatusCode::CONFLICT, &low),
            Some(BidRejection::TooLow("too low".to_string()))
        );

        let invalid = status_error(StatusCode::BAD_REQUEST, "Name is required");
        assert!(matches!(
            rejection(StatusCode::BAD_REQUEST, &invalid),
            Some(BidRejection::Invalid(_))
        ));

        let server = status_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save bid");
        assert_eq!(rejection(StatusCode::INTERNAL_SERVER_ERROR, &server), None);
    }
}
