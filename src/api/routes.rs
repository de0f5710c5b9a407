use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use chrono::Utc;

use crate::common::{BidCreated, BidList, BidSnapshot, LoginRequest, MessageBody, SessionGrant};
use crate::storage::{BidOrder, PlaceOutcome};

use super::auth::{bearer_token, credentials_match, require_session};
use super::error::ApiError;
use super::payload::CreateBidRequest;
use super::state::ApiState;

/// `POST /api/bids`
pub async fn create_bid_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateBidRequest>, JsonRejection>,
) -> Result<Json<BidCreated>, ApiError> {
    let Json(request) = payload.map_err(|err| ApiError::MalformedPayload(err.body_text()))?;

    let now = Utc::now();
    if !state.config.auction_is_open(now) {
        return Err(ApiError::AuctionClosed);
    }

    let new_bid = request.into_new_bid(now).map_err(ApiError::Validation)?;

    let outcome = {
        let mut db = state.db.lock().await;
        db.create_if_higher(&new_bid)
            .map_err(ApiError::store("Failed to save bid"))?
    };

    match outcome {
        PlaceOutcome::Placed(bid) => {
            log::info!("Bid #{} saved: {:.2} by {}", bid.id, bid.amount, bid.name);
            Ok(Json(BidCreated {
                message: "Bid saved successfully".to_string(),
                bid,
            }))
        }
        PlaceOutcome::TooLow { highest } => Err(ApiError::BidTooLow { highest }),
    }
}

/// `GET /api/bids`
pub async fn bid_snapshot_handler(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<BidSnapshot>, ApiError> {
    let db = state.db.lock().await;
    let latest_bid = db.latest().map_err(ApiError::store("Failed to fetch bids"))?;
    let highest_bid = db.highest().map_err(ApiError::store("Failed to fetch bids"))?;

    Ok(Json(BidSnapshot {
        latest_bid,
        highest_bid,
    }))
}

/// `GET /api/lances`
pub async fn list_bids_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<BidList>, ApiError> {
    require_session(&state, &headers, Utc::now()).await?;

    let db = state.db.lock().await;
    let data = db
        .list_all(BidOrder::NewestFirst)
        .map_err(ApiError::store("Failed to fetch bids"))?;

    Ok(Json(BidList { data }))
}

/// `POST /api/admin/login`
pub async fn admin_login_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionGrant>, ApiError> {
    let Json(login) = payload.map_err(|err| ApiError::MalformedPayload(err.body_text()))?;

    if !credentials_match(&state.config, &login.username, &login.password) {
        log::warn!("Rejected admin login for `{}`", login.username);
        return Err(ApiError::InvalidCredentials);
    }

    let now = Utc::now();
    let db = state.db.lock().await;
    if let Err(err) = db.purge_expired_sessions(now) {
        log::warn!("Failed to purge expired sessions: {err}");
    }
    let session = db
        .create_session(&login.username, state.config.session_ttl(), now)
        .map_err(ApiError::store("Failed to create session"))?;

    log::info!("Admin `{}` logged in", session.username);
    Ok(Json(SessionGrant {
        expires_at: session.expires_at_utc(),
        token: session.token,
    }))
}

/// `POST /api/admin/logout`
pub async fn admin_logout_handler(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<MessageBody>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;

    let db = state.db.lock().await;
    db.delete_session(token)
        .map_err(ApiError::store("Failed to end session"))?;

    Ok(Json(MessageBody::new("Logged out")))
}
