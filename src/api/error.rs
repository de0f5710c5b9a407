use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::common::MessageBody;
use crate::common::validation::FieldError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    #[error("Bid must be higher than the current highest bid ({highest:.2})")]
    BidTooLow { highest: f64 },

    #[error("Auction closed")]
    AuctionClosed,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin session missing or expired")]
    Unauthorized,

    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

impl ApiError {
    /// Wrap a store failure under the generic message returned to callers
    pub fn store(context: &'static str) -> impl FnOnce(rusqlite::Error) -> ApiError {
        move |source| ApiError::Store { context, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedPayload(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::BidTooLow { .. } => StatusCode::CONFLICT,
            ApiError::AuctionClosed => StatusCode::FORBIDDEN,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store { context, source } => log::error!("{context}: {source}"),
            other => log::debug!("Request rejected: {other}"),
        }

        (self.status(), Json(MessageBody::new(self.to_string()))).into_response()
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
