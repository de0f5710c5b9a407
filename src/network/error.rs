use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} ({status})")]
    Status { status: StatusCode, message: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(err) => err.status(),
            ClientError::Status { status, .. } => Some(*status),
        }
    }

    /// Text suitable for showing next to a form
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http(_) => "Could not reach the auction server".to_string(),
            ClientError::Status { message, .. } => message.clone(),
        }
    }
}
