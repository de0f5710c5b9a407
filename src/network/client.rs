use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::common::{
    Bid, BidCreated, BidList, BidSnapshot, LoginRequest, MessageBody, NewBid, SessionGrant,
};

use super::error::ClientError;

/// Typed wrapper over the bid API endpoints.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_snapshot(&self) -> Result<BidSnapshot, ClientError> {
        let response = self.http.get(self.url("/api/bids")).send().await?;
        decode(response).await
    }

    pub async fn submit_bid(&self, bid: &NewBid) -> Result<BidCreated, ClientError> {
        let response = self
            .http
            .post(self.url("/api/bids"))
            .json(bid)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<SessionGrant, ClientError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/admin/login"))
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.url("/api/admin/logout"))
            .bearer_auth(token)
            .send()
            .await?;
        decode::<MessageBody>(response).await.map(|_| ())
    }

    pub async fn fetch_all_bids(&self, token: &str) -> Result<Vec<Bid>, ClientError> {
        let response = self
            .http
            .get(self.url("/api/lances"))
            .bearer_auth(token)
            .send()
            .await?;
        decode::<BidList>(response).await.map(|list| list.data)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let message = match response.json::<MessageBody>().await {
        Ok(body) => body.message,
        Err(_) => fallback_message(status),
    };
    Err(ClientError::Status { status, message })
}

fn fallback_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unexpected response")
        .to_string()
}
