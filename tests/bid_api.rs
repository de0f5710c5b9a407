use std::net::SocketAddr;

use auction_bids::api::{ApiState, build_router};
use auction_bids::common::{BidSnapshot, NewBid};
use auction_bids::config::AppConfig;
use auction_bids::network::{ApiClient, ClientError};
use auction_bids::storage::AuctionDatabase;
use chrono::{DateTime, Duration, Utc};
use reqwest::StatusCode;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const ADMIN_PASSWORD: &str = "correct horse";

fn test_config() -> AppConfig {
    AppConfig {
        auction_ends_at: Utc::now() + Duration::days(1),
        admin_username: "admin".to_string(),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        ..AppConfig::default()
    }
}

async fn spawn_server(config: AppConfig) -> SocketAddr {
    let db = AuctionDatabase::in_memory().expect("in-memory store");
    let app = build_router(ApiState::new(config, db));

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn client(addr: SocketAddr) -> ApiClient {
    ApiClient::new(format!("http://{addr}"))
}

fn new_bid(name: &str, amount: f64, timestamp: DateTime<Utc>) -> NewBid {
    NewBid {
        name: name.to_string(),
        contact: "11987654321".to_string(),
        amount,
        timestamp,
    }
}

async fn admin_token(client: &ApiClient) -> String {
    client
        .login("admin", ADMIN_PASSWORD)
        .await
        .expect("admin login")
        .token
}

#[tokio::test]
async fn empty_auction_has_null_latest_and_highest() {
    let addr = spawn_server(test_config()).await;

    let body: Value = reqwest::get(format!("http://{addr}/api/bids"))
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    assert_eq!(body, json!({"latestBid": null, "highestBid": null}));
}

#[tokio::test]
async fn later_higher_bid_is_both_latest_and_highest() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);
    let start = Utc::now() - Duration::minutes(5);

    let ana = api
        .submit_bid(&new_bid("Ana", 150.0, start))
        .await
        .expect("Ana's bid");
    assert_eq!(ana.message, "Bid saved successfully");

    let bob = api
        .submit_bid(&new_bid("Bob", 200.0, start + Duration::minutes(1)))
        .await
        .expect("Bob's bid");

    let snapshot: BidSnapshot = api.fetch_snapshot().await.expect("snapshot");
    assert_eq!(snapshot.highest_bid.as_ref(), Some(&bob.bid));
    assert_eq!(snapshot.latest_bid.as_ref(), Some(&bob.bid));
}

#[tokio::test]
async fn created_bid_appears_in_admin_listing_newest_first() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);
    let start = Utc::now() - Duration::minutes(10);

    for (offset, (name, amount)) in [("Ana", 150.0), ("Bob", 175.5), ("Caio", 300.0)]
        .into_iter()
        .enumerate()
    {
        api.submit_bid(&new_bid(name, amount, start + Duration::minutes(offset as i64)))
            .await
            .expect("bid accepted");
    }

    let token = admin_token(&api).await;
    let bids = api.fetch_all_bids(&token).await.expect("listing");

    let names: Vec<_> = bids.iter().map(|bid| bid.name.as_str()).collect();
    assert_eq!(names, vec!["Caio", "Bob", "Ana"]);
    assert!(bids.windows(2).all(|pair| pair[0].timestamp >= pair[1].timestamp));
}

#[tokio::test]
async fn listing_is_wrapped_in_data() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);
    api.submit_bid(&new_bid("Ana", 150.0, Utc::now()))
        .await
        .expect("bid accepted");
    let token = admin_token(&api).await;

    let body: Value = reqwest::Client::new()
        .get(format!("http://{addr}/api/lances"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    let data = body["data"].as_array().expect("data array");
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["name"], "Ana");
    assert_eq!(data[0]["amount"], 150.0);
}

#[tokio::test]
async fn bid_not_above_highest_is_conflict() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);
    api.submit_bid(&new_bid("Ana", 150.0, Utc::now()))
        .await
        .expect("first bid");

    let err = api
        .submit_bid(&new_bid("Bob", 150.0, Utc::now()))
        .await
        .expect_err("equal bid must be refused");
    assert_eq!(err.status(), Some(StatusCode::CONFLICT));

    let snapshot = api.fetch_snapshot().await.expect("snapshot");
    assert_eq!(snapshot.highest_bid.map(|bid| bid.name), Some("Ana".to_string()));
}

#[tokio::test]
async fn concurrent_equal_bids_place_only_once() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);

    let attempts = (0..8).map(|i| {
        let api = api.clone();
        tokio::spawn(async move {
            api.submit_bid(&new_bid(&format!("bidder-{i}"), 500.0, Utc::now()))
                .await
                .is_ok()
        })
    });

    let mut placed = 0;
    for attempt in attempts {
        if attempt.await.expect("task") {
            placed += 1;
        }
    }
    assert_eq!(placed, 1);
}

#[tokio::test]
async fn amount_string_is_coerced_and_missing_fields_rejected() {
    let addr = spawn_server(test_config()).await;
    let http = reqwest::Client::new();
    let url = format!("http://{addr}/api/bids");

    let ok = http
        .post(&url)
        .json(&json!({
            "name": "Ana",
            "contact": "(11) 98765-4321",
            "amount": "150.00",
            "timestamp": Utc::now().to_rfc3339(),
        }))
        .send()
        .await
        .expect("request");
    assert_eq!(ok.status(), StatusCode::OK);
    let body: Value = ok.json().await.expect("json");
    assert_eq!(body["bid"]["amount"], 150.0);

    let missing = http
        .post(&url)
        .json(&json!({"amount": 999}))
        .send()
        .await
        .expect("request");
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
    let body: Value = missing.json().await.expect("json");
    assert!(body["message"].as_str().is_some_and(|m| m.contains("Name")));

    let malformed = http
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("request");
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn closed_auction_refuses_bids() {
    let config = AppConfig {
        auction_ends_at: Utc::now() - Duration::seconds(1),
        ..test_config()
    };
    let addr = spawn_server(config).await;
    let api = client(addr);

    let err = api
        .submit_bid(&new_bid("Ana", 150.0, Utc::now()))
        .await
        .expect_err("closed auction");
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert!(matches!(err, ClientError::Status { ref message, .. } if message == "Auction closed"));
}

#[tokio::test]
async fn listing_requires_admin_session() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);

    let err = api
        .fetch_all_bids("not-a-session")
        .await
        .expect_err("unknown token");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

    let anonymous = reqwest::get(format!("http://{addr}/api/lances"))
        .await
        .expect("request");
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let err = api
        .login("admin", "wrong")
        .await
        .expect_err("bad password");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn logout_revokes_session() {
    let addr = spawn_server(test_config()).await;
    let api = client(addr);

    let grant = api.login("admin", ADMIN_PASSWORD).await.expect("login");
    assert!(grant.expires_at > Utc::now());
    assert!(api.fetch_all_bids(&grant.token).await.is_ok());

    api.logout(&grant.token).await.expect("logout");
    let err = api
        .fetch_all_bids(&grant.token)
        .await
        .expect_err("revoked session");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
}
