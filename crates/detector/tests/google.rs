use std::collections::HashMap;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use detector::{GoogleSearchClient, LookupError, PhraseSearch, SearchConfig};
use serde_json::json;

async fn customsearch(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("key").map(String::as_str) != Some("test-key")
        || params.get("cx").map(String::as_str) != Some("test-cx")
    {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" }))).into_response();
    }
    match params.get("q").map(String::as_str) {
        Some("\"known phrase\"") => Json(json!({
            "items": [
                { "link": "https://first.example/page" },
                { "link": "https://second.example/page" }
            ]
        }))
        .into_response(),
        Some("\"blank link\"") => Json(json!({ "items": [{ "link": "" }] })).into_response(),
        _ => Json(json!({ "searchInformation": { "totalResults": "0" } })).into_response(),
    }
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/customsearch/v1", get(customsearch))
        .route(
            "/broken",
            get(|| async { (StatusCode::OK, "not json at all") }),
        )
        .route(
            "/failing",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    addr
}

fn google_client(addr: SocketAddr, path: &str, api_key: &str) -> GoogleSearchClient {
    GoogleSearchClient::new(SearchConfig {
        base_url: format!("http://{addr}{path}"),
        api_key: api_key.into(),
        search_engine_id: "test-cx".into(),
        timeout_ms: 2_000,
    })
    .expect("valid config")
}

#[tokio::test]
async fn returns_first_result_link() {
    let addr = spawn_stub().await;
    let client = google_client(addr, "/customsearch/v1", "test-key");
    assert_eq!(
        client.find_first_match_url("known phrase").await.as_deref(),
        Some("https://first.example/page")
    );
}

#[tokio::test]
async fn no_items_is_no_match() {
    let addr = spawn_stub().await;
    let client = google_client(addr, "/customsearch/v1", "test-key");
    assert_eq!(client.try_find_first_match_url("unknown words").await, Ok(None));
    assert_eq!(client.find_first_match_url("blank link").await, None);
}

#[tokio::test]
async fn non_success_status_is_reported_and_swallowed() {
    let addr = spawn_stub().await;
    let client = google_client(addr, "/customsearch/v1", "wrong-key");
    assert_eq!(
        client.try_find_first_match_url("known phrase").await,
        Err(LookupError::Status(403))
    );
    assert_eq!(client.find_first_match_url("known phrase").await, None);

    let failing = google_client(addr, "/failing", "test-key");
    assert_eq!(
        failing.try_find_first_match_url("x").await,
        Err(LookupError::Status(500))
    );
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let addr = spawn_stub().await;
    let client = google_client(addr, "/broken", "test-key");
    assert!(matches!(
        client.try_find_first_match_url("x").await,
        Err(LookupError::Decode(_))
    ));
    assert_eq!(client.find_first_match_url("x").await, None);
}

#[tokio::test]
async fn unreachable_provider_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = google_client(addr, "/customsearch/v1", "test-key");
    assert!(matches!(
        client.try_find_first_match_url("x").await,
        Err(LookupError::Http(_))
    ));
    assert_eq!(client.find_first_match_url("x").await, None);
}

#[test]
fn missing_credentials_rejected() {
    assert!(GoogleSearchClient::new(SearchConfig::default()).is_err());
}
