// End-to-end checks of the HTTP surface on an ephemeral port.

use super::support::*;
use serde_json::{Value, json};
use spaces_backend::{AppState, config::Config, db::DbStore, routes};
use std::net::TcpListener;
use std::sync::Arc;

fn test_config() -> Config {
    Config {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        allowed_origin: Some(TEST_ORIGIN.to_string()),
        ..Config::default()
    }
}

async fn spawn_app(config: Config, store: Arc<RecordingStore>) -> String {
    let store: DbStore = store;
    let state = Arc::new(AppState::new(config, store).unwrap());
    let app = routes::create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    format!("http://{}", addr)
}

#[tokio::test]
async fn health_check() {
    let base = spawn_app(test_config(), Arc::new(RecordingStore::new())).await;

    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn request_id_is_echoed() {
    let base = spawn_app(test_config(), Arc::new(RecordingStore::new())).await;

    let resp = reqwest::Client::new()
        .get(format!("{}/health", base))
        .header("x-request-id", "req-42")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn spaces_require_a_valid_token() {
    let store = Arc::new(RecordingStore::new());
    let base = spawn_app(test_config(), store.clone()).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{}/spaces", base)).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = client
        .get(format!("{}/spaces", base))
        .bearer_auth("not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn create_then_read_over_http() {
    let base = spawn_app(test_config(), Arc::new(RecordingStore::new())).await;
    let client = reqwest::Client::new();
    let token = create_test_jwt(json!({"sub": "user-1", "cognito:groups": ["users"]}));

    let resp = client
        .post(format!("{}/spaces", base))
        .bearer_auth(&token)
        .header("origin", TEST_ORIGIN)
        .body(r#"{"location":"Paris","ward":"1er"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    assert_eq!(resp.headers()["access-control-allow-origin"], TEST_ORIGIN);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let created: Value = resp.json().await.unwrap();
    let id = created["spaceId"].as_str().unwrap().to_string();

    let resp = client
        .get(format!("{}/spaces?id={}", base, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let item: Value = resp.json().await.unwrap();
    assert_eq!(item, json!({"id": id, "location": "Paris", "ward": "1er"}));
}

#[tokio::test]
async fn non_utf8_body_gets_json_answer() {
    let store = Arc::new(RecordingStore::new());
    let base = spawn_app(test_config(), store.clone()).await;
    let token = create_test_jwt(json!({"sub": "user-1"}));

    let resp = reqwest::Client::new()
        .post(format!("{}/spaces", base))
        .bearer_auth(token)
        .header("origin", TEST_ORIGIN)
        .body(vec![0xffu8, 0xfe])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert_eq!(resp.headers()["content-type"], "application/json");
    assert_eq!(
        resp.headers()["access-control-allow-methods"],
        "GET, POST, PUT, DELETE, OPTIONS"
    );
    assert!(resp.headers().contains_key("access-control-allow-headers"));
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Invalid JSON in request body"}));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn delete_checks_groups_claim() {
    let store = Arc::new(RecordingStore::with_items(vec![
        json!({"id": "abc", "location": "Paris", "ward": "1er"}),
    ]));
    let base = spawn_app(test_config(), store.clone()).await;
    let client = reqwest::Client::new();

    let user = create_test_jwt(json!({"sub": "user-1", "cognito:groups": ["users"]}));
    let resp = client
        .delete(format!("{}/spaces?id=abc", base))
        .bearer_auth(user)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let admin = create_test_jwt(json!({"sub": "admin-1", "cognito:groups": "admins"}));
    let resp = client
        .delete(format!("{}/spaces?id=abc", base))
        .bearer_auth(admin)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(store.calls(), vec![StoreCall::Delete("abc".into())]);
}

#[tokio::test]
async fn preflight_is_answered_without_token() {
    let base = spawn_app(test_config(), Arc::new(RecordingStore::new())).await;

    let resp = reqwest::Client::new()
        .request(reqwest::Method::OPTIONS, format!("{}/spaces", base))
        .header("origin", TEST_ORIGIN)
        .header("access-control-request-method", "DELETE")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["access-control-allow-origin"], TEST_ORIGIN);
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
}

#[tokio::test]
async fn missing_origin_configuration_fails_requests() {
    let config = Config {
        allowed_origin: None,
        cloudfront_domain: None,
        ..test_config()
    };
    let base = spawn_app(config, Arc::new(RecordingStore::new())).await;
    let token = create_test_jwt(json!({"sub": "user-1"}));

    let resp = reqwest::Client::new()
        .get(format!("{}/spaces", base))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Configuration error"}));
}
