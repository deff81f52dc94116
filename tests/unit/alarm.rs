use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde_json::{Value, json};
use spaces_backend::services::alarm_service::{AlarmError, AlarmEvent};
use spaces_backend::services::AlarmForwarder;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

type Received = Arc<Mutex<Vec<Value>>>;

async fn record(State(received): State<Received>, Json(body): Json<Value>) -> StatusCode {
    received.lock().unwrap().push(body);
    StatusCode::OK
}

async fn reject() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Local webhook receiver that keeps every posted body.
fn spawn_webhook() -> (String, Received) {
    let received: Received = Arc::default();
    let app = Router::new()
        .route("/hook", post(record))
        .route("/broken", post(reject))
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service())
            .await
            .unwrap();
    });
    (format!("http://{}", addr), received)
}

fn event(messages: &[&str]) -> AlarmEvent {
    let records: Vec<Value> = messages
        .iter()
        .map(|m| json!({"Sns": {"Message": m, "Subject": "ALARM"}}))
        .collect();
    serde_json::from_value(json!({ "Records": records })).unwrap()
}

#[tokio::test]
async fn forwards_each_record_in_order() {
    let (base, received) = spawn_webhook();
    let forwarder = AlarmForwarder::new(format!("{}/hook", base));

    let delivered =
        tokio_test::assert_ok!(forwarder.forward(&event(&["5xx errors", "latency p99"])).await);
    assert_eq!(delivered, 2);
    assert_eq!(
        *received.lock().unwrap(),
        vec![
            json!({"text": "Huston, we have a problem: 5xx errors"}),
            json!({"text": "Huston, we have a problem: latency p99"}),
        ]
    );
}

#[tokio::test]
async fn empty_event_posts_nothing() {
    let (base, received) = spawn_webhook();
    let forwarder = AlarmForwarder::new(format!("{}/hook", base));

    assert_eq!(forwarder.forward(&AlarmEvent::default()).await.unwrap(), 0);
    assert!(received.lock().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_delivery_is_an_error() {
    let (base, _) = spawn_webhook();
    let forwarder = AlarmForwarder::new(format!("{}/broken", base));

    let err = tokio_test::assert_err!(forwarder.forward(&event(&["disk full"])).await);
    assert!(matches!(err, AlarmError::Rejected(500)));
}
