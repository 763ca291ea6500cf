use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use reservation_notifier::{
    api::{AppState, router},
    dispatcher::Dispatcher,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::common::{RecordingSink, settings};

fn app(sink: Arc<RecordingSink>) -> Router {
    router(Arc::new(AppState {
        dispatcher: Dispatcher::new(sink, settings()),
        collection: "reservas".to_string(),
    }))
}

async fn post_event(app: Router, event: Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/events/reservations")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&event)?))?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;

    Ok((status, serde_json::from_slice(&body)?))
}

/// Test: A created reservation is dispatched and acknowledged
#[tokio::test]
async fn test_created_reservation_is_dispatched() -> Result<()> {
    let sink = Arc::new(RecordingSink::accepting());

    let (status, body) = post_event(
        app(sink.clone()),
        json!({
            "value": {
                "name": "projects/p/databases/(default)/documents/reservas/r1",
                "fields": {
                    "nombreCliente": { "stringValue": "Ana" },
                    "pax": { "integerValue": "2" },
                    "turno": { "stringValue": "noche" },
                    "fechaReserva": { "timestampValue": "2025-08-04T14:00:00Z" }
                }
            }
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["reservation_id"], "r1");
    assert_eq!(body["data"]["message_id"], "projects/demo/messages/1");

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(
        sent[0].notification.body,
        "Cliente: Ana (2 pax, noche, lun., 04 ago. 2025)"
    );

    Ok(())
}

/// Test: Delivery failures are reported as a failed invocation
#[tokio::test]
async fn test_delivery_failure_returns_server_error() -> Result<()> {
    let sink = Arc::new(RecordingSink::failing("sink unreachable"));

    let (status, body) = post_event(
        app(sink),
        json!({
            "value": {
                "name": "projects/p/databases/(default)/documents/reservas/r2",
                "fields": {}
            }
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "sink unreachable");

    Ok(())
}

/// Test: Events for other documents are rejected without sending
#[tokio::test]
async fn test_foreign_document_is_rejected() -> Result<()> {
    let sink = Arc::new(RecordingSink::accepting());

    let (status, body) = post_event(
        app(sink.clone()),
        json!({
            "value": {
                "name": "projects/p/databases/(default)/documents/clientes/c1",
                "fields": {}
            }
        }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(sink.sent().is_empty());

    Ok(())
}

/// Test: Health mirrors the delivery backend's health
#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let healthy = app(Arc::new(RecordingSink::accepting()))
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(healthy.status(), StatusCode::OK);

    let unhealthy = app(Arc::new(RecordingSink::failing("no credentials")))
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;
    assert_eq!(unhealthy.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = to_bytes(unhealthy.into_body(), usize::MAX).await?;
    let body: Value = serde_json::from_slice(&body)?;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["checks"]["fcm"]["error"], "no credentials");

    Ok(())
}
