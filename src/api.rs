use std::{collections::HashMap, sync::Arc};

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::Config,
    dispatcher::Dispatcher,
    models::{
        firestore::DocumentEventData,
        health::{HealthCheckResponse, HealthStatus},
        response::{ApiResponse, DeliveryReceipt},
    },
};

pub struct AppState {
    pub dispatcher: Dispatcher,
    pub collection: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/events/reservations", post(reservation_created))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: &Config, dispatcher: Dispatcher) -> Result<(), Error> {
    let state = Arc::new(AppState {
        dispatcher,
        collection: config.reservations_collection.clone(),
    });

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Reservation trigger server started");

    axum::serve(listener, router(state)).await?;

    Ok(())
}

async fn reservation_created(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DocumentEventData>,
) -> Response {
    let created = match event.into_reservation(&state.collection) {
        Ok(created) => created,
        Err(e) => {
            warn!(error = %e, "Rejected reservation event");
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(
                    e.to_string(),
                    "Invalid reservation event".to_string(),
                )),
            )
                .into_response();
        }
    };

    match state.dispatcher.on_reservation_created(&created).await {
        Ok(message_id) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                DeliveryReceipt {
                    reservation_id: created.reservation_id,
                    message_id,
                },
                "Notification sent".to_string(),
            )),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(
                e.to_string(),
                "Notification delivery failed".to_string(),
            )),
        )
            .into_response(),
    }
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let checks = HashMap::from([("fcm".to_string(), state.dispatcher.sink_health().await)]);
    let health = HealthCheckResponse::from_checks(checks);

    let status_code = match health.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}
