//! JSON-over-HTTP transport for the EDI service
//!
//! Domain status travels in the response body; the HTTP status only
//! separates rejected requests (400) and internal failures (500) from
//! everything else.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use edi_pipeline::{
    EdiService, ProcessMessageRequest, ProcessMessageResponse, ProcessingStatus,
    SupportedTypesResponse, ValidateMessageRequest, ValidateMessageResponse,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServiceConfig;

#[derive(Debug, Deserialize)]
struct TypesQuery {
    customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Build the router for a service
pub fn router(service: EdiService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/messages/process", post(process_message))
        .route("/v1/messages/validate", post(validate_message))
        .route("/v1/message-types", get(message_types))
        .with_state(service)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn serve(config: &ServiceConfig) -> anyhow::Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;

    info!(address = %address, workers = config.max_workers, "Starting EDI service");

    axum::serve(listener, router(EdiService::default()))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("EDI service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down EDI service");
    }
}

fn transport_status(status: ProcessingStatus) -> StatusCode {
    match status {
        ProcessingStatus::UnsupportedMessageType => StatusCode::BAD_REQUEST,
        ProcessingStatus::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::OK,
    }
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn process_message(
    State(service): State<EdiService>,
    Json(request): Json<ProcessMessageRequest>,
) -> (StatusCode, Json<ProcessMessageResponse>) {
    let response = service.process_message(&request);
    (transport_status(response.status), Json(response))
}

async fn validate_message(
    State(service): State<EdiService>,
    Json(request): Json<ValidateMessageRequest>,
) -> (StatusCode, Json<ValidateMessageResponse>) {
    let response = service.validate_message(&request);
    (transport_status(response.status), Json(response))
}

async fn message_types(
    State(service): State<EdiService>,
    Query(query): Query<TypesQuery>,
) -> Json<SupportedTypesResponse> {
    Json(service.supported_types(query.customer_id.as_deref()))
}
