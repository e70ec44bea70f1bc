use axum::{
    Router,
    body::Bytes,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use log::{error, info};
use serde::Serialize;
use serde_json::Value;
use std::net::SocketAddr;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::core::{ValidationError, YearRecord, simulate, validate};

/// Generic failure message for faults that should not happen on a validated
/// request. Deliberately says nothing about the cause.
const FAULT_MESSAGE: &str = "an unexpected error occurred; please try again later";

#[derive(Debug, Serialize)]
struct SimulateResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Vec<YearRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl SimulateResponse {
    fn ok(records: Vec<YearRecord>) -> Self {
        Self {
            success: true,
            data: Some(records),
            error: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    // No auth boundary: preflight permits POST from any origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let app = Router::new()
        .route("/api/simulate", post(simulate_post_handler))
        .fallback(not_found_handler)
        .layer(cors);

    let listener = TcpListener::bind(addr).await?;
    info!("simulation API listening on http://{addr}");

    axum::serve(listener, app).await
}

async fn not_found_handler() -> Response {
    json_response(
        StatusCode::NOT_FOUND,
        SimulateResponse::failed("not found".to_string()),
    )
}

async fn simulate_post_handler(body: Bytes) -> Response {
    let (status, response) = match parse_payload(&body) {
        Ok(payload) => handle_payload(&payload),
        Err(e) => (StatusCode::BAD_REQUEST, SimulateResponse::failed(e.to_string())),
    };
    json_response(status, response)
}

fn parse_payload(body: &[u8]) -> Result<Value, ValidationError> {
    serde_json::from_slice(body).map_err(|_| ValidationError::InvalidRequest)
}

fn handle_payload(payload: &Value) -> (StatusCode, SimulateResponse) {
    let request = match validate(payload) {
        Ok(request) => request,
        Err(e) => {
            // User-input fault, not a system one; reported, never logged.
            return (StatusCode::BAD_REQUEST, SimulateResponse::failed(e.to_string()));
        }
    };

    match catch_unwind(AssertUnwindSafe(|| simulate(&request))) {
        Ok(records) => (StatusCode::OK, SimulateResponse::ok(records)),
        Err(_) => {
            error!("simulation panicked on a validated request");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                SimulateResponse::failed(FAULT_MESSAGE.to_string()),
            )
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, axum::Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        "no-store".parse().expect("valid header"),
    );
    response
}
