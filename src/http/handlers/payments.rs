use crate::domain::checkout::{CreatePaymentRequest, StoredMethodRequest};
use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

pub async fn create_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    match state.payment_service.create_payment(req, &return_url_base(&headers)).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn subscription_create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    match state
        .payment_service
        .create_subscription_setup(req, &return_url_base(&headers))
        .await
    {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn subscription_payment(
    State(state): State<AppState>,
    Json(req): Json<StoredMethodRequest>,
) -> impl IntoResponse {
    match state.payment_service.charge_stored_method(req).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn subscription_cancel(
    State(state): State<AppState>,
    Json(req): Json<StoredMethodRequest>,
) -> impl IntoResponse {
    match state.payment_service.delete_stored_method(req).await {
        Ok(()) => axum::http::StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn preauthorisation(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreatePaymentRequest>,
) -> impl IntoResponse {
    match state.payment_service.preauthorize(req, &return_url_base(&headers)).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn payment_methods(State(state): State<AppState>) -> impl IntoResponse {
    match state.payment_service.list_payment_methods().await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn payment_details(
    State(state): State<AppState>,
    Json(details): Json<serde_json::Value>,
) -> impl IntoResponse {
    match state.payment_service.submit_payment_details(details).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

// Where the shopper lands after the processor's redirect flow; mirrors the
// scheme-and-host the inbound request arrived on.
fn return_url_base(headers: &HeaderMap) -> String {
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:8080");
    format!("http://{host}")
}
