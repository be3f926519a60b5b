use crate::domain::checkout::ModificationRequest;
use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn modify_amount(
    State(state): State<AppState>,
    Json(req): Json<ModificationRequest>,
) -> impl IntoResponse {
    match state.payment_service.adjust_authorized_amount(req).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn capture(State(state): State<AppState>, Json(req): Json<ModificationRequest>) -> impl IntoResponse {
    match state.payment_service.capture_authorized_payment(req).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn cancel(State(state): State<AppState>, Json(req): Json<ModificationRequest>) -> impl IntoResponse {
    match state.payment_service.cancel_authorized_payment(req).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn refund(State(state): State<AppState>, Json(req): Json<ModificationRequest>) -> impl IntoResponse {
    match state.payment_service.refund_captured_payment(req).await {
        Ok(body) => (axum::http::StatusCode::OK, Json(body)).into_response(),
        Err(e) => e.into_response(),
    }
}
