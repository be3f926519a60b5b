use crate::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn ingest(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match state.webhook_pipeline.ingest(&body) {
        Ok(()) => (axum::http::StatusCode::OK, "[accepted]").into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn recent(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.webhook_pipeline.recent_events.snapshot())
}
