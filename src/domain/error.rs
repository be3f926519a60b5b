use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Local failures stay local: validation, signature and parse errors are
/// terminal and never produce an outbound processor call. Processor failures
/// are relayed with the processor's own status and body, never retried here.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { code: &'static str, message: String },
    #[error("webhook signature verification failed")]
    Signature,
    #[error("unrecognized webhook payload")]
    Parse,
    #[error("processor returned status {status}")]
    Processor { status: u16, body: serde_json::Value },
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn validation(code: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { code, message } => {
                (axum::http::StatusCode::BAD_REQUEST, envelope(code, &message)).into_response()
            }
            Self::Signature => (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                envelope("SIGNATURE_REJECTED", "hmac signature verification failed"),
            )
                .into_response(),
            Self::Parse => (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                envelope("UNRECOGNIZED_PAYLOAD", "webhook payload is missing notification items"),
            )
                .into_response(),
            Self::Processor { status, body } => {
                let status = axum::http::StatusCode::from_u16(status)
                    .unwrap_or(axum::http::StatusCode::BAD_GATEWAY);
                (status, Json(body)).into_response()
            }
            Self::Internal(e) => {
                tracing::error!("internal error: {e:#}");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    envelope("INTERNAL_ERROR", "unexpected internal error"),
                )
                    .into_response()
            }
        }
    }
}

fn envelope(code: &str, message: &str) -> Json<ErrorEnvelope> {
    Json(ErrorEnvelope {
        error: ErrorPayload {
            code: code.to_string(),
            message: message.to_string(),
        },
    })
}
