use crate::domain::checkout::{ModificationIntent, PaymentIntent};
use crate::domain::error::ServiceError;
use uuid::Uuid;

pub mod checkout_client;

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("processor returned status {status}")]
    Api { status: u16, body: serde_json::Value },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl From<ProcessorError> for ServiceError {
    fn from(e: ProcessorError) -> Self {
        match e {
            ProcessorError::Api { status, body } => Self::Processor { status, body },
            ProcessorError::Transport(e) => {
                Self::Internal(anyhow::Error::new(e).context("processor call failed in transport"))
            }
        }
    }
}

pub type ProcessorResult = Result<serde_json::Value, ProcessorError>;

/// The processor's checkout API surface. Success payloads are relayed to the
/// caller verbatim, so every operation yields the raw response body. Mutating
/// calls carry the idempotency key from their intent.
#[async_trait::async_trait]
pub trait ProcessorApi: Send + Sync {
    async fn submit_payment(&self, intent: &PaymentIntent) -> ProcessorResult;

    async fn submit_payment_details(&self, details: &serde_json::Value) -> ProcessorResult;

    async fn list_payment_methods(&self, merchant_account: &str, shopper_reference: &str) -> ProcessorResult;

    async fn update_authorized_amount(&self, intent: &ModificationIntent) -> ProcessorResult;

    async fn capture_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult;

    async fn cancel_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult;

    async fn refund_captured_payment(&self, intent: &ModificationIntent) -> ProcessorResult;

    async fn delete_stored_payment_method(
        &self,
        stored_payment_method_id: &str,
        shopper_reference: &str,
        merchant_account: &str,
        idempotency_key: Uuid,
    ) -> Result<(), ProcessorError>;
}
