use crate::domain::checkout::{ModificationIntent, ModificationKind, PaymentIntent};
use crate::processor::{ProcessorApi, ProcessorError, ProcessorResult};
use serde::Serialize;
use uuid::Uuid;

/// reqwest-backed client for the processor's checkout API. Authentication is
/// a static API key header; idempotency keys ride on a per-request header.
pub struct CheckoutClient {
    pub base_url: String,
    pub api_key: String,
    pub client: reqwest::Client,
}

impl CheckoutClient {
    async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        idempotency_key: Option<Uuid>,
    ) -> ProcessorResult {
        let mut req = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .header("x-api-key", &self.api_key)
            .json(body);
        if let Some(key) = idempotency_key {
            req = req.header("idempotency-key", key.to_string());
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await.unwrap_or_default());
        }

        Err(ProcessorError::Api {
            status: status.as_u16(),
            body: error_body(resp).await,
        })
    }
}

#[async_trait::async_trait]
impl ProcessorApi for CheckoutClient {
    async fn submit_payment(&self, intent: &PaymentIntent) -> ProcessorResult {
        self.post_json("/payments", intent, Some(intent.idempotency_key)).await
    }

    async fn submit_payment_details(&self, details: &serde_json::Value) -> ProcessorResult {
        self.post_json("/payments/details", details, None).await
    }

    async fn list_payment_methods(&self, merchant_account: &str, shopper_reference: &str) -> ProcessorResult {
        let body = serde_json::json!({
            "merchantAccount": merchant_account,
            "shopperReference": shopper_reference,
        });
        self.post_json("/paymentMethods", &body, None).await
    }

    async fn update_authorized_amount(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.post_json(&modification_path(intent), intent, Some(intent.idempotency_key))
            .await
    }

    async fn capture_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.post_json(&modification_path(intent), intent, Some(intent.idempotency_key))
            .await
    }

    async fn cancel_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.post_json(&modification_path(intent), intent, Some(intent.idempotency_key))
            .await
    }

    async fn refund_captured_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.post_json(&modification_path(intent), intent, Some(intent.idempotency_key))
            .await
    }

    async fn delete_stored_payment_method(
        &self,
        stored_payment_method_id: &str,
        shopper_reference: &str,
        merchant_account: &str,
        idempotency_key: Uuid,
    ) -> Result<(), ProcessorError> {
        let resp = self
            .client
            .delete(format!("{}/storedPaymentMethods/{}", self.base_url, stored_payment_method_id))
            .query(&[
                ("shopperReference", shopper_reference),
                ("merchantAccount", merchant_account),
            ])
            .header("x-api-key", &self.api_key)
            .header("idempotency-key", idempotency_key.to_string())
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        Err(ProcessorError::Api {
            status: status.as_u16(),
            body: error_body(resp).await,
        })
    }
}

fn modification_path(intent: &ModificationIntent) -> String {
    let segment = match intent.kind {
        ModificationKind::Capture => "captures",
        ModificationKind::Cancel => "cancels",
        ModificationKind::Refund => "refunds",
        ModificationKind::AmountAdjust => "amountUpdates",
    };
    format!("/payments/{}/{}", intent.psp_reference, segment)
}

async fn error_body(resp: reqwest::Response) -> serde_json::Value {
    let text = resp.text().await.unwrap_or_default();
    serde_json::from_str(&text).unwrap_or_else(|_| {
        serde_json::json!({ "message": text.chars().take(200).collect::<String>() })
    })
}
