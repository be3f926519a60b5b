use crate::domain::error::ServiceError;
use crate::webhook::hmac::HmacVerifier;
use crate::webhook::notification::{parse_notification, NotificationEvent, WebhookItem};
use crate::webhook::recent::RecentEventBuffer;
use std::sync::Arc;

/// End-to-end intake for one webhook delivery: parse, verify every classic
/// item, then normalize and record. A delivery is all-or-nothing: one bad
/// signature rejects the batch and nothing from it is recorded.
pub struct WebhookPipeline {
    pub verifier: HmacVerifier,
    pub recent_events: Arc<RecentEventBuffer>,
}

impl WebhookPipeline {
    pub fn ingest(&self, body: &[u8]) -> Result<(), ServiceError> {
        let items = parse_notification(body)?;

        for item in &items {
            if let WebhookItem::Classic(item) = item {
                if !self.verifier.verify(item) {
                    tracing::warn!(
                        psp_reference = %item.psp_reference,
                        event_code = %item.event_code,
                        "rejecting webhook delivery: hmac signature did not verify"
                    );
                    return Err(ServiceError::Signature);
                }
            }
        }

        for item in &items {
            let event = match item {
                WebhookItem::Classic(item) => {
                    let event = NotificationEvent::from_classic(item);
                    tracing::info!(
                        event_code = %event.event_code,
                        success = event.success,
                        merchant_reference = %event.merchant_reference,
                        psp_reference = %event.psp_reference,
                        stored_payment_method_id = event.stored_payment_method_id.as_deref(),
                        "webhook item accepted"
                    );
                    event
                }
                WebhookItem::Management(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        merchant_account = event.merchant_account.as_deref(),
                        shopper_reference = event.shopper_reference.as_deref(),
                        stored_payment_method_id = event.stored_payment_method_id.as_deref(),
                        token_type = event.token_type.as_deref(),
                        "recurring token event accepted"
                    );
                    NotificationEvent::from_management(event)
                }
            };
            self.recent_events.record(event);
        }

        Ok(())
    }
}
