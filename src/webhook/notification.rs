use crate::domain::error::ServiceError;
use crate::domain::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationAmount {
    pub value: i64,
    pub currency: String,
}

/// One entry of the classic notification list, as delivered on the wire.
/// `success` stays the raw wire string because it participates verbatim in
/// the HMAC signing payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequestItem {
    pub psp_reference: String,
    #[serde(default)]
    pub original_reference: Option<String>,
    pub merchant_account_code: String,
    pub merchant_reference: String,
    #[serde(default)]
    pub amount: Option<NotificationAmount>,
    pub event_code: String,
    pub success: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub additional_data: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ItemEnvelope {
    #[serde(rename = "NotificationRequestItem")]
    notification_request_item: NotificationRequestItem,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassicNotification {
    notification_items: Vec<ItemEnvelope>,
}

#[derive(Debug, Deserialize)]
struct ManagementEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: ManagementData,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ManagementData {
    merchant_account: Option<String>,
    shopper_reference: Option<String>,
    stored_payment_method_id: Option<String>,
    #[serde(rename = "type")]
    token_type: Option<String>,
}

/// Recurring-token lifecycle event from the newer typed-event wire shape.
/// Carries no item-level signature, so it bypasses HMAC verification.
#[derive(Debug, Clone)]
pub struct ManagementEvent {
    pub event_type: String,
    pub merchant_account: Option<String>,
    pub shopper_reference: Option<String>,
    pub stored_payment_method_id: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone)]
pub enum WebhookItem {
    Classic(NotificationRequestItem),
    Management(ManagementEvent),
}

const MANAGEMENT_EVENT_PREFIX: &str = "recurring.token.";

/// Decodes a webhook delivery in either wire shape: the classic per-item
/// notification list, or the typed recurring-token event envelope.
pub fn parse_notification(body: &[u8]) -> Result<Vec<WebhookItem>, ServiceError> {
    if let Ok(classic) = serde_json::from_slice::<ClassicNotification>(body) {
        if !classic.notification_items.is_empty() {
            return Ok(classic
                .notification_items
                .into_iter()
                .map(|e| WebhookItem::Classic(e.notification_request_item))
                .collect());
        }
    }

    if let Ok(envelope) = serde_json::from_slice::<ManagementEnvelope>(body) {
        if envelope.event_type.to_lowercase().starts_with(MANAGEMENT_EVENT_PREFIX) {
            return Ok(vec![WebhookItem::Management(ManagementEvent {
                event_type: envelope.event_type,
                merchant_account: envelope.data.merchant_account,
                shopper_reference: envelope.data.shopper_reference,
                stored_payment_method_id: envelope.data.stored_payment_method_id,
                token_type: envelope.data.token_type,
            })]);
        }
    }

    Err(ServiceError::Parse)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSource {
    ClassicItem,
    ManagementEvent,
}

/// Normalized webhook event, the only representation kept after intake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub event_code: String,
    pub success: bool,
    pub merchant_reference: String,
    pub psp_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_payment_method_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_detail_reference: Option<String>,
    pub source: EventSource,
    pub received_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn from_classic(item: &NotificationRequestItem) -> Self {
        // The token can show up under either additionalData key.
        let stored_payment_method_id = item
            .additional_data
            .get("tokenization.storedPaymentMethodId")
            .or_else(|| item.additional_data.get("storedPaymentMethodId"))
            .cloned();

        Self {
            event_code: item.event_code.clone(),
            success: item.success == "true",
            merchant_reference: item.merchant_reference.clone(),
            psp_reference: item.psp_reference.clone(),
            original_reference: item.original_reference.clone(),
            reason: item.reason.clone(),
            amount: item.amount.as_ref().map(|a| Amount::new(&a.currency, a.value)),
            stored_payment_method_id,
            recurring_detail_reference: item.additional_data.get("recurring.recurringDetailReference").cloned(),
            source: EventSource::ClassicItem,
            received_at: Utc::now(),
        }
    }

    pub fn from_management(event: &ManagementEvent) -> Self {
        Self {
            event_code: event.event_type.clone(),
            success: true,
            merchant_reference: String::new(),
            psp_reference: String::new(),
            original_reference: None,
            reason: None,
            amount: None,
            stored_payment_method_id: event.stored_payment_method_id.clone(),
            recurring_detail_reference: None,
            source: EventSource::ManagementEvent,
            received_at: Utc::now(),
        }
    }
}
