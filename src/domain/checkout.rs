use crate::domain::money::{Amount, RawAmount};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize)]
pub enum Channel {
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShopperInteraction {
    Ecommerce,
    #[serde(rename = "ContAuth")]
    ContinuedAuthentication,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub enum RecurringModel {
    Subscription,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IndustryUsage {
    #[serde(rename = "delayedCharge")]
    DelayedCharge,
    #[serde(rename = "noShow")]
    NoShow,
}

impl IndustryUsage {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delayedCharge" => Some(Self::DelayedCharge),
            "noShow" => Some(Self::NoShow),
            _ => None,
        }
    }
}

/// One outbound authorization attempt. Serializes as the processor's
/// `/payments` body; the idempotency key travels as a header, not in the body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub merchant_account: String,
    pub amount: Amount,
    pub reference: String,
    pub payment_method: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    pub shopper_interaction: ShopperInteraction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_processing_model: Option<RecurringModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_payment_method: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shopper_reference: Option<String>,
    #[serde(skip)]
    pub idempotency_key: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationKind {
    Capture,
    Cancel,
    Refund,
    AmountAdjust,
}

/// One modification of a prior authorization held by the processor. The psp
/// reference addresses the authorization in the URL path; the serialized body
/// carries the rest. Amount is present iff the kind requires one.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationIntent {
    #[serde(skip)]
    pub psp_reference: String,
    #[serde(skip)]
    pub kind: ModificationKind,
    pub merchant_account: String,
    pub reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_usage: Option<IndustryUsage>,
    #[serde(skip)]
    pub idempotency_key: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub payment_method: Option<serde_json::Value>,
    pub amount: Option<RawAmount>,
    pub reference: Option<String>,
    pub idempotency_key: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMethodRequest {
    pub stored_payment_method_id: Option<String>,
    pub idempotency_key: Option<Uuid>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRequest {
    pub psp_reference: Option<String>,
    pub amount: Option<RawAmount>,
    pub reference: Option<String>,
    pub industry_usage: Option<String>,
    pub idempotency_key: Option<Uuid>,
}
