use crate::config::AppConfig;
use crate::domain::checkout::{
    Channel, CreatePaymentRequest, IndustryUsage, ModificationIntent, ModificationKind, ModificationRequest,
    PaymentIntent, RecurringModel, ShopperInteraction, StoredMethodRequest,
};
use crate::domain::error::ServiceError;
use crate::domain::money::{Amount, RawAmount};
use crate::processor::ProcessorApi;
use std::sync::Arc;
use uuid::Uuid;

/// Builds every outbound payment and modification request. Validation happens
/// before any processor call, and each mutating call carries an idempotency
/// key: the caller's when supplied, a fresh one otherwise. A caller retrying
/// the same logical operation must resupply its key, that is the contract
/// that makes retries single-execution.
#[derive(Clone)]
pub struct PaymentService {
    pub config: AppConfig,
    pub processor: Arc<dyn ProcessorApi>,
}

impl PaymentService {
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
        return_url_base: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let payment_method = require_payment_method(req.payment_method)?;
        let amount = self.amount_or_default(req.amount.as_ref(), self.config.default_payment_minor)?;
        let reference = Uuid::new_v4().to_string();

        let intent = PaymentIntent {
            merchant_account: self.config.merchant_account.clone(),
            amount,
            reference: reference.clone(),
            payment_method,
            return_url: Some(redirect_url(return_url_base, &reference)),
            channel: Some(Channel::Web),
            shopper_interaction: ShopperInteraction::Ecommerce,
            recurring_processing_model: None,
            store_payment_method: None,
            shopper_reference: None,
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%reference, "submitting payment");
        Ok(self.processor.submit_payment(&intent).await?)
    }

    /// Zero-auth tokenization: authorizes exactly 0 minor units so no funds
    /// move, while registering a reusable payment-method token for the fixed
    /// shopper. The token itself arrives later via webhook.
    pub async fn create_subscription_setup(
        &self,
        req: CreatePaymentRequest,
        return_url_base: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let payment_method = require_payment_method(req.payment_method)?;
        let reference = Uuid::new_v4().to_string();

        let intent = PaymentIntent {
            merchant_account: self.config.merchant_account.clone(),
            amount: Amount::new(&self.config.default_currency, 0),
            reference: reference.clone(),
            payment_method,
            return_url: Some(redirect_url(return_url_base, &reference)),
            channel: Some(Channel::Web),
            shopper_interaction: ShopperInteraction::Ecommerce,
            recurring_processing_model: Some(RecurringModel::Subscription),
            store_payment_method: Some(true),
            shopper_reference: Some(self.config.shopper_reference.clone()),
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%reference, "submitting zero-auth tokenization");
        Ok(self.processor.submit_payment(&intent).await?)
    }

    /// Charges a previously stored payment method. The shopper is not
    /// present, so the interaction is continued-authorization.
    pub async fn charge_stored_method(&self, req: StoredMethodRequest) -> Result<serde_json::Value, ServiceError> {
        let stored_payment_method_id = require_stored_method_id(req.stored_payment_method_id)?;
        let reference = format!("subscription-payment-{}", Uuid::new_v4());

        let intent = PaymentIntent {
            merchant_account: self.config.merchant_account.clone(),
            amount: Amount::new(&self.config.default_currency, self.config.default_charge_minor),
            reference: reference.clone(),
            payment_method: serde_json::json!({
                "type": "scheme",
                "storedPaymentMethodId": stored_payment_method_id,
            }),
            return_url: None,
            channel: None,
            shopper_interaction: ShopperInteraction::ContinuedAuthentication,
            recurring_processing_model: Some(RecurringModel::Subscription),
            store_payment_method: None,
            shopper_reference: Some(self.config.shopper_reference.clone()),
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%reference, "charging stored payment method");
        Ok(self.processor.submit_payment(&intent).await?)
    }

    pub async fn delete_stored_method(&self, req: StoredMethodRequest) -> Result<(), ServiceError> {
        let stored_payment_method_id = require_stored_method_id(req.stored_payment_method_id)?;

        tracing::info!(
            %stored_payment_method_id,
            shopper_reference = %self.config.shopper_reference,
            "deleting stored payment method"
        );
        self.processor
            .delete_stored_payment_method(
                &stored_payment_method_id,
                &self.config.shopper_reference,
                &self.config.merchant_account,
                idempotency_key(req.idempotency_key),
            )
            .await?;
        Ok(())
    }

    /// An authorization intended to be captured or adjusted later. Honors a
    /// caller-supplied reference so the later modifications can correlate.
    pub async fn preauthorize(
        &self,
        req: CreatePaymentRequest,
        return_url_base: &str,
    ) -> Result<serde_json::Value, ServiceError> {
        let payment_method = require_payment_method(req.payment_method)?;
        let amount = self.amount_or_default(req.amount.as_ref(), self.config.default_preauth_minor)?;
        let reference = match req.reference {
            Some(r) if !r.trim().is_empty() => r,
            _ => Uuid::new_v4().to_string(),
        };

        let intent = PaymentIntent {
            merchant_account: self.config.merchant_account.clone(),
            amount,
            reference: reference.clone(),
            payment_method,
            return_url: Some(redirect_url(return_url_base, &reference)),
            channel: Some(Channel::Web),
            shopper_interaction: ShopperInteraction::Ecommerce,
            recurring_processing_model: Some(RecurringModel::Subscription),
            store_payment_method: None,
            shopper_reference: Some(self.config.shopper_reference.clone()),
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%reference, "submitting preauthorisation");
        Ok(self.processor.submit_payment(&intent).await?)
    }

    pub async fn adjust_authorized_amount(&self, req: ModificationRequest) -> Result<serde_json::Value, ServiceError> {
        let psp_reference = require_psp_reference(req.psp_reference.as_deref())?;
        let amount = Amount::decode(require_amount(req.amount.as_ref())?, Some(0))?;
        let industry_usage = parse_industry_usage(req.industry_usage.as_deref())?;

        let intent = ModificationIntent {
            psp_reference: psp_reference.clone(),
            kind: ModificationKind::AmountAdjust,
            merchant_account: self.config.merchant_account.clone(),
            reference: reference_or("adjust", req.reference),
            amount: Some(amount),
            industry_usage,
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%psp_reference, "adjusting authorised amount");
        Ok(self.processor.update_authorized_amount(&intent).await?)
    }

    pub async fn capture_authorized_payment(
        &self,
        req: ModificationRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        let psp_reference = require_psp_reference(req.psp_reference.as_deref())?;
        let amount = Amount::decode(require_amount(req.amount.as_ref())?, None)?;

        let intent = ModificationIntent {
            psp_reference: psp_reference.clone(),
            kind: ModificationKind::Capture,
            merchant_account: self.config.merchant_account.clone(),
            reference: reference_or("capture", req.reference),
            amount: Some(amount),
            industry_usage: None,
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%psp_reference, "capturing authorised payment");
        Ok(self.processor.capture_authorized_payment(&intent).await?)
    }

    pub async fn cancel_authorized_payment(&self, req: ModificationRequest) -> Result<serde_json::Value, ServiceError> {
        let psp_reference = require_psp_reference(req.psp_reference.as_deref())?;

        let intent = ModificationIntent {
            psp_reference: psp_reference.clone(),
            kind: ModificationKind::Cancel,
            merchant_account: self.config.merchant_account.clone(),
            reference: reference_or("cancel", req.reference),
            amount: None,
            industry_usage: None,
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%psp_reference, "cancelling authorised payment");
        Ok(self.processor.cancel_authorized_payment(&intent).await?)
    }

    pub async fn refund_captured_payment(&self, req: ModificationRequest) -> Result<serde_json::Value, ServiceError> {
        let psp_reference = require_psp_reference(req.psp_reference.as_deref())?;
        let amount = Amount::decode(require_amount(req.amount.as_ref())?, None)?;

        let intent = ModificationIntent {
            psp_reference: psp_reference.clone(),
            kind: ModificationKind::Refund,
            merchant_account: self.config.merchant_account.clone(),
            reference: reference_or("refund", req.reference),
            amount: Some(amount),
            industry_usage: None,
            idempotency_key: idempotency_key(req.idempotency_key),
        };

        tracing::info!(%psp_reference, "refunding captured payment");
        Ok(self.processor.refund_captured_payment(&intent).await?)
    }

    pub async fn list_payment_methods(&self) -> Result<serde_json::Value, ServiceError> {
        Ok(self
            .processor
            .list_payment_methods(&self.config.merchant_account, &self.config.shopper_reference)
            .await?)
    }

    pub async fn submit_payment_details(&self, details: serde_json::Value) -> Result<serde_json::Value, ServiceError> {
        Ok(self.processor.submit_payment_details(&details).await?)
    }

    fn amount_or_default(&self, raw: Option<&RawAmount>, default_minor: i64) -> Result<Amount, ServiceError> {
        match raw {
            Some(raw) => Amount::decode(raw, Some(default_minor)),
            None => Ok(Amount::new(&self.config.default_currency, default_minor)),
        }
    }
}

fn idempotency_key(supplied: Option<Uuid>) -> Uuid {
    supplied.unwrap_or_else(Uuid::new_v4)
}

fn redirect_url(return_url_base: &str, reference: &str) -> String {
    format!("{return_url_base}/handleShopperRedirect?orderRef={reference}")
}

fn reference_or(prefix: &str, supplied: Option<String>) -> String {
    match supplied {
        Some(r) if !r.trim().is_empty() => r,
        _ => format!("{prefix}-{}", Uuid::new_v4()),
    }
}

fn require_payment_method(method: Option<serde_json::Value>) -> Result<serde_json::Value, ServiceError> {
    match method {
        Some(m) if !m.is_null() => Ok(m),
        _ => Err(ServiceError::validation(
            "PAYMENT_METHOD_MISSING",
            "paymentMethod details are required",
        )),
    }
}

fn require_stored_method_id(id: Option<String>) -> Result<String, ServiceError> {
    match id {
        Some(id) if !id.trim().is_empty() => Ok(id),
        _ => Err(ServiceError::validation(
            "STORED_PAYMENT_METHOD_ID_MISSING",
            "storedPaymentMethodId is required",
        )),
    }
}

fn require_psp_reference(psp_reference: Option<&str>) -> Result<String, ServiceError> {
    match psp_reference {
        Some(r) if !r.trim().is_empty() => Ok(r.to_string()),
        _ => Err(ServiceError::validation(
            "PSP_REFERENCE_MISSING",
            "pspReference is required",
        )),
    }
}

fn require_amount(raw: Option<&RawAmount>) -> Result<&RawAmount, ServiceError> {
    raw.ok_or_else(|| ServiceError::validation("AMOUNT_MISSING", "amount is required"))
}

fn parse_industry_usage(value: Option<&str>) -> Result<Option<IndustryUsage>, ServiceError> {
    match value {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => IndustryUsage::parse(s).map(Some).ok_or_else(|| {
            ServiceError::validation("INVALID_INDUSTRY_USAGE", format!("invalid industryUsage {s:?}"))
        }),
    }
}
