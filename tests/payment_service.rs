use checkout_service::config::AppConfig;
use checkout_service::domain::checkout::{
    CreatePaymentRequest, ModificationIntent, ModificationRequest, PaymentIntent, StoredMethodRequest,
};
use checkout_service::domain::error::ServiceError;
use checkout_service::domain::money::RawAmount;
use checkout_service::processor::{ProcessorApi, ProcessorError, ProcessorResult};
use checkout_service::service::payment_service::PaymentService;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[tokio::test]
async fn payment_defaults_amount_and_generates_reference() {
    let (service, mock) = service();
    let req = CreatePaymentRequest {
        payment_method: Some(serde_json::json!({"type": "scheme"})),
        ..Default::default()
    };

    service.create_payment(req, "http://localhost:8080").await.unwrap();

    let (body, _) = mock.last_payment();
    assert_eq!(body["amount"], serde_json::json!({"currency": "EUR", "value": 9998}));
    assert_eq!(body["channel"], "Web");
    assert_eq!(body["shopperInteraction"], "Ecommerce");
    let reference = body["reference"].as_str().unwrap();
    assert_eq!(
        body["returnUrl"].as_str().unwrap(),
        format!("http://localhost:8080/handleShopperRedirect?orderRef={reference}")
    );
}

#[tokio::test]
async fn payment_without_method_is_rejected_locally() {
    let (service, mock) = service();

    let err = service
        .create_payment(CreatePaymentRequest::default(), "http://localhost:8080")
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.payment_count(), 0);
}

#[tokio::test]
async fn subscription_setup_is_a_zero_auth_tokenization() {
    let (service, mock) = service();
    let req = CreatePaymentRequest {
        payment_method: Some(serde_json::json!({"type": "scheme"})),
        ..Default::default()
    };

    service
        .create_subscription_setup(req, "http://localhost:8080")
        .await
        .unwrap();

    let (body, _) = mock.last_payment();
    assert_eq!(body["amount"]["value"], 0);
    assert_eq!(body["storePaymentMethod"], true);
    assert_eq!(body["recurringProcessingModel"], "Subscription");
    assert_eq!(body["shopperInteraction"], "Ecommerce");
    assert_eq!(body["shopperReference"], "shopper-primary");
}

#[tokio::test]
async fn stored_charge_runs_as_continued_authorization() {
    let (service, mock) = service();
    let req = StoredMethodRequest {
        stored_payment_method_id: Some("TOKEN123".to_string()),
        idempotency_key: None,
    };

    service.charge_stored_method(req).await.unwrap();

    let (body, _) = mock.last_payment();
    assert_eq!(body["shopperInteraction"], "ContAuth");
    assert_eq!(body["recurringProcessingModel"], "Subscription");
    assert_eq!(body["paymentMethod"]["storedPaymentMethodId"], "TOKEN123");
    assert_eq!(body["amount"], serde_json::json!({"currency": "EUR", "value": 500}));
    assert!(body["reference"].as_str().unwrap().starts_with("subscription-payment-"));
}

#[tokio::test]
async fn blank_stored_method_id_is_rejected_locally() {
    let (service, mock) = service();
    let req = StoredMethodRequest {
        stored_payment_method_id: Some("  ".to_string()),
        idempotency_key: None,
    };

    let err = service.charge_stored_method(req).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.payment_count(), 0);
}

#[tokio::test]
async fn delete_without_id_never_reaches_the_processor() {
    let (service, mock) = service();

    let err = service
        .delete_stored_method(StoredMethodRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.delete_count(), 0);
}

#[tokio::test]
async fn preauthorization_honors_caller_reference() {
    let (service, mock) = service();
    let req = CreatePaymentRequest {
        payment_method: Some(serde_json::json!({"type": "scheme"})),
        reference: Some("booking-77".to_string()),
        ..Default::default()
    };

    service.preauthorize(req, "http://localhost:8080").await.unwrap();

    let (body, _) = mock.last_payment();
    assert_eq!(body["reference"], "booking-77");
    assert_eq!(body["amount"]["value"], 4999);
}

#[tokio::test]
async fn adjust_with_unknown_industry_usage_is_rejected_locally() {
    let (service, mock) = service();
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        amount: Some(raw_amount(500)),
        industry_usage: Some("ecommerce".to_string()),
        ..Default::default()
    };

    let err = service.adjust_authorized_amount(req).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.modification_count(), 0);
}

#[tokio::test]
async fn adjust_forwards_known_industry_usage() {
    let (service, mock) = service();
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        amount: Some(raw_amount(500)),
        industry_usage: Some("delayedCharge".to_string()),
        ..Default::default()
    };

    service.adjust_authorized_amount(req).await.unwrap();

    let (op, psp_reference, body, _) = mock.last_modification();
    assert_eq!(op, "amount_update");
    assert_eq!(psp_reference, "psp123");
    assert_eq!(body["industryUsage"], "delayedCharge");
    assert_eq!(body["amount"]["value"], 500);
}

#[tokio::test]
async fn capture_requires_an_amount() {
    let (service, mock) = service();
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        ..Default::default()
    };

    let err = service.capture_authorized_payment(req).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.modification_count(), 0);
}

#[tokio::test]
async fn cancel_requires_only_the_psp_reference() {
    let (service, mock) = service();
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        ..Default::default()
    };

    service.cancel_authorized_payment(req).await.unwrap();

    let (op, psp_reference, body, _) = mock.last_modification();
    assert_eq!(op, "cancel");
    assert_eq!(psp_reference, "psp123");
    assert!(body.get("amount").is_none());
    assert!(body["reference"].as_str().unwrap().starts_with("cancel-"));
}

#[tokio::test]
async fn refund_without_psp_reference_is_rejected_locally() {
    let (service, mock) = service();
    let req = ModificationRequest {
        amount: Some(raw_amount(500)),
        ..Default::default()
    };

    let err = service.refund_captured_payment(req).await.unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert_eq!(mock.modification_count(), 0);
}

#[tokio::test]
async fn supplied_idempotency_key_is_forwarded_verbatim() {
    let (service, mock) = service();
    let key = Uuid::new_v4();
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        amount: Some(raw_amount(500)),
        idempotency_key: Some(key),
        ..Default::default()
    };

    service.capture_authorized_payment(req).await.unwrap();

    let (_, _, _, seen) = mock.last_modification();
    assert_eq!(seen, key);
}

#[tokio::test]
async fn absent_idempotency_key_is_fresh_per_attempt() {
    let (service, mock) = service();
    for _ in 0..2 {
        let req = ModificationRequest {
            psp_reference: Some("psp123".to_string()),
            amount: Some(raw_amount(500)),
            ..Default::default()
        };
        service.capture_authorized_payment(req).await.unwrap();
    }

    let keys = mock.modification_keys();
    assert_eq!(keys.len(), 2);
    assert_ne!(keys[0], keys[1]);
}

#[tokio::test]
async fn processor_failure_is_relayed_with_its_status() {
    let (mut service, _) = service();
    service.processor = Arc::new(FailingProcessor);
    let req = ModificationRequest {
        psp_reference: Some("psp123".to_string()),
        amount: Some(raw_amount(500)),
        ..Default::default()
    };

    let err = service.capture_authorized_payment(req).await.unwrap_err();

    match err {
        ServiceError::Processor { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body["errorCode"], "167");
        }
        other => panic!("expected processor error, got {other:?}"),
    }
}

fn service() -> (PaymentService, Arc<MockProcessor>) {
    let mock = Arc::new(MockProcessor::default());
    let service = PaymentService {
        config: config(),
        processor: Arc::clone(&mock) as Arc<dyn ProcessorApi>,
    };
    (service, mock)
}

fn config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        processor_base_url: "http://processor.test".to_string(),
        processor_api_key: "test-key".to_string(),
        merchant_account: "TestMerchant".to_string(),
        hmac_key_hex: "00".to_string(),
        shopper_reference: "shopper-primary".to_string(),
        default_currency: "EUR".to_string(),
        default_payment_minor: 9998,
        default_charge_minor: 500,
        default_preauth_minor: 4999,
    }
}

fn raw_amount(value: i64) -> RawAmount {
    RawAmount {
        currency: Some("EUR".to_string()),
        value: Some(serde_json::json!(value)),
    }
}

#[derive(Default)]
struct MockProcessor {
    payments: Mutex<Vec<(serde_json::Value, Uuid)>>,
    modifications: Mutex<Vec<(String, String, serde_json::Value, Uuid)>>,
    deletes: Mutex<Vec<(String, Uuid)>>,
}

impl MockProcessor {
    fn last_payment(&self) -> (serde_json::Value, Uuid) {
        self.payments.lock().unwrap().last().unwrap().clone()
    }

    fn payment_count(&self) -> usize {
        self.payments.lock().unwrap().len()
    }

    fn last_modification(&self) -> (String, String, serde_json::Value, Uuid) {
        self.modifications.lock().unwrap().last().unwrap().clone()
    }

    fn modification_count(&self) -> usize {
        self.modifications.lock().unwrap().len()
    }

    fn modification_keys(&self) -> Vec<Uuid> {
        self.modifications.lock().unwrap().iter().map(|m| m.3).collect()
    }

    fn delete_count(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }

    fn record_modification(&self, op: &str, intent: &ModificationIntent) {
        self.modifications.lock().unwrap().push((
            op.to_string(),
            intent.psp_reference.clone(),
            serde_json::to_value(intent).unwrap(),
            intent.idempotency_key,
        ));
    }
}

#[async_trait::async_trait]
impl ProcessorApi for MockProcessor {
    async fn submit_payment(&self, intent: &PaymentIntent) -> ProcessorResult {
        self.payments
            .lock()
            .unwrap()
            .push((serde_json::to_value(intent).unwrap(), intent.idempotency_key));
        Ok(serde_json::json!({"resultCode": "Authorised", "pspReference": "PSP123"}))
    }

    async fn submit_payment_details(&self, _details: &serde_json::Value) -> ProcessorResult {
        Ok(serde_json::json!({"resultCode": "Authorised"}))
    }

    async fn list_payment_methods(&self, _merchant_account: &str, _shopper_reference: &str) -> ProcessorResult {
        Ok(serde_json::json!({"paymentMethods": []}))
    }

    async fn update_authorized_amount(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.record_modification("amount_update", intent);
        Ok(serde_json::json!({"status": "received"}))
    }

    async fn capture_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.record_modification("capture", intent);
        Ok(serde_json::json!({"status": "received"}))
    }

    async fn cancel_authorized_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.record_modification("cancel", intent);
        Ok(serde_json::json!({"status": "received"}))
    }

    async fn refund_captured_payment(&self, intent: &ModificationIntent) -> ProcessorResult {
        self.record_modification("refund", intent);
        Ok(serde_json::json!({"status": "received"}))
    }

    async fn delete_stored_payment_method(
        &self,
        stored_payment_method_id: &str,
        _shopper_reference: &str,
        _merchant_account: &str,
        idempotency_key: Uuid,
    ) -> Result<(), ProcessorError> {
        self.deletes
            .lock()
            .unwrap()
            .push((stored_payment_method_id.to_string(), idempotency_key));
        Ok(())
    }
}

struct FailingProcessor;

#[async_trait::async_trait]
impl ProcessorApi for FailingProcessor {
    async fn submit_payment(&self, _intent: &PaymentIntent) -> ProcessorResult {
        Err(api_error())
    }

    async fn submit_payment_details(&self, _details: &serde_json::Value) -> ProcessorResult {
        Err(api_error())
    }

    async fn list_payment_methods(&self, _merchant_account: &str, _shopper_reference: &str) -> ProcessorResult {
        Err(api_error())
    }

    async fn update_authorized_amount(&self, _intent: &ModificationIntent) -> ProcessorResult {
        Err(api_error())
    }

    async fn capture_authorized_payment(&self, _intent: &ModificationIntent) -> ProcessorResult {
        Err(api_error())
    }

    async fn cancel_authorized_payment(&self, _intent: &ModificationIntent) -> ProcessorResult {
        Err(api_error())
    }

    async fn refund_captured_payment(&self, _intent: &ModificationIntent) -> ProcessorResult {
        Err(api_error())
    }

    async fn delete_stored_payment_method(
        &self,
        _stored_payment_method_id: &str,
        _shopper_reference: &str,
        _merchant_account: &str,
        _idempotency_key: Uuid,
    ) -> Result<(), ProcessorError> {
        Err(api_error())
    }
}

fn api_error() -> ProcessorError {
    ProcessorError::Api {
        status: 422,
        body: serde_json::json!({"errorCode": "167", "message": "Original pspReference required"}),
    }
}
