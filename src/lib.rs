pub mod config;
pub mod domain {
    pub mod checkout;
    pub mod error;
    pub mod money;
}
pub mod http {
    pub mod handlers {
        pub mod modifications;
        pub mod ops;
        pub mod payments;
        pub mod webhooks;
    }
}
pub mod processor;
pub mod service {
    pub mod payment_service;
}
pub mod webhook;

use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub payment_service: service::payment_service::PaymentService,
    pub webhook_pipeline: Arc<webhook::pipeline::WebhookPipeline>,
}
