use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use checkout_service::config::AppConfig;
use checkout_service::http::handlers::{modifications, ops, payments, webhooks};
use checkout_service::processor::checkout_client::CheckoutClient;
use checkout_service::service::payment_service::PaymentService;
use checkout_service::webhook::hmac::HmacVerifier;
use checkout_service::webhook::pipeline::WebhookPipeline;
use checkout_service::webhook::recent::RecentEventBuffer;
use checkout_service::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let verifier = HmacVerifier::from_hex(&cfg.hmac_key_hex).context("WEBHOOK_HMAC_KEY is not usable")?;

    let processor = Arc::new(CheckoutClient {
        base_url: cfg.processor_base_url.clone(),
        api_key: cfg.processor_api_key.clone(),
        client: reqwest::Client::new(),
    });

    let payment_service = PaymentService {
        config: cfg.clone(),
        processor,
    };

    let recent_events = Arc::new(RecentEventBuffer::new());
    let webhook_pipeline = Arc::new(WebhookPipeline {
        verifier,
        recent_events,
    });

    let state = AppState {
        payment_service,
        webhook_pipeline,
    };

    let app = Router::new()
        .route("/health", get(ops::health))
        .route("/api/payments", post(payments::create_payment))
        .route("/api/paymentMethods", post(payments::payment_methods))
        .route("/api/payments/details", post(payments::payment_details))
        .route("/api/subscription-create", post(payments::subscription_create))
        .route("/api/subscription-payment", post(payments::subscription_payment))
        .route("/api/subscriptions-cancel", post(payments::subscription_cancel))
        .route("/api/preauthorisation", post(payments::preauthorisation))
        .route("/api/modify-amount", post(modifications::modify_amount))
        .route("/api/capture", post(modifications::capture))
        .route("/api/cancel", post(modifications::cancel))
        .route("/api/refund", post(modifications::refund))
        .route("/webhooks", post(webhooks::ingest))
        .route("/api/webhooks/recent", get(webhooks::recent))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
