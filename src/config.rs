#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub processor_base_url: String,
    pub processor_api_key: String,
    pub merchant_account: String,
    pub hmac_key_hex: String,
    pub shopper_reference: String,
    pub default_currency: String,
    pub default_payment_minor: i64,
    pub default_charge_minor: i64,
    pub default_preauth_minor: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            processor_base_url: std::env::var("PROCESSOR_BASE_URL")
                .unwrap_or_else(|_| "https://checkout-test.adyen.com/v71".to_string()),
            processor_api_key: std::env::var("PROCESSOR_API_KEY").unwrap_or_else(|_| "dev-api-key".to_string()),
            merchant_account: std::env::var("MERCHANT_ACCOUNT").unwrap_or_else(|_| "TestMerchant".to_string()),
            hmac_key_hex: std::env::var("WEBHOOK_HMAC_KEY")
                .unwrap_or_else(|_| "746573745f686d61635f6b6579".to_string()),
            shopper_reference: std::env::var("SHOPPER_REFERENCE").unwrap_or_else(|_| "shopper-primary".to_string()),
            default_currency: std::env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "EUR".to_string()),
            default_payment_minor: env_i64("DEFAULT_PAYMENT_MINOR", 9998),
            default_charge_minor: env_i64("DEFAULT_CHARGE_MINOR", 500),
            default_preauth_minor: env_i64("DEFAULT_PREAUTH_MINOR", 4999),
        }
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
