use crate::webhook::notification::NotificationRequestItem;
use anyhow::Context;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Verifies the per-item HMAC-SHA256 signature of classic notifications.
/// The shared secret is hex on the wire and decoded once at startup, so a
/// malformed secret fails process start instead of failing every delivery.
pub struct HmacVerifier {
    key: Vec<u8>,
}

impl HmacVerifier {
    pub fn from_hex(secret_hex: &str) -> anyhow::Result<Self> {
        let key = hex::decode(secret_hex.trim()).context("webhook hmac key is not valid hex")?;
        if key.is_empty() {
            anyhow::bail!("webhook hmac key is empty");
        }
        Ok(Self { key })
    }

    /// True iff the item carries a signature and it matches the recomputed
    /// digest. Any missing or malformed input verifies false; the comparison
    /// itself is constant-time.
    pub fn verify(&self, item: &NotificationRequestItem) -> bool {
        let supplied = match item.additional_data.get("hmacSignature") {
            Some(s) => s,
            None => return false,
        };
        let supplied = match BASE64.decode(supplied) {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let payload = match signing_payload(item) {
            Some(p) => p,
            None => return false,
        };

        let mut mac = match HmacSha256::new_from_slice(&self.key) {
            Ok(m) => m,
            Err(_) => return false,
        };
        mac.update(payload.as_bytes());
        mac.verify_slice(&supplied).is_ok()
    }

    /// Base64 digest for the item's signing payload, as the processor would
    /// compute it. None when the item lacks the fields the payload needs.
    pub fn calculate(&self, item: &NotificationRequestItem) -> Option<String> {
        let payload = signing_payload(item)?;
        let mut mac = HmacSha256::new_from_slice(&self.key).ok()?;
        mac.update(payload.as_bytes());
        Some(BASE64.encode(mac.finalize().into_bytes()))
    }
}

// Processor-defined field order; a missing originalReference leaves its slot
// empty, and success is the raw wire string.
fn signing_payload(item: &NotificationRequestItem) -> Option<String> {
    let amount = item.amount.as_ref()?;
    Some(format!(
        "{}:{}:{}:{}:{}:{}:{}:{}",
        item.psp_reference,
        item.original_reference.as_deref().unwrap_or_default(),
        item.merchant_account_code,
        item.merchant_reference,
        amount.value,
        amount.currency,
        item.event_code,
        item.success
    ))
}
