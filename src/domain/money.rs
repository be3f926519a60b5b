use crate::domain::error::ServiceError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CURRENCY: &str = "EUR";

/// Minor-unit amount in the processor's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String,
    pub value: i64,
}

/// Loosely-typed amount as it arrives in request bodies: the value may be a
/// JSON number or a numeric string, and the currency may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAmount {
    pub currency: Option<String>,
    pub value: Option<serde_json::Value>,
}

impl Amount {
    pub fn new(currency: &str, value: i64) -> Self {
        Self {
            currency: currency.to_string(),
            value,
        }
    }

    pub fn decode(raw: &RawAmount, fallback_minor: Option<i64>) -> Result<Self, ServiceError> {
        let currency = match &raw.currency {
            Some(c) => c.clone(),
            None => DEFAULT_CURRENCY.to_string(),
        };
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(ServiceError::validation(
                "INVALID_CURRENCY",
                format!("currency must be a 3-letter uppercase code, got {currency:?}"),
            ));
        }

        let value = match &raw.value {
            Some(serde_json::Value::Number(n)) => Some(n.as_i64().ok_or_else(|| {
                ServiceError::validation("AMOUNT_UNPARSEABLE", format!("amount value {n} is not an integer"))
            })?),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
            Some(serde_json::Value::String(s)) => Some(s.trim().parse().map_err(|_| {
                ServiceError::validation("AMOUNT_UNPARSEABLE", format!("unable to parse amount value {s:?}"))
            })?),
            Some(other) => {
                return Err(ServiceError::validation(
                    "AMOUNT_UNPARSEABLE",
                    format!("amount value has unsupported type: {other}"),
                ))
            }
            None => None,
        };

        let value = value
            .or(fallback_minor)
            .ok_or_else(|| ServiceError::validation("AMOUNT_MISSING", "amount value is required"))?;
        if value < 0 {
            return Err(ServiceError::validation(
                "INVALID_AMOUNT",
                "amount value must not be negative",
            ));
        }

        Ok(Self { currency, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_string() {
        let raw = RawAmount {
            currency: Some("USD".to_string()),
            value: Some(serde_json::json!("1500")),
        };
        let amount = Amount::decode(&raw, None).unwrap();
        assert_eq!(amount, Amount::new("USD", 1500));
    }

    #[test]
    fn falls_back_when_value_absent() {
        let amount = Amount::decode(&RawAmount::default(), Some(500)).unwrap();
        assert_eq!(amount, Amount::new("EUR", 500));
    }

    #[test]
    fn rejects_non_numeric_string() {
        let raw = RawAmount {
            currency: Some("EUR".to_string()),
            value: Some(serde_json::json!("abc")),
        };
        assert!(Amount::decode(&raw, None).is_err());
    }

    #[test]
    fn rejects_lowercase_currency() {
        let raw = RawAmount {
            currency: Some("eur".to_string()),
            value: Some(serde_json::json!(100)),
        };
        assert!(Amount::decode(&raw, None).is_err());
    }

    #[test]
    fn fails_when_value_and_fallback_absent() {
        assert!(Amount::decode(&RawAmount::default(), None).is_err());
    }

    #[test]
    fn blank_string_value_uses_fallback() {
        let raw = RawAmount {
            currency: None,
            value: Some(serde_json::json!("  ")),
        };
        let amount = Amount::decode(&raw, Some(250)).unwrap();
        assert_eq!(amount, Amount::new("EUR", 250));
    }

    #[test]
    fn rejects_negative_value() {
        let raw = RawAmount {
            currency: Some("EUR".to_string()),
            value: Some(serde_json::json!(-1)),
        };
        assert!(Amount::decode(&raw, None).is_err());
    }

    #[test]
    fn rejects_fractional_value() {
        let raw = RawAmount {
            currency: Some("EUR".to_string()),
            value: Some(serde_json::json!(12.5)),
        };
        assert!(Amount::decode(&raw, None).is_err());
    }
}
