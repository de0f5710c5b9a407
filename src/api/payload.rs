use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::common::NewBid;
use crate::common::validation::{FieldError, parse_amount, validate_amount, validate_fields};

/// `amount` arrives either as a JSON number or as the raw form string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    Number(f64),
    Text(String),
}

impl AmountField {
    fn resolve(&self) -> Result<f64, FieldError> {
        match self {
            AmountField::Number(amount) => validate_amount(*amount),
            AmountField::Text(text) => parse_amount(text),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBidRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub amount: Option<AmountField>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl CreateBidRequest {
    /// Validate fields; missing or future timestamps become `now`.
    pub fn into_new_bid(self, now: DateTime<Utc>) -> Result<NewBid, Vec<FieldError>> {
        let amount = match &self.amount {
            Some(field) => field.resolve(),
            None => parse_amount(""),
        };
        let (name, contact, amount) = validate_fields(&self.name, &self.contact, amount)?;

        let timestamp = match self.timestamp {
            Some(timestamp) if timestamp <= now => timestamp,
            _ => now,
        };

        Ok(NewBid {
            name,
            contact,
            amount,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::validation::BidField;

    fn now() -> DateTime<Utc> {
        "2024-09-20T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn amount_string_is_coerced() {
        let request: CreateBidRequest = serde_json::from_str(
            r#"{"name":"Ana","contact":"(11) 98765-4321","amount":"150.00","timestamp":"2024-09-20T11:00:00.000Z"}"#,
        )
        .unwrap();

        let bid = request.into_new_bid(now()).unwrap();
        assert_eq!(bid.amount, 150.0);
        assert_eq!(bid.timestamp, "2024-09-20T11:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn missing_or_future_timestamp_uses_server_time() {
        let request: CreateBidRequest =
            serde_json::from_str(r#"{"name":"Ana","contact":"11","amount":150}"#).unwrap();
        assert_eq!(request.into_new_bid(now()).unwrap().timestamp, now());

        let request: CreateBidRequest = serde_json::from_str(
            r#"{"name":"Ana","contact":"11","amount":150,"timestamp":"2099-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(request.into_new_bid(now()).unwrap().timestamp, now());
    }

    #[test]
    fn empty_body_reports_every_field() {
        let request: CreateBidRequest = serde_json::from_str("{}").unwrap();
        let errors = request.into_new_bid(now()).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![BidField::Name, BidField::Contact, BidField::Amount]);
    }
}
