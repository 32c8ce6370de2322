//! Payout record model and creation-time amount validation.
//!
//! Records come from `GET payouts/` and are read-only here: the engine
//! derives views and totals from them but never mutates or persists one.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::dates;
use crate::{de_amount, de_id};

/// Upper bound on a single payout, enforced at creation/edit time. The
/// aggregation passes assume amounts are bounded and finite.
pub const MAX_PAYOUT_AMOUNT: f64 = 100_000.0;

/// One payout row as the backend ships it.
///
/// `payout_type`, `method`, and `status` are open string tags: the method
/// set has grown across revisions and status labels drifted between
/// vocabularies, so unknown values must flow through untouched rather than
/// fail an enum decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PayoutRecord {
    #[serde(deserialize_with = "de_id", default)]
    pub id: String,
    #[serde(alias = "user_id", alias = "employeeId", deserialize_with = "de_id", default)]
    pub employee_id: String,
    /// Employee name cached at payout time (wire field `name`).
    #[serde(rename = "name", alias = "display_name", alias = "displayName", default)]
    pub display_name: String,
    #[serde(deserialize_with = "de_amount", default)]
    pub amount: f64,
    #[serde(default)]
    pub payout_type: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub status: String,
    /// Raw wire timestamp; parsed on demand via [`PayoutRecord::parsed_timestamp`].
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl PayoutRecord {
    /// The record's creation/transition instant, or `None` when the wire
    /// value is missing or unparseable.
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .as_deref()
            .and_then(dates::try_parse_timestamp)
    }
}

/// Decode a `payouts/` collection response.
///
/// Malformed elements are skipped with a warning instead of failing the
/// whole list - one bad row from the backend must not blank the screen.
pub fn parse_records(value: &Value) -> Vec<PayoutRecord> {
    let Some(items) = value.as_array() else {
        warn!("payout collection response is not an array");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<PayoutRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed payout row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Error, PartialEq)]
pub enum PayoutValidationError {
    #[error("amount is not a finite number")]
    NotFinite,
    #[error("amount cannot be negative: {0}")]
    Negative(f64),
    #[error("amount {amount} exceeds the single-payout limit of {limit}")]
    AboveLimit { amount: f64, limit: f64 },
}

/// Validate a new or edited payout amount against [`MAX_PAYOUT_AMOUNT`].
pub fn validate_amount(amount: f64) -> Result<(), PayoutValidationError> {
    validate_amount_with_limit(amount, MAX_PAYOUT_AMOUNT)
}

/// Same check with a deployment-specific limit.
pub fn validate_amount_with_limit(amount: f64, limit: f64) -> Result<(), PayoutValidationError> {
    if !amount.is_finite() {
        return Err(PayoutValidationError::NotFinite);
    }
    if amount < 0.0 {
        return Err(PayoutValidationError::Negative(amount));
    }
    if amount > limit {
        return Err(PayoutValidationError::AboveLimit { amount, limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_tolerates_drifted_shapes() {
        let value = serde_json::json!([
            {
                "id": 7,
                "user_id": 1001,
                "name": "Иван Петров",
                "amount": "2500",
                "payout_type": "Аванс",
                "method": "💳 На карту",
                "status": "Ожидает",
                "timestamp": "2024-01-15 10:00:00",
                "sync_to_bot": true
            },
            {
                "id": "8",
                "employee_id": "1002",
                "display_name": "Анна",
                "amount": 500.5,
                "payout_type": "Зарплата",
                "method": "💵 Из кассы",
                "status": "Archived"
            },
            "not an object"
        ]);
        let records = parse_records(&value);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].employee_id, "1001");
        assert_eq!(records[0].amount, 2500.0);
        assert_eq!(records[0].display_name, "Иван Петров");
        assert_eq!(records[1].status, "Archived");
        assert!(records[1].timestamp.is_none());
    }

    #[test]
    fn test_parsed_timestamp_falls_back_to_none() {
        let record: PayoutRecord = serde_json::from_value(serde_json::json!({
            "id": 1, "user_id": 1, "name": "x", "amount": 0,
            "timestamp": "not-a-date"
        }))
        .unwrap();
        assert!(record.parsed_timestamp().is_none());
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(0.0), Ok(()));
        assert_eq!(validate_amount(MAX_PAYOUT_AMOUNT), Ok(()));
        assert_eq!(validate_amount(-1.0), Err(PayoutValidationError::Negative(-1.0)));
        assert_eq!(validate_amount(f64::NAN), Err(PayoutValidationError::NotFinite));
        assert_eq!(
            validate_amount(100_000.5),
            Err(PayoutValidationError::AboveLimit { amount: 100_000.5, limit: MAX_PAYOUT_AMOUNT })
        );
        assert_eq!(validate_amount_with_limit(150.0, 100.0), Err(PayoutValidationError::AboveLimit { amount: 150.0, limit: 100.0 }));
    }
}
