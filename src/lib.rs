//! Staff Desk - admin dashboard computation core
//!
//! Pure, synchronous filtering and aggregation over record lists the
//! dashboard frontend has already fetched (payouts, bonuses/penalties,
//! vacations, sales totals). The presentation layer supplies the raw
//! collections and the user-chosen filters; this crate decides which rows
//! are visible and what the totals/badges say.
//!
//! Everything here is a total function over immutable snapshots: no I/O, no
//! shared mutable state, no failure path reaching the caller. Malformed
//! backend data (unparseable timestamps, non-numeric amounts, unknown status
//! labels) degrades to documented defaults instead of panicking, so
//! forward-incompatible data never takes the dashboard down.

use serde::{Deserialize, Deserializer};

pub mod analytics;
pub mod dates;
pub mod filters;
pub mod incentives;
pub mod payouts;
pub mod refresh;
pub mod salary;
pub mod summary;
pub mod vacations;
pub mod vocab;

pub use filters::{PayoutFilter, Period};
pub use payouts::{PayoutRecord, PayoutValidationError, MAX_PAYOUT_AMOUNT};
pub use salary::LastSalaryIndex;
pub use summary::{summarize, PayoutSummary};
pub use vocab::Vocabulary;

/// Identifiers arrive as JSON strings from some endpoints and as numbers
/// from others; everything is compared in canonical string form.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Monetary amounts come back as numbers, numeric strings ("1500"), or are
/// missing entirely; anything that does not parse contributes 0 so a single
/// bad row never turns the running total into NaN.
pub(crate) fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let amount = match &raw {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if amount.is_finite() { amount } else { 0.0 })
}
