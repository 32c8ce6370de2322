//! View-level statistics over the filtered payout list: the totals line and
//! the status/type badge counts.

use std::collections::HashMap;

use serde::Serialize;

use crate::payouts::PayoutRecord;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PayoutSummary {
    pub count: usize,
    pub total: f64,
    /// One bucket per status value actually present - an unrecognized
    /// label still gets its own key.
    pub status_counts: HashMap<String, usize>,
    /// Amount sums per payout type, keyed the same open way.
    pub type_sums: HashMap<String, f64>,
}

/// Summarize a (usually already filtered) record sequence.
///
/// Stateless and idempotent; empty input yields zero counts and empty maps.
/// Non-finite amounts contribute 0 so the total never goes NaN.
pub fn summarize<'a, I>(records: I) -> PayoutSummary
where
    I: IntoIterator<Item = &'a PayoutRecord>,
{
    let mut summary = PayoutSummary::default();
    for record in records {
        let amount = if record.amount.is_finite() { record.amount } else { 0.0 };
        summary.count += 1;
        summary.total += amount;
        *summary.status_counts.entry(record.status.clone()).or_insert(0) += 1;
        *summary.type_sums.entry(record.payout_type.clone()).or_insert(0.0) += amount;
    }
    summary
}
