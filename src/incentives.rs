//! Bonuses and penalties ("Штрафы и премии" screen).
//!
//! Same engine pattern as payouts - fetch the list, filter client-side,
//! show totals - with a two-kind record instead of the payout status flow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::dates;
use crate::{de_amount, de_id};

pub const KIND_BONUS: &str = "bonus";
pub const KIND_PENALTY: &str = "penalty";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncentiveRecord {
    #[serde(deserialize_with = "de_id", default)]
    pub id: String,
    #[serde(alias = "user_id", deserialize_with = "de_id", default)]
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    /// `bonus` or `penalty`; open tag, unknown kinds flow through.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(deserialize_with = "de_amount", default)]
    pub amount: f64,
    #[serde(default)]
    pub reason: String,
    /// Wire form `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub added_by: String,
    /// Locked rows are month-closed on the backend and not deletable from
    /// the UI; carried through, not enforced here.
    #[serde(default)]
    pub locked: bool,
}

impl IncentiveRecord {
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(dates::try_parse_date)
    }
}

/// Tolerant decode of an `incentives/` collection response.
pub fn parse_incentives(value: &Value) -> Vec<IncentiveRecord> {
    let Some(items) = value.as_array() else {
        warn!("incentive collection response is not an array");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<IncentiveRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed incentive row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IncentiveFilter {
    pub employee_id: Option<String>,
    pub kind: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl IncentiveFilter {
    pub fn matches(&self, record: &IncentiveRecord) -> bool {
        if let Some(employee_id) = active(&self.employee_id) {
            if record.employee_id.trim() != employee_id {
                return false;
            }
        }
        if let Some(kind) = active(&self.kind) {
            if record.kind != kind {
                return false;
            }
        }
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        // Same policy as payout date bounds: a row whose date cannot be
        // compared is not excluded by the bound.
        let Some(day) = record.parsed_date() else {
            return true;
        };
        if let Some(from) = self.date_from {
            if day < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if day > to {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [IncentiveRecord]) -> Vec<&'a IncentiveRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IncentiveSummary {
    pub count: usize,
    pub bonus_total: f64,
    pub penalty_total: f64,
    /// `bonus_total - penalty_total`. Unknown kinds are counted but sit on
    /// neither side of the balance.
    pub net: f64,
}

pub fn summarize_incentives<'a, I>(records: I) -> IncentiveSummary
where
    I: IntoIterator<Item = &'a IncentiveRecord>,
{
    let mut summary = IncentiveSummary::default();
    for record in records {
        let amount = if record.amount.is_finite() { record.amount } else { 0.0 };
        summary.count += 1;
        match record.kind.trim().to_lowercase().as_str() {
            KIND_BONUS => summary.bonus_total += amount,
            KIND_PENALTY => summary.penalty_total += amount,
            _ => {}
        }
    }
    summary.net = summary.bonus_total - summary.penalty_total;
    summary
}

fn active(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
