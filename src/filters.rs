//! The payout filter predicate.
//!
//! A [`PayoutFilter`] mirrors the filter bar of the payouts screen: search
//! text, exact-match dropdowns, inclusive date bounds, and the period mode.
//! [`PayoutFilter::matches`] is total - any well-formed record/filter pair
//! yields a boolean, never an error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::payouts::PayoutRecord;
use crate::salary::LastSalaryIndex;
use crate::vocab::Vocabulary;

/// Date scoping mode for the payouts view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    /// Explicit `date_from` / `date_to` bounds (or none at all).
    #[default]
    Custom,
    /// Advances since the employee's last settled salary; `date_from` and
    /// `date_to` are ignored entirely in this mode.
    SinceLastSalary,
}

/// User-chosen view constraints, built from UI form state. Blank strings
/// mean "filter not active", matching what the form controls submit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoutFilter {
    /// Case-insensitive substring match against the cached employee name.
    pub query: Option<String>,
    pub employee_id: Option<String>,
    pub status: Option<String>,
    pub payout_type: Option<String>,
    pub method: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub period: Period,
}

impl PayoutFilter {
    /// Whether one record belongs in the current view.
    ///
    /// Clauses are ANDed in order: query, employee, status, type, method,
    /// then date scoping. Records with unparseable timestamps are excluded
    /// from `SinceLastSalary` (an unknown date must not be assumed recent)
    /// but pass `Custom` bounds they cannot be compared against (a bound
    /// must not silently hide malformed-but-real rows).
    pub fn matches(
        &self,
        record: &PayoutRecord,
        index: &LastSalaryIndex,
        vocab: &Vocabulary,
    ) -> bool {
        if let Some(query) = active(&self.query) {
            let haystack = record.display_name.to_lowercase();
            if !haystack.contains(&query.to_lowercase()) {
                return false;
            }
        }
        if let Some(employee_id) = active(&self.employee_id) {
            if record.employee_id.trim() != employee_id {
                return false;
            }
        }
        if let Some(status) = active(&self.status) {
            if record.status != status {
                return false;
            }
        }
        if let Some(payout_type) = active(&self.payout_type) {
            if record.payout_type != payout_type {
                return false;
            }
        }
        if let Some(method) = active(&self.method) {
            if record.method != method {
                return false;
            }
        }
        match self.period {
            Period::SinceLastSalary => {
                // Salary rows themselves never show in this mode.
                if !vocab.is_advance(&record.payout_type) {
                    return false;
                }
                match index.cutoff_for(&record.employee_id) {
                    // No prior salary: everything counts as "since".
                    None => true,
                    Some(cutoff) => match record.parsed_timestamp() {
                        Some(ts) => ts > cutoff,
                        None => false,
                    },
                }
            }
            Period::Custom => {
                if self.date_from.is_none() && self.date_to.is_none() {
                    return true;
                }
                let Some(ts) = record.parsed_timestamp() else {
                    return true;
                };
                let day = ts.date();
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
        }
    }

    /// Filter a full snapshot.
    ///
    /// The last-salary index is built from the complete list *before*
    /// filtering; see [`LastSalaryIndex`] for why.
    pub fn apply<'a>(
        &self,
        records: &'a [PayoutRecord],
        vocab: &Vocabulary,
    ) -> Vec<&'a PayoutRecord> {
        let index = LastSalaryIndex::build(records, vocab);
        records
            .iter()
            .filter(|record| self.matches(record, &index, vocab))
            .collect()
    }
}

fn active(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
