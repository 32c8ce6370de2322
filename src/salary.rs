//! Last-salary index: the most recent approved-or-paid salary timestamp
//! per employee, used by the "since last salary" filter mode.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::warn;

use crate::payouts::PayoutRecord;
use crate::vocab::Vocabulary;

/// `employee_id -> latest settled salary timestamp`.
///
/// Built fresh from the *full, unfiltered* payout list on every pass. If it
/// were built from the filtered subset, the "since last salary" filter would
/// feed on its own output. An employee absent from the index has no prior
/// salary on record, which is distinct from "salary at time zero".
#[derive(Debug, Default)]
pub struct LastSalaryIndex {
    cutoffs: HashMap<String, NaiveDateTime>,
}

impl LastSalaryIndex {
    pub fn build(records: &[PayoutRecord], vocab: &Vocabulary) -> Self {
        let mut cutoffs: HashMap<String, NaiveDateTime> = HashMap::new();
        for record in records {
            if !vocab.is_salary(&record.payout_type) || !vocab.establishes_cutoff(&record.status) {
                continue;
            }
            let Some(ts) = record.parsed_timestamp() else {
                // A row with an unparseable date cannot anchor a cutoff;
                // treat it as absent, never as "now" or epoch.
                warn!(id = %record.id, "salary record with unparseable timestamp ignored for cutoff");
                continue;
            };
            cutoffs
                .entry(record.employee_id.clone())
                .and_modify(|current| {
                    if ts > *current {
                        *current = ts;
                    }
                })
                .or_insert(ts);
        }
        Self { cutoffs }
    }

    pub fn cutoff_for(&self, employee_id: &str) -> Option<NaiveDateTime> {
        self.cutoffs.get(employee_id.trim()).copied()
    }

    pub fn len(&self) -> usize {
        self.cutoffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cutoffs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payouts::parse_records;

    fn records(value: serde_json::Value) -> Vec<PayoutRecord> {
        parse_records(&value)
    }

    #[test]
    fn test_keeps_latest_settled_salary_per_employee() {
        let list = records(serde_json::json!([
            {"id": 1, "user_id": "E1", "name": "a", "amount": 1, "payout_type": "Зарплата", "status": "Выплачен", "timestamp": "2024-01-10"},
            {"id": 2, "user_id": "E1", "name": "a", "amount": 1, "payout_type": "Зарплата", "status": "Одобрено", "timestamp": "2024-02-10"},
            {"id": 3, "user_id": "E1", "name": "a", "amount": 1, "payout_type": "Зарплата", "status": "Ожидает", "timestamp": "2024-03-10"},
            {"id": 4, "user_id": "E1", "name": "a", "amount": 1, "payout_type": "Аванс", "status": "Выплачен", "timestamp": "2024-04-10"},
            {"id": 5, "user_id": "E2", "name": "b", "amount": 1, "payout_type": "Зарплата", "status": "Выплачено", "timestamp": "2024-01-05 09:30:00"}
        ]));
        let index = LastSalaryIndex::build(&list, &Vocabulary::default());
        assert_eq!(index.len(), 2);
        assert_eq!(index.cutoff_for("E1").unwrap().date().to_string(), "2024-02-10");
        assert_eq!(index.cutoff_for("E2").unwrap().to_string(), "2024-01-05 09:30:00");
        assert!(index.cutoff_for("E3").is_none());
    }

    #[test]
    fn test_unparseable_timestamp_never_anchors_a_cutoff() {
        let list = records(serde_json::json!([
            {"id": 1, "user_id": "E1", "name": "a", "amount": 1, "payout_type": "Зарплата", "status": "Выплачен", "timestamp": "???"}
        ]));
        let index = LastSalaryIndex::build(&list, &Vocabulary::default());
        assert!(index.is_empty());
        assert!(index.cutoff_for("E1").is_none());
    }

    #[test]
    fn test_empty_input_builds_empty_index() {
        let index = LastSalaryIndex::build(&[], &Vocabulary::default());
        assert!(index.is_empty());
    }
}
