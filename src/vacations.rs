//! Vacations and sick leave ("Отпуска и больничные" screen).
//!
//! Date filtering here works on *intervals*: a record is a `[start, end]`
//! range, and a filter window selects records whose range overlaps it, so a
//! vacation spanning the window edge still shows up. The same interval test
//! drives the "on vacation today" counter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::dates;
use crate::de_id;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VacationRecord {
    #[serde(deserialize_with = "de_id", default)]
    pub id: String,
    #[serde(alias = "user_id", deserialize_with = "de_id", default)]
    pub employee_id: String,
    #[serde(default)]
    pub name: String,
    /// «Отпуск» or «Больничный»; open tag.
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub comment: String,
}

impl VacationRecord {
    fn range(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        (
            dates::try_parse_date(&self.start_date),
            dates::try_parse_date(&self.end_date),
        )
    }

    /// Inclusive day count, e.g. 2024-03-01..2024-03-03 is 3 days.
    /// `None` when either bound is unparseable or the range is inverted.
    pub fn duration_days(&self) -> Option<i64> {
        let (start, end) = self.range();
        let (start, end) = (start?, end?);
        if end < start {
            return None;
        }
        Some((end - start).num_days() + 1)
    }

    /// Whether `day` falls inside the inclusive `[start, end]` range.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        match self.range() {
            (Some(start), Some(end)) => start <= day && day <= end,
            _ => false,
        }
    }
}

/// Tolerant decode of a `vacations/` collection response.
pub fn parse_vacations(value: &Value) -> Vec<VacationRecord> {
    let Some(items) = value.as_array() else {
        warn!("vacation collection response is not an array");
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<VacationRecord>(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "skipping malformed vacation row");
                None
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VacationFilter {
    pub employee_id: Option<String>,
    pub kind: Option<String>,
    /// Case-insensitive substring match against the employee name - the one
    /// filter the source applied client-side after fetching.
    pub query: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl VacationFilter {
    pub fn matches(&self, record: &VacationRecord) -> bool {
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
        if let Some(query) = active(&self.query) {
            if !record.name.to_lowercase().contains(&query.to_lowercase()) {
                return false;
            }
        }
        let (start, end) = record.range();
        // Overlap test against whichever bounds are set; an unparseable
        // record bound cannot exclude the record.
        if let (Some(to), Some(start)) = (self.date_to, start) {
            if start > to {
                return false;
            }
        }
        if let (Some(from), Some(end)) = (self.date_from, end) {
            if end < from {
                return false;
            }
        }
        true
    }

    pub fn apply<'a>(&self, records: &'a [VacationRecord]) -> Vec<&'a VacationRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }
}

/// The "Сегодня в отпуске — N" counter.
pub fn count_active_on(records: &[VacationRecord], day: NaiveDate) -> usize {
    records.iter().filter(|record| record.is_active_on(day)).count()
}

fn active(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Vec<VacationRecord> {
        parse_vacations(&serde_json::json!([
            {"id": 1, "employee_id": 10, "name": "Иван Петров", "type": "Отпуск",
             "start_date": "2024-07-01", "end_date": "2024-07-14", "comment": ""},
            {"id": 2, "employee_id": 11, "name": "Анна Сидорова", "type": "Больничный",
             "start_date": "2024-07-10", "end_date": "2024-07-12", "comment": "справка"},
            {"id": 3, "employee_id": 12, "name": "Пётр", "type": "Отпуск",
             "start_date": "2024-08-01", "end_date": "2024-08-05", "comment": ""},
            {"id": 4, "employee_id": 13, "name": "Ольга", "type": "Отпуск",
             "start_date": "когда-нибудь", "end_date": "", "comment": ""}
        ]))
    }

    #[test]
    fn test_duration_is_inclusive() {
        let records = sample();
        assert_eq!(records[0].duration_days(), Some(14));
        assert_eq!(records[1].duration_days(), Some(3));
        assert_eq!(records[3].duration_days(), None);

        let inverted = VacationRecord {
            start_date: "2024-07-10".into(),
            end_date: "2024-07-01".into(),
            ..records[0].clone()
        };
        assert_eq!(inverted.duration_days(), None);
    }

    #[test]
    fn test_active_today_counter() {
        let records = sample();
        assert_eq!(count_active_on(&records, day(2024, 7, 11)), 2);
        assert_eq!(count_active_on(&records, day(2024, 7, 20)), 0);
        // Edge days are inclusive.
        assert_eq!(count_active_on(&records, day(2024, 7, 14)), 1);
    }

    #[test]
    fn test_window_filter_uses_overlap() {
        let records = sample();
        let filter = VacationFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 7, 12),
            date_to: NaiveDate::from_ymd_opt(2024, 7, 31),
            ..Default::default()
        };
        let filtered = filter.apply(&records);
        // Row 1 spans into the window, row 2 ends on its first day, row 3
        // starts after it; row 4 has no comparable dates and stays visible.
        let ids: Vec<&str> = filtered.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_kind_and_query_filters() {
        let records = sample();
        let filter = VacationFilter { kind: Some("Больничный".into()), ..Default::default() };
        assert_eq!(filter.apply(&records).len(), 1);

        let filter = VacationFilter { query: Some("сидорова".into()), ..Default::default() };
        assert_eq!(filter.apply(&records)[0].id, "2");
    }
}
