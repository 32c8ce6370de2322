//! Status/type label vocabulary.
//!
//! The backend never settled on one label set: statuses shipped as
//! "Одобрено"/"approved" depending on revision, and "Отказано" and
//! "Отклонено" both mean rejected. The labels are therefore configuration,
//! not literals baked into the engine. Filters still compare raw strings
//! exactly; the vocabulary is consulted only where the *meaning* of a tag
//! matters - salary vs advance, and which statuses establish a last-salary
//! cutoff.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Payout types that count as a salary payment.
    pub salary_types: Vec<String>,
    /// Payout types that count as an advance.
    pub advance_types: Vec<String>,
    /// Statuses (approved-or-paid) that establish a last-salary cutoff.
    pub settled_statuses: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            salary_types: labels(&["Зарплата", "salary"]),
            advance_types: labels(&["Аванс", "advance"]),
            settled_statuses: labels(&[
                "Одобрено",
                "Выплачен",
                "Выплачено",
                "approved",
                "paid",
            ]),
        }
    }
}

impl Vocabulary {
    pub fn is_salary(&self, tag: &str) -> bool {
        contains_label(&self.salary_types, tag)
    }

    pub fn is_advance(&self, tag: &str) -> bool {
        contains_label(&self.advance_types, tag)
    }

    /// Whether a status means the salary actually went (or is going) out,
    /// i.e. it can anchor the "since last salary" cutoff.
    pub fn establishes_cutoff(&self, status: &str) -> bool {
        contains_label(&self.settled_statuses, status)
    }
}

fn labels(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn contains_label(set: &[String], tag: &str) -> bool {
    let needle = tag.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    set.iter().any(|label| label.trim().to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels_cover_revision_drift() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_salary("Зарплата"));
        assert!(vocab.is_salary("Salary"));
        assert!(vocab.is_advance("аванс"));
        assert!(vocab.establishes_cutoff("Одобрено"));
        assert!(vocab.establishes_cutoff("Выплачено"));
        assert!(vocab.establishes_cutoff("PAID"));
        assert!(!vocab.establishes_cutoff("Ожидает"));
        assert!(!vocab.establishes_cutoff(""));
    }

    #[test]
    fn test_custom_vocabulary_from_json() {
        let vocab: Vocabulary = serde_json::from_value(serde_json::json!({
            "settled_statuses": ["done"]
        }))
        .unwrap();
        assert!(vocab.establishes_cutoff("Done"));
        assert!(!vocab.establishes_cutoff("Одобрено"));
        // Sections not overridden keep their defaults.
        assert!(vocab.is_salary("Зарплата"));
    }
}
