use super::super::domain::{DocumentField, DocumentRecord};
use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Source of the current date for generated field values.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Source of the numeric suffix used in generated document identifiers.
pub trait RandomSource {
    /// Returns a value in `0..=999`.
    fn three_digit(&mut self) -> u16;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn three_digit(&mut self) -> u16 {
        rand::thread_rng().gen_range(0..1000)
    }
}

/// Proposed value for a field; callers apply or reject each one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixSuggestion {
    pub field: DocumentField,
    pub proposed_value: String,
}

/// Identifier prefix used when none is configured.
pub const DEFAULT_ID_PREFIX: &str = "TD";

/// Proposes values for blank `title`, `documentId` and `date` fields.
///
/// Not pure: the result depends on `clock` and `random`. The record itself
/// is never modified.
pub fn auto_fix_suggestions(
    record: &DocumentRecord,
    id_prefix: &str,
    clock: &dyn Clock,
    random: &mut dyn RandomSource,
) -> Vec<FixSuggestion> {
    let today = clock.today();
    let mut suggestions = Vec::new();

    if record.trimmed(DocumentField::Title).is_none() {
        suggestions.push(FixSuggestion {
            field: DocumentField::Title,
            proposed_value: format!("Technical Disclosure - {}", today.format("%Y-%m-%d")),
        });
    }

    if record.trimmed(DocumentField::DocumentId).is_none() {
        let suffix = random.three_digit() % 1000;
        suggestions.push(FixSuggestion {
            field: DocumentField::DocumentId,
            proposed_value: format!("{id_prefix}-{}-{suffix:03}", today.year()),
        });
    }

    if record.trimmed(DocumentField::Date).is_none() {
        suggestions.push(FixSuggestion {
            field: DocumentField::Date,
            proposed_value: today.format("%Y-%m-%d").to_string(),
        });
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    struct FixedRandom(u16);

    impl RandomSource for FixedRandom {
        fn three_digit(&mut self) -> u16 {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date"))
    }

    #[test]
    fn proposes_all_fields_for_empty_record() {
        let suggestions = auto_fix_suggestions(
            &DocumentRecord::default(),
            DEFAULT_ID_PREFIX,
            &clock(),
            &mut FixedRandom(7),
        );

        assert_eq!(
            suggestions,
            vec![
                FixSuggestion {
                    field: DocumentField::Title,
                    proposed_value: "Technical Disclosure - 2025-03-07".to_string(),
                },
                FixSuggestion {
                    field: DocumentField::DocumentId,
                    proposed_value: "TD-2025-007".to_string(),
                },
                FixSuggestion {
                    field: DocumentField::Date,
                    proposed_value: "2025-03-07".to_string(),
                },
            ]
        );
    }

    #[test]
    fn skips_fields_that_already_have_values() {
        let record = DocumentRecord {
            title: Some("Widget".to_string()),
            date: Some("2024-12-01".to_string()),
            ..DocumentRecord::default()
        };

        let suggestions = auto_fix_suggestions(&record, "PD", &clock(), &mut FixedRandom(421));
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].field, DocumentField::DocumentId);
        assert_eq!(suggestions[0].proposed_value, "PD-2025-421");
    }

    #[test]
    fn thread_random_stays_within_three_digits() {
        let mut random = ThreadRandom;
        for _ in 0..100 {
            assert!(random.three_digit() < 1000);
        }
    }

    #[test]
    fn suggestion_serializes_field_key() {
        let suggestion = FixSuggestion {
            field: DocumentField::DocumentId,
            proposed_value: "TD-2025-001".to_string(),
        };
        let json = serde_json::to_value(&suggestion).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({"field": "documentId", "proposedValue": "TD-2025-001"})
        );
    }
}
