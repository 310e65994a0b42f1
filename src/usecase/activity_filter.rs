//! Filtering of a child's activity history by date range and categorical tags.
//!
//! All predicates are conjunctive and commute, so the order in which they are
//! evaluated never changes the result. The relative order of the input is kept.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::activity::{ActivityRecord, Difficulty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub selected_assistants: BTreeSet<String>,
    pub selected_subjects: BTreeSet<String>,
    pub selected_difficulties: BTreeSet<Difficulty>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.date_range.start_date.is_none()
            && self.date_range.end_date.is_none()
            && self.selected_assistants.is_empty()
            && self.selected_subjects.is_empty()
            && self.selected_difficulties.is_empty()
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Number of active constraints, used for the filter badge.
    pub fn active_count(&self) -> usize {
        [
            self.date_range.start_date.is_some(),
            self.date_range.end_date.is_some(),
            !self.selected_assistants.is_empty(),
            !self.selected_subjects.is_empty(),
            !self.selected_difficulties.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, record: &ActivityRecord) -> bool {
        if let Some(start) = self.date_range.start_date {
            if record.date.date() < start {
                return false;
            }
        }

        if let Some(end) = self.date_range.end_date {
            if record.date > end_of_day(end) {
                return false;
            }
        }

        if !self.selected_assistants.is_empty() {
            let assistant = record.assistant.as_deref().unwrap_or("");
            if !self.selected_assistants.contains(assistant) {
                return false;
            }
        }

        if !self.selected_subjects.is_empty() {
            let matiere = record.matiere.as_deref().unwrap_or("");
            if !self.selected_subjects.contains(matiere) {
                return false;
            }
        }

        // A record without difficulty never passes an active difficulty filter.
        if !self.selected_difficulties.is_empty() {
            match record.difficulty {
                Some(d) if self.selected_difficulties.contains(&d) => {}
                _ => return false,
            }
        }

        true
    }
}

/// Options offered by the filter pickers for one activity list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub assistants: BTreeSet<String>,
    pub subjects: BTreeSet<String>,
    pub difficulties: BTreeSet<Difficulty>,
}

impl FilterOptions {
    pub fn from_records(records: &[ActivityRecord]) -> Self {
        Self {
            assistants: unique_values(records, |r| r.assistant.as_deref()),
            subjects: unique_values(records, |r| r.matiere.as_deref()),
            difficulties: records.iter().filter_map(|r| r.difficulty).collect(),
        }
    }
}

pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN))
}

pub fn apply(records: &[ActivityRecord], criteria: &FilterCriteria) -> Vec<ActivityRecord> {
    if criteria.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| criteria.matches(record))
        .cloned()
        .collect()
}

/// Distinct non-empty values picked by `selector`.
pub fn unique_values<F>(records: &[ActivityRecord], selector: F) -> BTreeSet<String>
where
    F: Fn(&ActivityRecord) -> Option<&str>,
{
    records
        .iter()
        .filter_map(|r| selector(r))
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::parse_activity_date;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    fn record(id: i64, when: &str) -> ActivityRecord {
        ActivityRecord::new(id, 1, parse_activity_date(when).unwrap(), format!("Activité {}", id))
    }

    fn sample() -> Vec<ActivityRecord> {
        vec![
            record(1, "2024-03-01").with_assistant("Recherche").with_matiere("Histoire"),
            record(2, "2024-03-05").with_assistant("Accueil"),
            record(3, "2024-03-07T18:20:00")
                .with_assistant("J'Apprends")
                .with_matiere("Mathématiques")
                .with_difficulty(Difficulty::Facile),
            record(4, "2024-03-10")
                .with_assistant("J'Apprends")
                .with_matiere("Français")
                .with_difficulty(Difficulty::Difficile),
            record(5, "2024-03-12").with_matiere("Mathématiques"),
        ]
    }

    fn ids(records: &[ActivityRecord]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_start_date_excludes_earlier_records() {
        let records = vec![
            record(1, "2024-03-01").with_assistant("Recherche"),
            record(2, "2024-03-05").with_assistant("Accueil"),
        ];
        let criteria = FilterCriteria {
            date_range: DateRange { start_date: Some(date("2024-03-03")), end_date: None },
            ..Default::default()
        };

        assert_eq!(ids(&apply(&records, &criteria)), vec![2]);
    }

    #[test]
    fn test_all_assistants_selected_keeps_order() {
        let records = vec![
            record(1, "2024-03-01").with_assistant("Recherche"),
            record(2, "2024-03-05").with_assistant("Accueil"),
        ];
        let criteria = FilterCriteria {
            selected_assistants: ["Recherche", "Accueil"].iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        };

        assert_eq!(apply(&records, &criteria), records);
    }

    #[test]
    fn test_missing_difficulty_is_excluded() {
        let records = vec![
            record(1, "2024-03-01").with_assistant("Recherche").with_matiere("Histoire"),
            record(2, "2024-03-02").with_difficulty(Difficulty::Facile),
        ];
        let criteria = FilterCriteria {
            selected_assistants: ["Recherche".to_string()].into(),
            selected_difficulties: [Difficulty::Facile].into(),
            ..Default::default()
        };

        assert!(apply(&records, &criteria).is_empty());

        let criteria = FilterCriteria {
            selected_difficulties: [Difficulty::Facile].into(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&records, &criteria)), vec![2]);
    }

    #[test]
    fn test_missing_assistant_never_matches() {
        let criteria = FilterCriteria {
            selected_assistants: ["J'Apprends".to_string(), "Accueil".to_string()].into(),
            ..Default::default()
        };

        assert_eq!(ids(&apply(&sample(), &criteria)), vec![2, 3, 4]);
    }

    #[test]
    fn test_subject_filter() {
        let criteria = FilterCriteria {
            selected_subjects: ["Mathématiques".to_string()].into(),
            ..Default::default()
        };

        assert_eq!(ids(&apply(&sample(), &criteria)), vec![3, 5]);
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let records = sample();
        assert_eq!(apply(&records, &FilterCriteria::default()), records);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let records = vec![
            record(1, "2024-03-05"),
            record(2, "2024-03-07T23:59:59.999"),
            record(3, "2024-03-08"),
            record(4, "2024-03-04T23:59:59"),
        ];
        let criteria = FilterCriteria {
            date_range: DateRange {
                start_date: Some(date("2024-03-05")),
                end_date: Some(date("2024-03-07")),
            },
            ..Default::default()
        };

        assert_eq!(ids(&apply(&records, &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_start_date_ignores_time_of_day() {
        let records = vec![record(1, "2024-03-05T00:00:00"), record(2, "2024-03-05T08:30:00")];
        let criteria = FilterCriteria {
            date_range: DateRange { start_date: Some(date("2024-03-05")), end_date: None },
            ..Default::default()
        };

        assert_eq!(ids(&apply(&records, &criteria)), vec![1, 2]);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let criteria = FilterCriteria {
            date_range: DateRange { start_date: Some(date("2024-03-02")), end_date: None },
            selected_subjects: ["Mathématiques".to_string(), "Français".to_string()].into(),
            ..Default::default()
        };

        let once = apply(&sample(), &criteria);
        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_adding_constraints_never_grows_result() {
        let records = sample();
        let mut criteria = FilterCriteria::default();
        let mut previous = apply(&records, &criteria).len();

        criteria.selected_assistants.insert("J'Apprends".to_string());
        criteria.selected_assistants.insert("Accueil".to_string());
        let current = apply(&records, &criteria).len();
        assert!(current <= previous);
        previous = current;

        criteria.selected_difficulties.insert(Difficulty::Difficile);
        let current = apply(&records, &criteria).len();
        assert!(current <= previous);
        previous = current;

        criteria.date_range.end_date = Some(date("2024-03-09"));
        assert!(apply(&records, &criteria).len() <= previous);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let criteria = FilterCriteria {
            selected_subjects: ["Anglais".to_string()].into(),
            ..Default::default()
        };

        assert!(apply(&sample(), &criteria).is_empty());
    }

    #[test]
    fn test_unique_values_skip_empty_and_duplicates() {
        let mut records = sample();
        records.push(record(6, "2024-03-13").with_assistant(""));
        records.push(record(7, "2024-03-14").with_assistant("Recherche"));

        let assistants = unique_values(&records, |r| r.assistant.as_deref());

        assert_eq!(
            assistants.into_iter().collect::<Vec<_>>(),
            vec!["Accueil", "J'Apprends", "Recherche"]
        );
    }

    #[test]
    fn test_filter_options() {
        let options = FilterOptions::from_records(&sample());

        assert_eq!(options.subjects.len(), 3);
        assert_eq!(
            options.difficulties.into_iter().collect::<Vec<_>>(),
            vec![Difficulty::Facile, Difficulty::Difficile]
        );
    }

    #[test]
    fn test_reset_and_active_count() {
        let mut criteria = FilterCriteria {
            date_range: DateRange { start_date: Some(date("2024-03-02")), end_date: Some(date("2024-03-09")) },
            selected_subjects: ["Histoire".to_string()].into(),
            ..Default::default()
        };
        assert_eq!(criteria.active_count(), 3);

        criteria.reset();
        assert!(criteria.is_empty());
        assert_eq!(criteria.active_count(), 0);
    }
}
