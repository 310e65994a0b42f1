use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::activity::ActivityRecord;
use crate::usecase::activity_filter::{self, FilterCriteria, FilterOptions};
use crate::usecase::classify::{classify_assistant, classify_subject, AssistantKind, SubjectTheme};
use crate::usecase::contracts::{ActivityRepository, ChildRepository};
use crate::usecase::error::UsecaseError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredActivities {
    pub activities: Vec<ActivityRecord>,
    pub total: usize,
    pub filtered: usize,
    pub active_filters: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeStats {
    pub sessions: usize,
    pub minutes: u32,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivitySummary {
    pub child_id: i64,
    pub sessions: usize,
    pub total_minutes: u32,
    pub average_score: Option<f64>,
    pub by_subject: BTreeMap<SubjectTheme, ThemeStats>,
    pub by_assistant: BTreeMap<AssistantKind, usize>,
}

/// Theme of a record: its subject tag when present, its title otherwise.
pub fn subject_theme(record: &ActivityRecord) -> SubjectTheme {
    match record.matiere.as_deref() {
        Some(matiere) if !matiere.trim().is_empty() => classify_subject(matiere),
        _ => classify_subject(&record.title),
    }
}

pub fn assistant_kind(record: &ActivityRecord) -> AssistantKind {
    match record.assistant.as_deref() {
        Some(assistant) if !assistant.trim().is_empty() => classify_assistant(assistant),
        _ => classify_assistant(&record.title),
    }
}

fn average(scores: &[u8]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: u32 = scores.iter().map(|s| u32::from(*s)).sum();
    Some(f64::from(sum) / scores.len() as f64)
}

pub fn summarize(child_id: i64, records: &[ActivityRecord]) -> ActivitySummary {
    let mut summary = ActivitySummary {
        child_id,
        sessions: records.len(),
        ..Default::default()
    };
    let mut all_scores = Vec::new();
    let mut theme_scores: BTreeMap<SubjectTheme, Vec<u8>> = BTreeMap::new();

    for record in records {
        let minutes = record.duration_minutes.unwrap_or(0);
        summary.total_minutes += minutes;

        let theme = subject_theme(record);
        let stats = summary.by_subject.entry(theme).or_default();
        stats.sessions += 1;
        stats.minutes += minutes;

        *summary.by_assistant.entry(assistant_kind(record)).or_default() += 1;

        if let Some(score) = record.score {
            all_scores.push(score);
            theme_scores.entry(theme).or_default().push(score);
        }
    }

    for (theme, scores) in &theme_scores {
        if let Some(stats) = summary.by_subject.get_mut(theme) {
            stats.average_score = average(scores);
        }
    }
    summary.average_score = average(&all_scores);
    summary
}

pub struct ActivitiesUseCase<A, C>
where
    A: ActivityRepository,
    C: ChildRepository,
{
    activity_repository: A,
    child_repository: C,
}

impl<A, C> ActivitiesUseCase<A, C>
where
    A: ActivityRepository,
    C: ChildRepository,
{
    pub fn new(activity_repository: A, child_repository: C) -> Self {
        Self {
            activity_repository,
            child_repository,
        }
    }

    async fn load(&self, child_id: i64) -> Result<Vec<ActivityRecord>, UsecaseError> {
        self.child_repository
            .find_by_id(child_id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Child".to_string()))?;

        Ok(self.activity_repository.find_by_child_id(child_id).await?)
    }

    #[tracing::instrument(skip(self, criteria), fields(%child_id, active_filters = criteria.active_count()))]
    pub async fn list_activities(
        &self,
        child_id: i64,
        criteria: &FilterCriteria,
    ) -> Result<FilteredActivities, UsecaseError> {
        tracing::debug!("listing activities");

        let records = self.load(child_id).await?;
        let activities = activity_filter::apply(&records, criteria);

        tracing::debug!(child_id, total = records.len(), filtered = activities.len(), "activities filtered");
        Ok(FilteredActivities {
            total: records.len(),
            filtered: activities.len(),
            active_filters: criteria.active_count(),
            activities,
        })
    }

    #[tracing::instrument(skip(self), fields(%child_id))]
    pub async fn filter_options(&self, child_id: i64) -> Result<FilterOptions, UsecaseError> {
        tracing::debug!("collecting filter options");

        let records = self.load(child_id).await?;
        Ok(FilterOptions::from_records(&records))
    }

    #[tracing::instrument(skip(self), fields(%child_id))]
    pub async fn summarize(&self, child_id: i64) -> Result<ActivitySummary, UsecaseError> {
        tracing::debug!("summarizing activities");

        let records = self.load(child_id).await?;
        let summary = summarize(child_id, &records);

        tracing::debug!(child_id, sessions = summary.sessions, "activity summary computed");
        Ok(summary)
    }
}
