//! Weekly calendar of suggested sessions for a child.
//!
//! The plan is derived from the child's history only: weakest subjects come
//! first and the plan cycles through them day by day.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::activity::ActivityRecord;
use crate::usecase::activities::{assistant_kind, subject_theme};
use crate::usecase::classify::{AssistantKind, SubjectTheme};
use crate::usecase::contracts::{ActivityRepository, ChildRepository};
use crate::usecase::error::UsecaseError;

pub const MAX_PLAN_DAYS: u32 = 31;
const DEFAULT_SESSION_MINUTES: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub date: NaiveDate,
    pub subject: SubjectTheme,
    pub assistant: AssistantKind,
    pub title: String,
    pub duration_minutes: u32,
}

#[derive(Default)]
struct ThemeHistory {
    scores: Vec<u8>,
    minutes: Vec<u32>,
    assistants: BTreeMap<AssistantKind, usize>,
}

impl ThemeHistory {
    fn average_score(&self) -> Option<f64> {
        if self.scores.is_empty() {
            return None;
        }
        let sum: u32 = self.scores.iter().map(|s| u32::from(*s)).sum();
        Some(f64::from(sum) / self.scores.len() as f64)
    }

    fn usual_minutes(&self) -> u32 {
        if self.minutes.is_empty() {
            return DEFAULT_SESSION_MINUTES;
        }
        self.minutes.iter().sum::<u32>() / self.minutes.len() as u32
    }

    // Ties go to the kind declared first.
    fn preferred_assistant(&self) -> AssistantKind {
        self.assistants
            .iter()
            .filter(|(kind, _)| **kind != AssistantKind::Autre)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(kind, _)| *kind)
            .unwrap_or(AssistantKind::JApprends)
    }
}

fn session_title(subject: SubjectTheme, assistant: AssistantKind) -> String {
    match assistant {
        AssistantKind::Recherche => format!("Petite recherche en {}", subject.label()),
        AssistantKind::Accueil => format!("Point d'étape en {}", subject.label()),
        _ => format!("Révision de {}", subject.label()),
    }
}

/// Builds a `days`-long plan starting at `start`.
pub fn build_plan(records: &[ActivityRecord], start: NaiveDate, days: u32) -> Vec<Recommendation> {
    let mut history: BTreeMap<SubjectTheme, ThemeHistory> = SubjectTheme::ALL
        .into_iter()
        .filter(|theme| *theme != SubjectTheme::Autre)
        .map(|theme| (theme, ThemeHistory::default()))
        .collect();

    for record in records {
        let Some(entry) = history.get_mut(&subject_theme(record)) else {
            continue;
        };
        if let Some(score) = record.score {
            entry.scores.push(score);
        }
        if let Some(minutes) = record.duration_minutes {
            entry.minutes.push(minutes);
        }
        *entry.assistants.entry(assistant_kind(record)).or_default() += 1;
    }

    // Unscored themes first, then ascending average score, then by label.
    let mut ranked: Vec<(&SubjectTheme, &ThemeHistory)> = history.iter().collect();
    ranked.sort_by(|(a_theme, a), (b_theme, b)| {
        let a_score = a.average_score();
        let b_score = b.average_score();
        match (a_score, b_score) {
            (None, Some(_)) => std::cmp::Ordering::Less,
            (Some(_), None) => std::cmp::Ordering::Greater,
            (Some(x), Some(y)) => x.total_cmp(&y),
            (None, None) => std::cmp::Ordering::Equal,
        }
        .then_with(|| a_theme.label().cmp(b_theme.label()))
    });

    (0..days)
        .filter_map(|offset| {
            let date = start.checked_add_days(Days::new(u64::from(offset)))?;
            let (theme, stats) = ranked[offset as usize % ranked.len()];
            let assistant = stats.preferred_assistant();
            Some(Recommendation {
                date,
                subject: *theme,
                assistant,
                title: session_title(*theme, assistant),
                duration_minutes: stats.usual_minutes(),
            })
        })
        .collect()
}

pub struct RecommendationsUseCase<A, C>
where
    A: ActivityRepository,
    C: ChildRepository,
{
    activity_repository: A,
    child_repository: C,
}

impl<A, C> RecommendationsUseCase<A, C>
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

    #[tracing::instrument(skip(self), fields(%child_id, %start))]
    pub async fn weekly_plan(
        &self,
        child_id: i64,
        start: NaiveDate,
        days: u32,
    ) -> Result<Vec<Recommendation>, UsecaseError> {
        tracing::debug!("building recommendation plan");

        if days == 0 || days > MAX_PLAN_DAYS {
            return Err(UsecaseError::Validation(format!(
                "days must be between 1 and {}",
                MAX_PLAN_DAYS
            )));
        }

        self.child_repository
            .find_by_id(child_id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Child".to_string()))?;

        let records = self.activity_repository.find_by_child_id(child_id).await?;
        let plan = build_plan(&records, start, days);

        tracing::debug!(child_id, sessions = plan.len(), "recommendation plan built");
        Ok(plan)
    }
}
