use std::collections::BTreeSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::activity::Difficulty;
use crate::usecase::activity_filter::{DateRange, FilterCriteria};
use crate::usecase::error::UsecaseError;
use crate::AppState;

/// Query string of the activity history screen. List values are comma-separated.
#[derive(Debug, Default, Deserialize)]
pub struct ActivityFilterParams {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assistants: Option<String>,
    pub subjects: Option<String>,
    pub difficulties: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    pub start: Option<NaiveDate>,
    pub days: Option<u32>,
}

fn split_list(raw: Option<&str>) -> BTreeSet<String> {
    raw.unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}

impl ActivityFilterParams {
    pub fn into_criteria(self) -> Result<FilterCriteria, UsecaseError> {
        let selected_difficulties = split_list(self.difficulties.as_deref())
            .iter()
            .map(|value| value.parse::<Difficulty>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(UsecaseError::Validation)?;

        Ok(FilterCriteria {
            date_range: DateRange {
                start_date: self.start_date,
                end_date: self.end_date,
            },
            selected_assistants: split_list(self.assistants.as_deref()),
            selected_subjects: split_list(self.subjects.as_deref()),
            selected_difficulties,
        })
    }
}

#[tracing::instrument(skip(state, params), fields(%child_id))]
pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
    Query(params): Query<ActivityFilterParams>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!(?params, "handling list activities request");

    let criteria = params.into_criteria()?;
    metrics::counter!("activity_filter_requests_total").increment(1);

    let result = state
        .activities_usecase
        .list_activities(child_id, &criteria)
        .await?;

    tracing::debug!(child_id, filtered = result.filtered, "activities listed successfully");
    Ok((StatusCode::OK, Json(result)))
}

#[tracing::instrument(skip(state), fields(%child_id))]
pub async fn get_filter_options(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling filter options request");

    let options = state.activities_usecase.filter_options(child_id).await?;

    Ok((StatusCode::OK, Json(options)))
}

#[tracing::instrument(skip(state), fields(%child_id))]
pub async fn get_activity_summary(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling activity summary request");

    let summary = state.activities_usecase.summarize(child_id).await?;

    Ok((StatusCode::OK, Json(summary)))
}

#[tracing::instrument(skip(state, params), fields(%child_id))]
pub async fn get_recommendations(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
    Query(params): Query<RecommendationParams>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!(?params, "handling recommendations request");

    let start = params.start.unwrap_or_else(|| Utc::now().date_naive());
    let plan = state
        .recommendations_usecase
        .weekly_plan(child_id, start, params.days.unwrap_or(7))
        .await?;

    tracing::debug!(child_id, sessions = plan.len(), "recommendations built");
    Ok((StatusCode::OK, Json(plan)))
}
