use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::notification::{Notification, NotificationFlag, Tab};
use crate::usecase::error::UsecaseError;
use crate::usecase::notification_filter::NotificationListState;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct NotificationListParams {
    pub tab: Option<String>,
    pub query: Option<String>,
    pub page: Option<usize>,
}

impl NotificationListParams {
    pub fn into_state(self) -> Result<NotificationListState, UsecaseError> {
        let tab = match self.tab.as_deref() {
            Some(raw) if !raw.trim().is_empty() => raw.parse::<Tab>().map_err(UsecaseError::Validation)?,
            _ => Tab::default(),
        };

        let mut state = NotificationListState::new(tab, self.query.unwrap_or_default());
        if let Some(page) = self.page {
            state.page = page.max(1);
        }
        Ok(state)
    }
}

#[derive(Serialize)]
pub struct NotificationsListResponse {
    pub notifications: Vec<Notification>,
    pub has_more: bool,
    pub total: usize,
    pub tab: Tab,
    pub query: String,
    pub page: usize,
    pub page_size: usize,
    /// State to request for the next page, absent once the list is exhausted.
    pub next: Option<NotificationListState>,
}

#[derive(Serialize)]
pub struct MarkAllReadResponse {
    pub updated: usize,
}

#[tracing::instrument(skip(state, params))]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NotificationListParams>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!(?params, "handling list notifications request");

    let list_state = params.into_state()?;
    let page = state.notifications_usecase.list(&list_state).await?;

    let mut following = list_state.clone();
    let next = following.load_more(&page).then_some(following);

    tracing::debug!(visible = page.visible.len(), has_more = page.has_more, "notifications listed successfully");
    Ok((
        StatusCode::OK,
        Json(NotificationsListResponse {
            notifications: page.visible,
            has_more: page.has_more,
            total: page.total,
            tab: list_state.tab,
            query: list_state.query,
            page: list_state.page,
            page_size: state.notifications_usecase.page_size(),
            next,
        }),
    ))
}

/// Pull-to-refresh: the client posts the state it is showing and gets the
/// same page rebuilt from fresh data, plus the tab badges.
#[tracing::instrument(skip(state, list_state), fields(tab = %list_state.tab, page = list_state.page))]
pub async fn refresh_notifications(
    State(state): State<Arc<AppState>>,
    Json(list_state): Json<NotificationListState>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling refresh notifications request");

    let refreshed = state.notifications_usecase.refresh(&list_state).await?;
    Ok((StatusCode::OK, Json(refreshed)))
}

#[tracing::instrument(skip(state))]
pub async fn get_counts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, UsecaseError> {
    let counts = state.notifications_usecase.counts().await?;
    Ok((StatusCode::OK, Json(counts)))
}

#[tracing::instrument(skip(state))]
pub async fn mark_all_as_read(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling mark all as read request");

    let updated = state.notifications_usecase.mark_all_as_read().await?;
    metrics::counter!("notifications_marked_read_total").increment(updated as u64);

    Ok((StatusCode::OK, Json(MarkAllReadResponse { updated })))
}

fn toggled(notification: Notification, flag: NotificationFlag) -> (StatusCode, Json<Notification>) {
    metrics::counter!("notification_toggles_total", "flag" => flag.as_str()).increment(1);
    (StatusCode::OK, Json(notification))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn toggle_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    let notification = state.notifications_usecase.toggle_read(&id).await?;
    Ok(toggled(notification, NotificationFlag::Read))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn toggle_favorite(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    let notification = state.notifications_usecase.toggle_favorite(&id).await?;
    Ok(toggled(notification, NotificationFlag::Favorite))
}

#[tracing::instrument(skip(state), fields(notification_id = %id))]
pub async fn toggle_archive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, UsecaseError> {
    let notification = state.notifications_usecase.toggle_archive(&id).await?;
    Ok(toggled(notification, NotificationFlag::Archived))
}
