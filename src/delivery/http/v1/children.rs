use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use validator::Validate;

use crate::delivery::http::v1::validate_payload;
use crate::domain::child::{ChildChanges, ChildDraft};
use crate::usecase::children::parse_age;
use crate::usecase::error::UsecaseError;
use crate::AppState;

/// Body of the "add a child" form. The age arrives as typed text.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateChildRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub last_name: String,
    pub age: String,
    #[validate(length(min = 1, max = 20))]
    pub grade: String,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateChildRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    pub age: Option<String>,
    #[validate(length(min = 1, max = 20))]
    pub grade: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

#[tracing::instrument(skip(state))]
pub async fn list_children(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling list children request");

    let parent = state.subscriptions_usecase.get_current_user().await?;
    let children = state.children_usecase.list_children(parent.id).await?;

    Ok((StatusCode::OK, Json(children)))
}

#[tracing::instrument(skip(state), fields(%child_id))]
pub async fn get_child(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
) -> Result<impl IntoResponse, UsecaseError> {
    let child = state.children_usecase.get_child(child_id).await?;
    Ok((StatusCode::OK, Json(child)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_child(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateChildRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling create child request");

    validate_payload(&payload)?;
    let age = parse_age(&payload.age)?;
    let parent = state.subscriptions_usecase.get_current_user().await?;

    let child = state
        .children_usecase
        .create_child(ChildDraft {
            parent_id: parent.id,
            first_name: payload.first_name,
            last_name: payload.last_name,
            age,
            grade: payload.grade,
            avatar_url: payload.avatar_url,
        })
        .await?;

    metrics::counter!("children_created_total").increment(1);
    tracing::debug!(child_id = child.id, "child created successfully");
    Ok((StatusCode::CREATED, Json(child)))
}

#[tracing::instrument(skip(state, payload), fields(%child_id))]
pub async fn update_child(
    State(state): State<Arc<AppState>>,
    Path(child_id): Path<i64>,
    Json(payload): Json<UpdateChildRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling update child request");

    validate_payload(&payload)?;
    let age = payload.age.as_deref().map(parse_age).transpose()?;

    let child = state
        .children_usecase
        .update_child(
            child_id,
            ChildChanges {
                first_name: payload.first_name,
                last_name: payload.last_name,
                age,
                grade: payload.grade,
                avatar_url: payload.avatar_url,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(child)))
}
