use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use validator::Validate;

use crate::delivery::http::v1::validate_payload;
use crate::domain::subscription::BillingDuration;
use crate::usecase::error::UsecaseError;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSubscriptionRequest {
    #[validate(length(min = 1))]
    pub plan_id: String,
    pub duration: String,
}

#[tracing::instrument(skip(state))]
pub async fn get_current_user(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, UsecaseError> {
    let user = state.subscriptions_usecase.get_current_user().await?;
    Ok((StatusCode::OK, Json(user)))
}

#[tracing::instrument(skip(state))]
pub async fn list_catalogues(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling list catalogues request");

    let plans = state.subscriptions_usecase.get_catalogues().await?;
    Ok((StatusCode::OK, Json(plans)))
}

#[tracing::instrument(skip(state))]
pub async fn get_active_subscription(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UsecaseError> {
    let user = state.subscriptions_usecase.get_current_user().await?;
    let abonnement = state.subscriptions_usecase.get_active_subscription(user.id).await?;

    Ok((StatusCode::OK, Json(abonnement)))
}

#[tracing::instrument(skip(state, payload), fields(plan_id = %payload.plan_id))]
pub async fn update_subscription(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateSubscriptionRequest>,
) -> Result<impl IntoResponse, UsecaseError> {
    tracing::debug!("handling update subscription request");

    validate_payload(&payload)?;
    let duration = payload
        .duration
        .parse::<BillingDuration>()
        .map_err(UsecaseError::Validation)?;

    let user = state.subscriptions_usecase.get_current_user().await?;
    let abonnement = state
        .subscriptions_usecase
        .update_user_subscription(user.id, &payload.plan_id, duration)
        .await?;

    metrics::counter!("subscription_updates_total", "plan" => abonnement.plan_id.clone()).increment(1);
    tracing::debug!(abonnement_id = %abonnement.id, "subscription updated successfully");
    Ok((StatusCode::OK, Json(abonnement)))
}
