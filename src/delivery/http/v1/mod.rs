pub mod activities;
pub mod children;
pub mod notifications;
pub mod subscriptions;

use validator::Validate;

use crate::usecase::error::UsecaseError;

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), UsecaseError> {
    payload.validate().map_err(|validation_errors| {
        tracing::warn!(?validation_errors, "validation failed");
        UsecaseError::Validation(format!("Validation error: {:?}", validation_errors))
    })
}


#[cfg(test)]
pub mod test_support {
    use std::sync::Arc;

    use axum::response::Response;

    use crate::repository::memory::DataSource;
    use crate::AppState;

    pub const PAGE_SIZE: usize = 5;

    pub fn test_state() -> Arc<AppState> {
        Arc::new(AppState::with_fixtures(Arc::new(DataSource::instant()), PAGE_SIZE))
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}
