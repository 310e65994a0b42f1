use std::sync::Arc;

use tokio::sync::RwLock;

use super::DataSource;
use crate::{
    domain::activity::ActivityRecord, repository::errors::RepositoryError,
    usecase::contracts::ActivityRepository,
};

#[derive(Clone)]
pub struct InMemoryActivityRepository {
    source: Arc<DataSource>,
    activities: Arc<RwLock<Vec<ActivityRecord>>>,
}

impl InMemoryActivityRepository {
    pub fn new(source: Arc<DataSource>, activities: Vec<ActivityRecord>) -> Self {
        Self {
            source,
            activities: Arc::new(RwLock::new(activities)),
        }
    }
}

impl ActivityRepository for InMemoryActivityRepository {
    #[tracing::instrument(skip(self), fields(%child_id))]
    async fn find_by_child_id(&self, child_id: i64) -> Result<Vec<ActivityRecord>, RepositoryError> {
        self.source.fetch("find activities").await?;

        let activities = self.activities.read().await;
        let records: Vec<ActivityRecord> = activities
            .iter()
            .filter(|a| a.child_id == child_id)
            .cloned()
            .collect();

        tracing::debug!(child_id, count = records.len(), "activities loaded");
        Ok(records)
    }
}
