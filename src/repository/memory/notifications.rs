use std::sync::Arc;

use tokio::sync::RwLock;

use super::DataSource;
use crate::{
    domain::notification::{Notification, NotificationFlag},
    repository::errors::RepositoryError,
    usecase::contracts::NotificationRepository,
};

#[derive(Clone)]
pub struct InMemoryNotificationRepository {
    source: Arc<DataSource>,
    notifications: Arc<RwLock<Vec<Notification>>>,
}

impl InMemoryNotificationRepository {
    pub fn new(source: Arc<DataSource>, notifications: Vec<Notification>) -> Self {
        Self {
            source,
            notifications: Arc::new(RwLock::new(notifications)),
        }
    }
}

impl NotificationRepository for InMemoryNotificationRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Notification>, RepositoryError> {
        self.source.fetch("find notifications").await?;
        Ok(self.notifications.read().await.clone())
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id, flag = flag.as_str()))]
    async fn toggle_flag(&self, id: &str, flag: NotificationFlag) -> Result<Notification, RepositoryError> {
        self.source.fetch("update notification").await?;

        let mut notifications = self.notifications.write().await;
        let slot = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(RepositoryError::NotFound)?;
        slot.toggle(flag);
        Ok(slot.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn mark_all_as_read(&self) -> Result<usize, RepositoryError> {
        self.source.fetch("mark notifications read").await?;

        let mut notifications = self.notifications.write().await;
        let mut changed = 0;
        for n in notifications.iter_mut().filter(|n| !n.read) {
            n.read = true;
            changed += 1;
        }

        tracing::debug!(changed, "notifications marked as read");
        Ok(changed)
    }
}
