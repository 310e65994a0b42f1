use serde::Serialize;

use crate::domain::notification::{Notification, NotificationFlag};
use crate::usecase::contracts::NotificationRepository;
use crate::usecase::error::UsecaseError;
use crate::usecase::notification_filter::{self, NotificationListState, NotificationPage, TabCounts};

/// One consistent reload of the list and the tab badges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshedNotifications {
    pub page: NotificationPage,
    pub counts: TabCounts,
}

pub struct NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    notification_repository: N,
    page_size: usize,
}

impl<N> NotificationsUseCase<N>
where
    N: NotificationRepository,
{
    pub fn new(notification_repository: N, page_size: usize) -> Self {
        Self {
            notification_repository,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[tracing::instrument(skip(self, state), fields(tab = %state.tab, page = state.page))]
    pub async fn list(&self, state: &NotificationListState) -> Result<NotificationPage, UsecaseError> {
        tracing::debug!("listing notifications");

        let records = self.notification_repository.find_all().await?;
        let page = state.apply(&records, self.page_size);

        tracing::debug!(visible = page.visible.len(), has_more = page.has_more, "notifications listed");
        Ok(page)
    }

    /// Pull-to-refresh: reloads the source once and rebuilds both the page
    /// the user is on and the tab badges from that snapshot.
    #[tracing::instrument(skip(self, state), fields(tab = %state.tab, page = state.page))]
    pub async fn refresh(&self, state: &NotificationListState) -> Result<RefreshedNotifications, UsecaseError> {
        tracing::debug!("refreshing notifications");

        let records = self.notification_repository.find_all().await?;
        let refreshed = RefreshedNotifications {
            page: state.apply(&records, self.page_size),
            counts: notification_filter::counts(&records),
        };

        tracing::debug!(
            visible = refreshed.page.visible.len(),
            total = refreshed.page.total,
            "notifications refreshed"
        );
        Ok(refreshed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn counts(&self) -> Result<TabCounts, UsecaseError> {
        tracing::debug!("counting notifications per tab");

        let records = self.notification_repository.find_all().await?;
        Ok(notification_filter::counts(&records))
    }

    #[tracing::instrument(skip(self), fields(notification_id = %id, flag = flag.as_str()))]
    async fn toggle(&self, id: &str, flag: NotificationFlag) -> Result<Notification, UsecaseError> {
        tracing::debug!("toggling notification flag");

        let notification = self
            .notification_repository
            .toggle_flag(id, flag)
            .await
            .map_err(|e| match UsecaseError::from(e) {
                UsecaseError::NotFound(_) => UsecaseError::NotFound("Notification".to_string()),
                other => other,
            })?;

        tracing::info!(notification_id = %id, flag = flag.as_str(), "notification updated");
        Ok(notification)
    }

    pub async fn toggle_read(&self, id: &str) -> Result<Notification, UsecaseError> {
        self.toggle(id, NotificationFlag::Read).await
    }

    pub async fn toggle_favorite(&self, id: &str) -> Result<Notification, UsecaseError> {
        self.toggle(id, NotificationFlag::Favorite).await
    }

    pub async fn toggle_archive(&self, id: &str) -> Result<Notification, UsecaseError> {
        self.toggle(id, NotificationFlag::Archived).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn mark_all_as_read(&self) -> Result<usize, UsecaseError> {
        tracing::debug!("marking all notifications as read");

        let changed = self.notification_repository.mark_all_as_read().await?;

        tracing::info!(changed, "all notifications marked as read");
        Ok(changed)
    }
}
