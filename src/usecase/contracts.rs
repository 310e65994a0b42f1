use crate::{
    domain::activity::ActivityRecord,
    domain::child::{Child, ChildDraft},
    domain::notification::{Notification, NotificationFlag},
    domain::subscription::{Abonnement, CataloguePlan, User},
    repository::errors::RepositoryError,
};

#[cfg_attr(test, mockall::automock)]
pub trait ChildRepository: Send + Sync {
    async fn find_by_parent_id(&self, parent_id: i64) -> Result<Vec<Child>, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Child>, RepositoryError>;
    async fn create(&self, draft: ChildDraft) -> Result<Child, RepositoryError>;
    async fn update(&self, child: &Child) -> Result<(), RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait ActivityRepository: Send + Sync {
    async fn find_by_child_id(&self, child_id: i64) -> Result<Vec<ActivityRecord>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait NotificationRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Notification>, RepositoryError>;
    /// Flips `flag` on the stored notification and returns the updated record.
    async fn toggle_flag(&self, id: &str, flag: NotificationFlag) -> Result<Notification, RepositoryError>;
    async fn mark_all_as_read(&self) -> Result<usize, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CatalogueRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CataloguePlan>, RepositoryError>;
    async fn find_by_id(&self, plan_id: &str) -> Result<Option<CataloguePlan>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    async fn current_user(&self) -> Result<User, RepositoryError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait SubscriptionRepository: Send + Sync {
    async fn find_active_by_user_id(&self, user_id: i64) -> Result<Option<Abonnement>, RepositoryError>;
    /// Deactivates the user's current subscription and stores `abonnement` as the active one.
    async fn replace_active(&self, abonnement: &Abonnement) -> Result<(), RepositoryError>;
}
