use std::sync::Arc;

use tokio::sync::RwLock;

use super::DataSource;
use crate::{
    domain::subscription::{Abonnement, CataloguePlan, User},
    repository::errors::RepositoryError,
    usecase::contracts::{CatalogueRepository, SubscriptionRepository, UserRepository},
};

#[derive(Clone)]
pub struct InMemoryCatalogueRepository {
    source: Arc<DataSource>,
    plans: Vec<CataloguePlan>,
}

impl InMemoryCatalogueRepository {
    pub fn new(source: Arc<DataSource>, plans: Vec<CataloguePlan>) -> Self {
        Self { source, plans }
    }
}

impl CatalogueRepository for InMemoryCatalogueRepository {
    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<CataloguePlan>, RepositoryError> {
        self.source.fetch("get catalogues").await?;
        Ok(self.plans.clone())
    }

    #[tracing::instrument(skip(self), fields(%plan_id))]
    async fn find_by_id(&self, plan_id: &str) -> Result<Option<CataloguePlan>, RepositoryError> {
        self.source.fetch("get catalogue").await?;
        Ok(self.plans.iter().find(|p| p.id == plan_id).cloned())
    }
}

#[derive(Clone)]
pub struct InMemoryUserRepository {
    source: Arc<DataSource>,
    users: Vec<User>,
    current_user_id: i64,
}

impl InMemoryUserRepository {
    pub fn new(source: Arc<DataSource>, users: Vec<User>, current_user_id: i64) -> Self {
        Self {
            source,
            users,
            current_user_id,
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    #[tracing::instrument(skip(self))]
    async fn current_user(&self) -> Result<User, RepositoryError> {
        self.source.fetch("get current user").await?;
        self.users
            .iter()
            .find(|u| u.id == self.current_user_id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    #[tracing::instrument(skip(self), fields(user_id = %id))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        self.source.fetch("get user").await?;
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}

#[derive(Clone)]
pub struct InMemorySubscriptionRepository {
    source: Arc<DataSource>,
    subscriptions: Arc<RwLock<Vec<Abonnement>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new(source: Arc<DataSource>, subscriptions: Vec<Abonnement>) -> Self {
        Self {
            source,
            subscriptions: Arc::new(RwLock::new(subscriptions)),
        }
    }
}

impl SubscriptionRepository for InMemorySubscriptionRepository {
    #[tracing::instrument(skip(self), fields(%user_id))]
    async fn find_active_by_user_id(&self, user_id: i64) -> Result<Option<Abonnement>, RepositoryError> {
        self.source.fetch("get active subscription").await?;

        let subscriptions = self.subscriptions.read().await;
        Ok(subscriptions
            .iter()
            .find(|s| s.user_id == user_id && s.active)
            .cloned())
    }

    #[tracing::instrument(skip(self, abonnement), fields(user_id = %abonnement.user_id, plan_id = %abonnement.plan_id))]
    async fn replace_active(&self, abonnement: &Abonnement) -> Result<(), RepositoryError> {
        self.source.fetch("update subscription").await?;

        let mut subscriptions = self.subscriptions.write().await;
        for previous in subscriptions
            .iter_mut()
            .filter(|s| s.user_id == abonnement.user_id && s.active)
        {
            previous.active = false;
        }
        subscriptions.push(abonnement.clone());
        Ok(())
    }
}
