use chrono::{NaiveDate, Utc};

use crate::domain::subscription::{Abonnement, BillingDuration, CataloguePlan, User};
use crate::repository::errors::RepositoryError;
use crate::usecase::contracts::{CatalogueRepository, SubscriptionRepository, UserRepository};
use crate::usecase::error::UsecaseError;

pub struct SubscriptionsUseCase<P, U, S>
where
    P: CatalogueRepository,
    U: UserRepository,
    S: SubscriptionRepository,
{
    catalogue_repository: P,
    user_repository: U,
    subscription_repository: S,
}

impl<P, U, S> SubscriptionsUseCase<P, U, S>
where
    P: CatalogueRepository,
    U: UserRepository,
    S: SubscriptionRepository,
{
    pub fn new(catalogue_repository: P, user_repository: U, subscription_repository: S) -> Self {
        Self {
            catalogue_repository,
            user_repository,
            subscription_repository,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_catalogues(&self) -> Result<Vec<CataloguePlan>, UsecaseError> {
        tracing::debug!("listing catalogue plans");

        let plans = self.catalogue_repository.find_all().await?;

        tracing::debug!(count = plans.len(), "catalogue plans listed");
        Ok(plans)
    }

    #[tracing::instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<User, UsecaseError> {
        tracing::debug!("getting current user");

        self.user_repository.current_user().await.map_err(|e| match e {
            RepositoryError::NotFound => UsecaseError::Internal("current user is not configured".to_string()),
            other => other.into(),
        })
    }

    #[tracing::instrument(skip(self), fields(%user_id))]
    pub async fn get_active_subscription(&self, user_id: i64) -> Result<Option<Abonnement>, UsecaseError> {
        tracing::debug!("getting active subscription");

        let abonnement = self.subscription_repository.find_active_by_user_id(user_id).await?;

        tracing::debug!(user_id, found = abonnement.is_some(), "active subscription looked up");
        Ok(abonnement)
    }

    pub async fn update_user_subscription(
        &self,
        user_id: i64,
        plan_id: &str,
        duration: BillingDuration,
    ) -> Result<Abonnement, UsecaseError> {
        self.update_user_subscription_at(user_id, plan_id, duration, Utc::now().date_naive())
            .await
    }

    #[tracing::instrument(skip(self), fields(%user_id, %plan_id, %duration))]
    pub async fn update_user_subscription_at(
        &self,
        user_id: i64,
        plan_id: &str,
        duration: BillingDuration,
        today: NaiveDate,
    ) -> Result<Abonnement, UsecaseError> {
        tracing::debug!("updating user subscription");

        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("User".to_string()))?;

        let plan = self
            .catalogue_repository
            .find_by_id(plan_id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Plan".to_string()))?;

        let price_cents = plan.price_for(duration).ok_or_else(|| {
            UsecaseError::Validation(format!("plan {} is not offered {}", plan.id, duration))
        })?;

        let abonnement = Abonnement::new(user_id, plan.id, duration, price_cents, today);
        self.subscription_repository.replace_active(&abonnement).await?;

        tracing::info!(user_id, plan_id, %duration, abonnement_id = %abonnement.id, "subscription updated");
        Ok(abonnement)
    }
}
