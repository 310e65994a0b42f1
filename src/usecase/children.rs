use crate::domain::child::{Child, ChildChanges, ChildDraft, MAX_CHILD_AGE, MIN_CHILD_AGE};
use crate::usecase::contracts::{CatalogueRepository, ChildRepository, SubscriptionRepository};
use crate::usecase::error::UsecaseError;

fn check_name(field: &str, value: &str) -> Result<(), UsecaseError> {
    if value.trim().is_empty() {
        return Err(UsecaseError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

fn check_age(age: u8) -> Result<(), UsecaseError> {
    if !(MIN_CHILD_AGE..=MAX_CHILD_AGE).contains(&age) {
        return Err(UsecaseError::Validation(format!(
            "age must be between {} and {}",
            MIN_CHILD_AGE, MAX_CHILD_AGE
        )));
    }
    Ok(())
}

/// Parses the free-text age field of the child form.
pub fn parse_age(raw: &str) -> Result<u8, UsecaseError> {
    let age = raw
        .trim()
        .parse::<u8>()
        .map_err(|_| UsecaseError::Validation(format!("age must be a number, got {:?}", raw)))?;
    check_age(age)?;
    Ok(age)
}

pub struct ChildrenUseCase<C, S, P>
where
    C: ChildRepository,
    S: SubscriptionRepository,
    P: CatalogueRepository,
{
    child_repository: C,
    subscription_repository: S,
    catalogue_repository: P,
}

impl<C, S, P> ChildrenUseCase<C, S, P>
where
    C: ChildRepository,
    S: SubscriptionRepository,
    P: CatalogueRepository,
{
    pub fn new(child_repository: C, subscription_repository: S, catalogue_repository: P) -> Self {
        Self {
            child_repository,
            subscription_repository,
            catalogue_repository,
        }
    }

    /// Number of children the parent's active plan allows.
    async fn child_limit(&self, parent_id: i64) -> Result<usize, UsecaseError> {
        let abonnement = self
            .subscription_repository
            .find_active_by_user_id(parent_id)
            .await?
            .ok_or_else(|| {
                UsecaseError::Validation("an active subscription is required to add a child".to_string())
            })?;

        let plan = self
            .catalogue_repository
            .find_by_id(&abonnement.plan_id)
            .await?
            .ok_or_else(|| {
                UsecaseError::Internal(format!("active plan {} is missing from the catalogue", abonnement.plan_id))
            })?;

        Ok(usize::from(plan.max_children))
    }

    #[tracing::instrument(skip(self), fields(%parent_id))]
    pub async fn list_children(&self, parent_id: i64) -> Result<Vec<Child>, UsecaseError> {
        tracing::debug!("listing children");

        let children = self.child_repository.find_by_parent_id(parent_id).await?;

        tracing::debug!(parent_id, count = children.len(), "children listed");
        Ok(children)
    }

    #[tracing::instrument(skip(self), fields(%child_id))]
    pub async fn get_child(&self, child_id: i64) -> Result<Child, UsecaseError> {
        tracing::debug!("getting child");

        self.child_repository
            .find_by_id(child_id)
            .await?
            .ok_or_else(|| UsecaseError::NotFound("Child".to_string()))
    }

    #[tracing::instrument(skip(self, draft), fields(parent_id = %draft.parent_id))]
    pub async fn create_child(&self, draft: ChildDraft) -> Result<Child, UsecaseError> {
        tracing::debug!("creating child");

        check_name("first_name", &draft.first_name)?;
        check_age(draft.age)?;

        let limit = self.child_limit(draft.parent_id).await?;
        let existing = self.child_repository.find_by_parent_id(draft.parent_id).await?.len();
        if existing >= limit {
            tracing::debug!(existing, limit, "child limit reached");
            return Err(UsecaseError::Validation(format!(
                "the current plan allows at most {} children",
                limit
            )));
        }

        let child = self.child_repository.create(draft).await?;

        tracing::info!(child_id = child.id, parent_id = child.parent_id, "child created");
        Ok(child)
    }

    #[tracing::instrument(skip(self, changes), fields(%child_id))]
    pub async fn update_child(&self, child_id: i64, changes: ChildChanges) -> Result<Child, UsecaseError> {
        tracing::debug!("updating child");

        if let Some(first_name) = &changes.first_name {
            check_name("first_name", first_name)?;
        }
        if let Some(age) = changes.age {
            check_age(age)?;
        }

        let mut child = self.get_child(child_id).await?;
        child.apply(changes);
        self.child_repository.update(&child).await?;

        tracing::info!(child_id, "child updated");
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::subscription::{Abonnement, BillingDuration, CataloguePlan, PlanPrice};
    use crate::usecase::contracts::{MockCatalogueRepository, MockChildRepository, MockSubscriptionRepository};

    type TestUseCase = ChildrenUseCase<MockChildRepository, MockSubscriptionRepository, MockCatalogueRepository>;

    fn children_usecase(child_repo: MockChildRepository) -> TestUseCase {
        ChildrenUseCase::new(child_repo, MockSubscriptionRepository::new(), MockCatalogueRepository::new())
    }

    /// Usecase whose parent is subscribed to a plan allowing `max_children`.
    fn usecase_with_plan(child_repo: MockChildRepository, max_children: u8) -> TestUseCase {
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo.expect_find_active_by_user_id().returning(|user_id| {
            let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
            Ok(Some(Abonnement::new(user_id, "famille".to_string(), BillingDuration::Monthly, 1299, start)))
        });

        let mut catalogue_repo = MockCatalogueRepository::new();
        catalogue_repo.expect_find_by_id().returning(move |plan_id| {
            Ok(Some(CataloguePlan {
                id: plan_id.to_string(),
                name: "Famille".to_string(),
                description: String::new(),
                features: vec![],
                prices: vec![PlanPrice { duration: BillingDuration::Monthly, price_cents: 1299 }],
                max_children,
            }))
        });

        ChildrenUseCase::new(child_repo, subscription_repo, catalogue_repo)
    }

    fn existing_children(count: usize) -> Vec<Child> {
        (0..count)
            .map(|i| Child::from_draft(i as i64 + 1, draft("Frère", 9)))
            .collect()
    }

    fn draft(first_name: &str, age: u8) -> ChildDraft {
        ChildDraft {
            parent_id: 1,
            first_name: first_name.to_string(),
            last_name: "Martin".to_string(),
            age,
            grade: "CM1".to_string(),
            avatar_url: None,
        }
    }

    #[test]
    fn test_parse_age() {
        assert_eq!(parse_age(" 9 ").unwrap(), 9);
        assert!(matches!(parse_age("neuf"), Err(UsecaseError::Validation(_))));
        assert!(matches!(parse_age("-3"), Err(UsecaseError::Validation(_))));
        assert!(matches!(parse_age("2"), Err(UsecaseError::Validation(_))));
        assert!(matches!(parse_age("19"), Err(UsecaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_child() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo
            .expect_find_by_parent_id()
            .returning(|_| Ok(existing_children(1)));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|d| Ok(Child::from_draft(10, d)));

        let usecase = usecase_with_plan(mock_repo, 4);
        let child = usecase.create_child(draft("Léa", 9)).await.unwrap();

        assert_eq!(child.id, 10);
        assert_eq!(child.first_name, "Léa");
    }

    #[tokio::test]
    async fn test_create_child_rejects_empty_name() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo.expect_create().never();

        let usecase = children_usecase(mock_repo);
        let result = usecase.create_child(draft("  ", 9)).await;

        assert_eq!(result.unwrap_err(), UsecaseError::Validation("first_name is required".to_string()));
    }

    #[tokio::test]
    async fn test_create_child_rejects_age_out_of_range() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo.expect_create().never();

        let usecase = children_usecase(mock_repo);
        let result = usecase.create_child(draft("Léa", 25)).await;

        assert!(matches!(result, Err(UsecaseError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_child_not_found() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(mockall::predicate::eq(7))
            .times(1)
            .returning(|_| Ok(None));

        let usecase = children_usecase(mock_repo);
        let result = usecase.get_child(7).await;

        assert_eq!(result.unwrap_err(), UsecaseError::NotFound("Child".to_string()));
    }

    #[tokio::test]
    async fn test_update_child_applies_changes() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(Child::from_draft(id, draft("Léa", 9)))));
        mock_repo
            .expect_update()
            .withf(|c: &Child| c.id == 3 && c.age == 10)
            .times(1)
            .returning(|_| Ok(()));

        let usecase = children_usecase(mock_repo);
        let changes = ChildChanges {
            age: Some(10),
            ..Default::default()
        };
        let child = usecase.update_child(3, changes).await.unwrap();

        assert_eq!(child.age, 10);
        assert_eq!(child.first_name, "Léa");
    }

    #[tokio::test]
    async fn test_update_child_validates_before_lookup() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo.expect_find_by_id().never();

        let usecase = children_usecase(mock_repo);
        let changes = ChildChanges {
            first_name: Some(String::new()),
            ..Default::default()
        };

        assert!(matches!(
            usecase.update_child(3, changes).await,
            Err(UsecaseError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_create_child_rejects_when_plan_is_full() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo
            .expect_find_by_parent_id()
            .times(1)
            .returning(|_| Ok(existing_children(2)));
        mock_repo.expect_create().never();

        let usecase = usecase_with_plan(mock_repo, 2);
        let result = usecase.create_child(draft("Zoé", 6)).await;

        assert_eq!(
            result.unwrap_err(),
            UsecaseError::Validation("the current plan allows at most 2 children".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_child_requires_active_subscription() {
        let mut mock_repo = MockChildRepository::new();
        mock_repo.expect_create().never();
        let mut subscription_repo = MockSubscriptionRepository::new();
        subscription_repo
            .expect_find_active_by_user_id()
            .times(1)
            .returning(|_| Ok(None));

        let usecase = ChildrenUseCase::new(mock_repo, subscription_repo, MockCatalogueRepository::new());
        let result = usecase.create_child(draft("Zoé", 6)).await;

        assert!(matches!(result, Err(UsecaseError::Validation(_))));
    }
}
