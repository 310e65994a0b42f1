use std::sync::Arc;

use tokio::sync::RwLock;

use super::DataSource;
use crate::{
    domain::child::{Child, ChildDraft},
    repository::errors::RepositoryError,
    usecase::contracts::ChildRepository,
};

#[derive(Clone)]
pub struct InMemoryChildRepository {
    source: Arc<DataSource>,
    children: Arc<RwLock<Vec<Child>>>,
}

impl InMemoryChildRepository {
    pub fn new(source: Arc<DataSource>, children: Vec<Child>) -> Self {
        Self {
            source,
            children: Arc::new(RwLock::new(children)),
        }
    }
}

impl ChildRepository for InMemoryChildRepository {
    #[tracing::instrument(skip(self), fields(%parent_id))]
    async fn find_by_parent_id(&self, parent_id: i64) -> Result<Vec<Child>, RepositoryError> {
        self.source.fetch("find children").await?;

        let children = self.children.read().await;
        Ok(children
            .iter()
            .filter(|c| c.parent_id == parent_id)
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self), fields(child_id = %id))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Child>, RepositoryError> {
        self.source.fetch("find child").await?;

        let children = self.children.read().await;
        Ok(children.iter().find(|c| c.id == id).cloned())
    }

    #[tracing::instrument(skip(self, draft), fields(parent_id = %draft.parent_id))]
    async fn create(&self, draft: ChildDraft) -> Result<Child, RepositoryError> {
        self.source.fetch("create child").await?;

        let mut children = self.children.write().await;
        let id = children.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let child = Child::from_draft(id, draft);
        children.push(child.clone());

        tracing::debug!(child_id = id, "child stored");
        Ok(child)
    }

    #[tracing::instrument(skip(self, child), fields(child_id = %child.id))]
    async fn update(&self, child: &Child) -> Result<(), RepositoryError> {
        self.source.fetch("update child").await?;

        let mut children = self.children.write().await;
        let slot = children
            .iter_mut()
            .find(|c| c.id == child.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = child.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::fixtures;

    fn repo() -> InMemoryChildRepository {
        InMemoryChildRepository::new(Arc::new(DataSource::instant()), fixtures::children())
    }

    fn draft() -> ChildDraft {
        ChildDraft {
            parent_id: fixtures::PARENT_ID,
            first_name: "Inès".to_string(),
            last_name: "Durand".to_string(),
            age: 7,
            grade: "CE1".to_string(),
            avatar_url: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_parent_id() {
        let children = repo().find_by_parent_id(fixtures::PARENT_ID).await.unwrap();
        assert_eq!(children.len(), 2);

        let none = repo().find_by_parent_id(999).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_next_id() {
        let repo = repo();
        let max_id = fixtures::children().iter().map(|c| c.id).max().unwrap();

        let child = repo.create(draft()).await.unwrap();

        assert_eq!(child.id, max_id + 1);
        assert_eq!(repo.find_by_id(child.id).await.unwrap(), Some(child));
    }

    #[tokio::test]
    async fn test_update_missing_child() {
        let child = Child::from_draft(999, draft());
        let result = repo().update(&child).await;
        assert_eq!(result, Err(RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_update_replaces_child() {
        let repo = repo();
        let mut child = repo.find_by_id(1).await.unwrap().unwrap();
        child.grade = "6ème".to_string();

        repo.update(&child).await.unwrap();

        assert_eq!(repo.find_by_id(1).await.unwrap().unwrap().grade, "6ème");
    }
}
