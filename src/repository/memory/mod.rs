//! In-memory data sources standing in for the dashboard backend.
//!
//! Every call waits a fixed latency and can be configured to reject every Nth
//! call, which is how the retry path of the screens is exercised.

mod activities;
mod children;
pub mod fixtures;
mod notifications;
mod subscriptions;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub use activities::InMemoryActivityRepository;
pub use children::InMemoryChildRepository;
pub use notifications::InMemoryNotificationRepository;
pub use subscriptions::{InMemoryCatalogueRepository, InMemorySubscriptionRepository, InMemoryUserRepository};

use crate::repository::errors::RepositoryError;

#[derive(Debug)]
pub struct DataSource {
    latency: Duration,
    fail_every: u64,
    calls: AtomicU64,
}

impl DataSource {
    pub fn new(latency: Duration, fail_every: u64) -> Self {
        Self {
            latency,
            fail_every,
            calls: AtomicU64::new(0),
        }
    }

    pub fn instant() -> Self {
        Self::new(Duration::ZERO, 0)
    }

    pub async fn fetch(&self, operation: &'static str) -> Result<(), RepositoryError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if self.fail_every > 0 && call % self.fail_every == 0 {
            tracing::warn!(operation, call, "simulated data source failure");
            return Err(RepositoryError::Unavailable(format!("{} failed", operation)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_instant_source_never_fails() {
        let source = DataSource::instant();
        for _ in 0..10 {
            assert!(source.fetch("test").await.is_ok());
        }
        assert_eq!(source.calls.load(Ordering::Relaxed), 10);
    }

    #[tokio::test]
    async fn test_every_nth_call_fails() {
        let source = DataSource::new(Duration::ZERO, 3);

        assert!(source.fetch("load").await.is_ok());
        assert!(source.fetch("load").await.is_ok());
        let err = source.fetch("load").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Unavailable(_)));
        assert!(source.fetch("load").await.is_ok());
    }

    #[tokio::test]
    async fn test_latency_is_applied() {
        let source = DataSource::new(Duration::from_millis(10), 0);
        let started = std::time::Instant::now();

        source.fetch("slow").await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(10));
    }
}
