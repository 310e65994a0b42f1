mod config;
mod delivery;
mod domain;
mod repository;
mod telemetry;
mod usecase;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::delivery::http::v1::{activities, children, notifications, subscriptions};
use crate::repository::memory::{
    fixtures, DataSource, InMemoryActivityRepository, InMemoryCatalogueRepository, InMemoryChildRepository,
    InMemoryNotificationRepository, InMemorySubscriptionRepository, InMemoryUserRepository,
};
use crate::usecase::activities::ActivitiesUseCase;
use crate::usecase::children::ChildrenUseCase;
use crate::usecase::notifications::NotificationsUseCase;
use crate::usecase::recommendations::RecommendationsUseCase;
use crate::usecase::subscriptions::SubscriptionsUseCase;

pub type Activities = ActivitiesUseCase<InMemoryActivityRepository, InMemoryChildRepository>;
pub type Children =
    ChildrenUseCase<InMemoryChildRepository, InMemorySubscriptionRepository, InMemoryCatalogueRepository>;
pub type Notifications = NotificationsUseCase<InMemoryNotificationRepository>;
pub type Recommendations = RecommendationsUseCase<InMemoryActivityRepository, InMemoryChildRepository>;
pub type Subscriptions =
    SubscriptionsUseCase<InMemoryCatalogueRepository, InMemoryUserRepository, InMemorySubscriptionRepository>;

pub struct AppState {
    pub activities_usecase: Activities,
    pub children_usecase: Children,
    pub notifications_usecase: Notifications,
    pub recommendations_usecase: Recommendations,
    pub subscriptions_usecase: Subscriptions,
    pub metrics_handle: Option<PrometheusHandle>,
}

impl AppState {
    /// Wires every usecase to in-memory repositories seeded with the fixtures.
    pub fn with_fixtures(source: Arc<DataSource>, page_size: usize) -> Self {
        let child_repository = InMemoryChildRepository::new(source.clone(), fixtures::children());
        let activity_repository = InMemoryActivityRepository::new(source.clone(), fixtures::activities());
        let notification_repository =
            InMemoryNotificationRepository::new(source.clone(), fixtures::notifications());
        let catalogue_repository = InMemoryCatalogueRepository::new(source.clone(), fixtures::catalogues());
        let user_repository = InMemoryUserRepository::new(source.clone(), fixtures::users(), fixtures::PARENT_ID);
        let subscription_repository = InMemorySubscriptionRepository::new(source, fixtures::subscriptions());

        Self {
            activities_usecase: ActivitiesUseCase::new(activity_repository.clone(), child_repository.clone()),
            children_usecase: ChildrenUseCase::new(
                child_repository.clone(),
                subscription_repository.clone(),
                catalogue_repository.clone(),
            ),
            notifications_usecase: NotificationsUseCase::new(notification_repository, page_size),
            recommendations_usecase: RecommendationsUseCase::new(activity_repository, child_repository),
            subscriptions_usecase: SubscriptionsUseCase::new(
                catalogue_repository,
                user_repository,
                subscription_repository,
            ),
            metrics_handle: None,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/api/v1/me", get(subscriptions::get_current_user))
        .route(
            "/api/v1/me/subscription",
            get(subscriptions::get_active_subscription).put(subscriptions::update_subscription),
        )
        .route("/api/v1/catalogues", get(subscriptions::list_catalogues))
        .route("/api/v1/children", get(children::list_children).post(children::create_child))
        .route(
            "/api/v1/children/{id}",
            get(children::get_child).put(children::update_child),
        )
        .route("/api/v1/children/{id}/activities", get(activities::list_activities))
        .route("/api/v1/children/{id}/activities/filters", get(activities::get_filter_options))
        .route("/api/v1/children/{id}/activities/summary", get(activities::get_activity_summary))
        .route("/api/v1/children/{id}/recommendations", get(activities::get_recommendations))
        .route("/api/v1/notifications", get(notifications::list_notifications))
        .route("/api/v1/notifications/counts", get(notifications::get_counts))
        .route("/api/v1/notifications/refresh", post(notifications::refresh_notifications))
        .route("/api/v1/notifications/read-all", post(notifications::mark_all_as_read))
        .route("/api/v1/notifications/{id}/read", post(notifications::toggle_read))
        .route("/api/v1/notifications/{id}/favorite", post(notifications::toggle_favorite))
        .route("/api/v1/notifications/{id}/archive", post(notifications::toggle_archive));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let tracer_provider = if config.telemetry_enabled {
        let telemetry_config = telemetry::TelemetryConfig::from(&config);
        let provider = telemetry::init_telemetry_with_subscriber(&telemetry_config, env_filter)
            .map_err(|e| anyhow::anyhow!("failed to initialize telemetry: {}", e))?;
        Some(provider)
    } else {
        telemetry::init_subscriber_without_telemetry(env_filter);
        None
    };

    tracing::info!("starting the parent dashboard service");
    tracing::info!(
        telemetry_enabled = config.telemetry_enabled,
        mock_latency_ms = config.mock_latency_ms,
        mock_fail_every = config.mock_fail_every,
        page_size = config.notifications_page_size,
        "config loaded"
    );

    let metrics_handle = PrometheusBuilder::new().install_recorder()?;
    metrics_process::Collector::default().describe();
    tracing::info!("prometheus metrics initialized");

    let source = Arc::new(DataSource::new(config.mock_latency(), config.mock_fail_every));
    let mut state = AppState::with_fixtures(source, config.notifications_page_size);
    state.metrics_handle = Some(metrics_handle);
    let router = router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    tracing::info!(addr = %config.http_addr, "parent dashboard running");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider {
        telemetry::shutdown_telemetry(provider);
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}

async fn metrics(State(state): State<Arc<AppState>>) -> String {
    metrics_process::Collector::default().collect();
    state
        .metrics_handle
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default()
}

#[tracing::instrument]
async fn healthz() -> &'static str {
    "OK"
}
