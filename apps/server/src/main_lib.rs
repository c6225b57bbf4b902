use std::sync::Arc;

use crate::{config::Config, domain_events::WebDomainEventSink, events::EventBus};
use goalsync_core::{
    checkins::{CheckInService, CheckInServiceTrait},
    feed::{FeedService, FeedServiceTrait},
    friends::{FriendService, FriendServiceTrait},
    goals::{GoalService, GoalServiceTrait},
    settings::CheckInSettings,
};
use goalsync_storage_sqlite::{
    checkins::CheckInRepository,
    db::{self, write_actor},
    friends::FriendshipRepository,
    goals::GoalRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub check_in_service: Arc<dyn CheckInServiceTrait + Send + Sync>,
    pub feed_service: Arc<dyn FeedServiceTrait + Send + Sync>,
    pub friend_service: Arc<dyn FriendServiceTrait + Send + Sync>,
    pub settings: Arc<CheckInSettings>,
    pub default_user: String,
    pub db_path: String,
    pub event_bus: EventBus,
}

pub fn init_tracing() {
    let log_format = std::env::var("GS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    config.check_in.validate()?;
    let settings = Arc::new(config.check_in.clone());

    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    // The worker is started once the event bus exists; events emitted before
    // that are buffered.
    let domain_event_sink = Arc::new(WebDomainEventSink::new());

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let check_in_repository = Arc::new(CheckInRepository::new(pool.clone(), writer.clone()));
    let friendship_repository = Arc::new(FriendshipRepository::new(pool.clone(), writer.clone()));

    let goal_service = Arc::new(
        GoalService::new(goal_repository.clone(), settings.clone())
            .with_event_sink(domain_event_sink.clone()),
    );
    let check_in_service = Arc::new(
        CheckInService::new(check_in_repository.clone(), settings.clone())
            .with_event_sink(domain_event_sink.clone()),
    );
    let friend_service = Arc::new(
        FriendService::new(friendship_repository).with_event_sink(domain_event_sink.clone()),
    );
    let feed_service = Arc::new(FeedService::new(
        goal_repository,
        check_in_repository,
        friend_service.clone(),
        settings.clone(),
    ));

    let event_bus = EventBus::new(256);
    domain_event_sink.start_worker(event_bus.clone());

    Ok(Arc::new(AppState {
        goal_service,
        check_in_service,
        feed_service,
        friend_service,
        settings,
        default_user: config.default_user.clone(),
        db_path,
        event_bus,
    }))
}
