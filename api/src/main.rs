//! Stand Rotation API Server
//!
//! Back office for team-building activities: game masters register teams and
//! stands, generate a rotation scenario and drive the activity live.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use axum::{
    middleware,
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    PostgresActivityRepository, PostgresScenarioRepository, PostgresStandRepository,
    PostgresTeamRepository, PostgresUserRepository,
};
use app::{ActivityService, RosterService, ScenarioService, UserService};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub activity_service: Arc<ActivityService<PostgresActivityRepository>>,
    pub roster_service: Arc<
        RosterService<PostgresTeamRepository, PostgresStandRepository, PostgresActivityRepository>,
    >,
    pub scenario_service: Arc<
        ScenarioService<
            PostgresActivityRepository,
            PostgresTeamRepository,
            PostgresStandRepository,
            PostgresScenarioRepository,
        >,
    >,
    pub config: Config,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

fn router(state: AppState) -> anyhow::Result<Router> {
    // Throttles credential and pincode guessing per client IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(state.config.login_rate_per_second)
            .burst_size(state.config.login_rate_burst)
            .finish()
            .ok_or_else(|| anyhow!("Invalid rate limit configuration"))?,
    );

    // Rate-limited routes (login, pincode lookup).
    // The pincode route's first segment is the role prefix; it is named `:id`
    // because it shares the slot with the other activity routes.
    let rate_limited_routes = Router::new()
        .route("/login", post(handlers::login))
        .route(
            "/activities/:id/code/:pincode",
            get(handlers::activity_by_pincode),
        )
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Read-only views, no auth
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/activities/:id", get(handlers::get_activity))
        .route("/activities/:id/teams", get(handlers::activity_teams))
        .route("/activities/:id/stands", get(handlers::activity_stands))
        .route("/teams/:id", get(handlers::get_team))
        .route("/stands/:id", get(handlers::get_stand))
        .route("/scenarios/:activity_id", get(handlers::get_scenario));

    // Game masters and admins. Layers run bottom-up: auth first, then the role check.
    let organizer_routes = Router::new()
        .route("/me", get(handlers::me))
        .route(
            "/activities",
            get(handlers::list_activities).post(handlers::create_activity),
        )
        .route(
            "/activities/:id",
            put(handlers::update_activity).delete(handlers::delete_activity),
        )
        .route("/activities/:id/start", post(handlers::start_activity))
        .route("/activities/:id/rotate", post(handlers::rotate_activity))
        .route("/activities/:id/settle", post(handlers::settle_activity))
        .route("/activities/:id/pause", post(handlers::pause_activity))
        .route("/activities/:id/resume", post(handlers::resume_activity))
        .route("/activities/:id/complete", post(handlers::complete_activity))
        .route(
            "/teams",
            get(handlers::list_teams).post(handlers::create_team),
        )
        .route(
            "/teams/:id",
            put(handlers::update_team).delete(handlers::delete_team),
        )
        .route(
            "/stands",
            get(handlers::list_stands).post(handlers::create_stand),
        )
        .route(
            "/stands/:id",
            put(handlers::update_stand).delete(handlers::delete_stand),
        )
        .route(
            "/scenarios/:activity_id/generate",
            post(handlers::generate_scenario),
        )
        .route(
            "/scenarios/:activity_id/current",
            put(handlers::update_current_scenario),
        )
        .layer(middleware::from_fn(auth::organizer_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .layer(middleware::from_fn(auth::admin_middleware))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Ok(Router::new()
        .merge(public_routes)
        .merge(rate_limited_routes)
        .merge(organizer_routes)
        .merge(admin_routes)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,standrota_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Stand Rotation API...");

    let config = Config::from_env().context("Failed to load configuration")?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let user_repo = Arc::new(PostgresUserRepository::new(db.clone()));
    let activity_repo = Arc::new(PostgresActivityRepository::new(db.clone()));
    let team_repo = Arc::new(PostgresTeamRepository::new(db.clone()));
    let stand_repo = Arc::new(PostgresStandRepository::new(db.clone()));
    let scenario_repo = Arc::new(PostgresScenarioRepository::new(db.clone()));

    // Create application services
    let user_service = Arc::new(UserService::new(user_repo, config.bcrypt_cost));

    let activity_service = Arc::new(ActivityService::new(activity_repo.clone()));

    let roster_service = Arc::new(RosterService::new(
        team_repo.clone(),
        stand_repo.clone(),
        activity_repo.clone(),
    ));

    let scenario_service = Arc::new(ScenarioService::new(
        activity_repo,
        team_repo,
        stand_repo,
        scenario_repo,
    ));

    if let Some(admin) = &config.bootstrap_admin {
        user_service
            .ensure_bootstrap_admin(&admin.login, &admin.password)
            .await
            .map_err(|e| anyhow!("Failed to create bootstrap admin: {}", e))?;
    }

    let port = config.port;

    // Create app state
    let state = AppState {
        user_service,
        activity_service,
        roster_service,
        scenario_service,
        config,
    };

    let app = router(state)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
