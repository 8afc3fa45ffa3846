use axum::{
    routing::{get, post},
    Router,
};
use pipeline_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let api = Router::new()
        .route("/api/session", get(routes::session::get_session))
        .route(
            "/api/candidates",
            get(routes::candidate_routes::list_candidates)
                .post(routes::candidate_routes::create_candidate),
        )
        .route(
            "/api/candidates/board",
            get(routes::candidate_routes::candidate_board),
        )
        .route(
            "/api/candidates/:id",
            get(routes::candidate_routes::get_candidate),
        )
        .route(
            "/api/candidates/:id/move",
            post(routes::candidate_routes::move_candidate_stage),
        )
        .route(
            "/api/candidates/:id/events",
            get(routes::candidate_routes::list_candidate_events),
        )
        .route(
            "/api/roles",
            get(routes::role_routes::list_roles).post(routes::role_routes::create_role),
        )
        .route("/api/analytics/funnel", get(routes::analytics::funnel))
        .route("/api/analytics/dropoff", get(routes::analytics::dropoff))
        .route(
            "/api/analytics/sources",
            get(routes::analytics::source_performance),
        )
        .route(
            "/api/analytics/time-in-stage",
            get(routes::analytics::time_in_stage),
        )
        .route("/api/dashboard/stats", get(routes::analytics::dashboard_stats))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.api_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
