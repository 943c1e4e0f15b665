use crate::handlers;
use crate::middleware::require_cron_secret;
use crate::state::AppState;
use axum::{middleware, routing::get, Router};

/// Creates all API routes with state
pub fn create_api_routes(state: AppState) -> Router {
    let cron = Router::new()
        .route("/api/cron/warm-cache", get(handlers::run_warm_cache))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_cron_secret,
        ));

    Router::new()
        .route("/api/health", get(handlers::health_check))
        .route(
            "/api/domains/{domain}/sections/{section}",
            get(handlers::get_domain_section),
        )
        .merge(cron)
        .with_state(state)
}
