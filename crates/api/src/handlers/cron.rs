use crate::{dto::ErrorResponse, state::AppState};
use axum::{extract::State, http::StatusCode, response::Json};
use domainstack_application::use_cases::WarmCacheSummary;
use tracing::{error, info, instrument};

#[instrument(skip(state), name = "api_cron_warm_cache")]
pub async fn run_warm_cache(
    State(state): State<AppState>,
) -> Result<Json<WarmCacheSummary>, (StatusCode, Json<ErrorResponse>)> {
    info!(mode = ?state.mode, "Warm-cache sweep triggered");

    match state.warm_cache.execute().await {
        Ok(summary) => Ok(Json(summary)),
        Err(e) => {
            error!(error = %e, "Warm-cache sweep failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string())),
            ))
        }
    }
}
