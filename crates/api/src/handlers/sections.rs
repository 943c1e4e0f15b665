use crate::{
    dto::{ErrorResponse, SectionDataResponse, SectionUnavailableResponse},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use domainstack_application::use_cases::SectionView;
use domainstack_domain::{DomainName, Section};
use tracing::{debug, error, instrument};

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

/// User-facing read of one section. Counts as a human view of the domain.
#[instrument(skip(state), name = "api_get_domain_section")]
pub async fn get_domain_section(
    State(state): State<AppState>,
    Path((domain, section)): Path<(String, String)>,
) -> Response {
    let section: Section = match section.parse() {
        Ok(section) => section,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let name = match DomainName::parse(&domain) {
        Ok(name) => name,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    state.record_access.record(name.as_str());

    match state.get_section.execute(name.as_str(), section).await {
        Ok(SectionView::Available {
            record,
            stale,
            refreshing,
        }) => {
            debug!(stale, refreshing, "Section served");
            Json(SectionDataResponse::from_record(record, stale, refreshing)).into_response()
        }
        Ok(SectionView::Unavailable(failure)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(SectionUnavailableResponse {
                domain: name.to_string(),
                section,
                message: failure.to_string(),
                reason: failure,
            }),
        )
            .into_response(),
        Ok(SectionView::Pending) => error_response(
            StatusCode::NOT_FOUND,
            format!("No {section} data available for {name} yet"),
        ),
        Err(e) => {
            error!(error = %e, "Failed to load section");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
