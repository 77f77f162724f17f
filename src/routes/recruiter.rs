use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    dto::candidate_dto::{CandidateResponse, DashboardResponse, SearchQuery, SearchResponse},
    error::{Error, Result},
    middleware::auth::RecruiterUser,
    services::search::SearchFilter,
    AppState,
};

const RECENT_CANDIDATES: i64 = 5;

#[utoipa::path(
    get,
    path = "/api/recruiter/dashboard",
    responses(
        (status = 200, description = "Candidate count and the latest additions"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn dashboard(
    State(state): State<AppState>,
    _recruiter: RecruiterUser,
) -> Result<impl IntoResponse> {
    let total_candidates = state.candidate_service.count().await?;
    let recent = state
        .candidate_service
        .list_recent(RECENT_CANDIDATES)
        .await?;
    Ok(Json(DashboardResponse {
        total_candidates,
        recent_candidates: recent.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/recruiter/search",
    params(
        ("q" = Option<String>, Query, description = "Case-sensitive text matched against name, skills, role, company and education"),
        ("location" = Option<String>, Query, description = "Location substring"),
        ("experience" = Option<String>, Query, description = "One of 0-2, 3-5, 6-10, 10+")
    ),
    responses(
        (status = 200, description = "All matching candidates, most recently updated first"),
        (status = 403, description = "Not a recruiter")
    )
)]
#[axum::debug_handler]
pub async fn search_candidates(
    State(state): State<AppState>,
    _recruiter: RecruiterUser,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let filter = SearchFilter::from(&query);
    let items: Vec<CandidateResponse> = state
        .candidate_service
        .search(&filter)
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(Json(SearchResponse {
        total: items.len(),
        items,
        filters: query,
    }))
}

#[utoipa::path(
    get,
    path = "/api/recruiter/candidates/{id}",
    params(
        ("id" = Uuid, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 403, description = "Not a recruiter"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    _recruiter: RecruiterUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .get_candidate(id)
        .await?
        .ok_or_else(|| Error::NotFound("Candidate not found".into()))?;
    Ok(Json(CandidateResponse::from(candidate)))
}
