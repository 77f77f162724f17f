use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::candidate_dto::{CandidateResponse, ProfilePayload, ProfileResponse, ProfileSavedResponse},
    error::Result,
    middleware::auth::CandidateUser,
    utils::skills::join_skills,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidate/profile",
    responses(
        (status = 200, description = "The caller's profile, or null before the first save"),
        (status = 403, description = "Not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
) -> Result<impl IntoResponse> {
    let profile = state.candidate_service.get_by_user(user.id).await?;
    let skills_text = profile
        .as_ref()
        .map(|p| join_skills(&p.skills))
        .unwrap_or_default();
    Ok(Json(ProfileResponse {
        profile: profile.map(CandidateResponse::from),
        skills_text,
    }))
}

#[utoipa::path(
    put,
    path = "/api/candidate/profile",
    responses(
        (status = 200, description = "Existing profile updated"),
        (status = 201, description = "Profile created"),
        (status = 400, description = "Invalid payload"),
        (status = 403, description = "Not a candidate")
    )
)]
#[axum::debug_handler]
pub async fn edit_profile(
    State(state): State<AppState>,
    CandidateUser(user): CandidateUser,
    Json(payload): Json<ProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (candidate, created) = state
        .candidate_service
        .upsert_profile(user.id, payload)
        .await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(ProfileSavedResponse {
            message: "Profile updated successfully!".to_string(),
            created,
            profile: CandidateResponse::from(candidate),
        }),
    ))
}
