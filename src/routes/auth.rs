use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::info;
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, LoginResponse, PublicUser, RegisterPayload, RegisterResponse},
    error::Result,
    middleware::auth::AuthUser,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state.auth_service.register(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registration successful! Please login.".to_string(),
            user: PublicUser::from(user),
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Bearer token issued"),
        (status = 401, description = "Invalid email or password")
    )
)]
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let (user, access_token) = state.auth_service.login(payload).await?;
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer".to_string(),
        redirect_to: user.role.landing_path().to_string(),
        user: PublicUser::from(user),
    }))
}

/// Tokens are stateless; the client discards its copy.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Missing or invalid token")
    )
)]
#[axum::debug_handler(state = AppState)]
pub async fn logout(user: AuthUser) -> impl IntoResponse {
    info!(user_id = %user.id, "user logged out");
    StatusCode::NO_CONTENT
}
