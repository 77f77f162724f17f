pub mod auth;
pub mod candidate_routes;
pub mod health;
pub mod recruiter;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{middleware::cors::api_cors, AppState};

pub fn router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    let auth_api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout));

    let recruiter_api = Router::new()
        .route("/api/recruiter/dashboard", get(recruiter::dashboard))
        .route("/api/recruiter/search", get(recruiter::search_candidates))
        .route("/api/recruiter/candidates/:id", get(recruiter::get_candidate))
        .route("/api/recruiter/bulk-upload", post(upload::bulk_upload))
        .route("/api/recruiter/template", get(upload::download_template));

    let candidate_api = Router::new().route(
        "/api/candidate/profile",
        get(candidate_routes::get_profile).put(candidate_routes::edit_profile),
    );

    Router::new()
        .route("/health", get(health::health))
        .merge(auth_api)
        .merge(recruiter_api)
        .merge(candidate_api)
        .with_state(state)
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(upload_limit))
}
