use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Browser clients only need JSON calls with a bearer token.
pub fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(Any)
}
