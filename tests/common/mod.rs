#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use candidate_portal::{
    config::{Config, DatabaseConfig, DEFAULT_MAX_UPLOAD_BYTES},
    database::pool::{create_pool, run_migrations},
    models::candidate::NewCandidate,
    routes, AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

pub const PASSWORD: &str = "secret123";
const BOUNDARY: &str = "candidate-portal-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database: DatabaseConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        },
        jwt_secret: "test_secret_key".into(),
        jwt_ttl_minutes: 60,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        seed_default_admin: false,
    }
}

pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let pool = create_pool(&config.database).await.expect("pool");
    run_migrations(&pool).await.expect("migrations");
    let state = AppState::new(pool, config);
    TestApp {
        router: routes::router(state.clone()),
        state,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, JsonValue) {
        let (status, bytes) = self.send_raw(request).await;
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, bytes.to_vec())
    }

    pub async fn register(&self, email: &str, role: &str) -> StatusCode {
        let (status, _) = self
            .send(json_request(
                "POST",
                "/api/auth/register",
                None,
                json!({ "email": email, "password": PASSWORD, "role": role }),
            ))
            .await;
        status
    }

    /// Registers a user and returns a bearer token for it.
    pub async fn login_as(&self, email: &str, role: &str) -> String {
        assert_eq!(self.register(email, role).await, StatusCode::CREATED);
        let (status, body) = self
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": email, "password": PASSWORD }),
            ))
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["access_token"].as_str().expect("token").to_string()
    }

    pub async fn seed_candidate(&self, candidate: NewCandidate) -> uuid::Uuid {
        candidate_portal::services::candidate_service::insert_candidate(
            &self.state.pool,
            &candidate,
        )
        .await
        .expect("insert candidate")
        .id
    }

    pub async fn candidate_count(&self) -> i64 {
        self.state
            .candidate_service
            .count()
            .await
            .expect("count")
    }
}

pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: JsonValue,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn upload_request(token: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/recruiter/bulk-upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .expect("request")
}

pub fn candidate(name: &str, email: &str, years: i32) -> NewCandidate {
    NewCandidate {
        name: name.into(),
        email: email.into(),
        experience_years: years,
        ..NewCandidate::default()
    }
}
