mod common;

use axum::http::StatusCode;
use common::{get_request, json_request, spawn_app, PASSWORD};
use serde_json::json;

#[tokio::test]
async fn register_then_login_redirects_by_role() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": "rec@example.com", "password": PASSWORD, "role": "recruiter" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful! Please login.");
    assert_eq!(body["user"]["role"], "recruiter");
    assert!(body["user"].get("password_hash").is_none());

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "rec@example.com", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["redirect_to"], "/api/recruiter/dashboard");
    assert!(body["access_token"].as_str().is_some());

    // `user_type` is accepted as an alias for `role`.
    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": "cand@example.com", "password": PASSWORD, "user_type": "candidate" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, body) = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({ "email": "cand@example.com", "password": PASSWORD }),
        ))
        .await;
    assert_eq!(body["redirect_to"], "/api/candidate/profile");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let app = spawn_app().await;
    assert_eq!(
        app.register("dup@example.com", "candidate").await,
        StatusCode::CREATED
    );

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": "dup@example.com", "password": PASSWORD, "role": "recruiter" }),
        ))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already exists!");
}

#[tokio::test]
async fn short_password_and_bad_email_are_rejected() {
    let app = spawn_app().await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": "short@example.com", "password": "abc", "role": "candidate" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Password must be at least 6 characters long!");

    let (status, _) = app
        .send(json_request(
            "POST",
            "/api/auth/register",
            None,
            json!({ "email": "not-an-email", "password": PASSWORD, "role": "candidate" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = spawn_app().await;
    app.register("someone@example.com", "candidate").await;

    for (email, password) in [
        ("someone@example.com", "wrong-password"),
        ("nobody@example.com", PASSWORD),
    ] {
        let (status, body) = app
            .send(json_request(
                "POST",
                "/api/auth/login",
                None,
                json!({ "email": email, "password": password }),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password!");
    }
}

#[tokio::test]
async fn role_gates_on_recruiter_and_candidate_routes() {
    let app = spawn_app().await;
    let candidate = app.login_as("cand@example.com", "candidate").await;
    let recruiter = app.login_as("rec@example.com", "recruiter").await;

    let (status, _) = app.send(get_request("/api/recruiter/dashboard", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(get_request("/api/recruiter/dashboard", Some("garbage")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(get_request("/api/recruiter/search", Some(&candidate)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied!");

    let (status, _) = app
        .send(get_request("/api/candidate/profile", Some(&recruiter)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(get_request("/api/recruiter/dashboard", Some(&recruiter)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_candidates"], 0);
}

#[tokio::test]
async fn logout_requires_a_token() {
    let app = spawn_app().await;
    let token = app.login_as("cand@example.com", "candidate").await;

    let (status, _) = app
        .send(json_request("POST", "/api/auth/logout", None, json!({})))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(json_request("POST", "/api/auth/logout", Some(&token), json!({})))
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}

#[tokio::test]
async fn health_reports_database() {
    let app = spawn_app().await;
    let (status, body) = app.send(get_request("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], true);
}

#[tokio::test]
async fn deleted_recruiter_token_stops_working() {
    let app = spawn_app().await;
    let _keeper = app.login_as("keeper@example.com", "recruiter").await;
    let token = app.login_as("gone@example.com", "recruiter").await;

    let (status, _) = app
        .send(get_request("/api/recruiter/dashboard", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);

    app.state
        .admin_service
        .delete_admin("gone@example.com")
        .await
        .expect("delete admin");

    let (status, body) = app
        .send(get_request("/api/recruiter/dashboard", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unknown_user");
}

#[tokio::test]
async fn role_is_read_from_the_account_not_the_token() {
    let app = spawn_app().await;
    let token = app.login_as("cand@example.com", "candidate").await;

    let (status, _) = app
        .send(get_request("/api/recruiter/dashboard", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    app.state
        .admin_service
        .quick_reset("cand@example.com", PASSWORD)
        .await
        .expect("promote");

    let (status, _) = app
        .send(get_request("/api/recruiter/dashboard", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .send(get_request("/api/candidate/profile", Some(&token)))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
